/// Formatter adapters for pull-request comments
mod markdown_formatter;

pub use markdown_formatter::MarkdownFormatter;

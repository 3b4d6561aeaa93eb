mod npm_manifest_parser;

pub use npm_manifest_parser::NpmManifestParser;

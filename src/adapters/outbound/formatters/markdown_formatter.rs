use crate::application::dto::RemediationResponse;
use crate::ports::outbound::RemediationFormatter;
use crate::remediation::domain::ManifestReport;
use crate::shared::Result;
use chrono::SecondsFormat;

/// Markdown table header for remediations
const TABLE_HEADER: &str = "| Line | Component | Current | Remediation |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|------|-----------|---------|-------------|\n";

/// MarkdownFormatter adapter rendering remediations as a pull-request comment
///
/// This adapter implements the RemediationFormatter port. The comment holds
/// one table per manifest with remediations, a collapsible list of skipped
/// components, and the evaluation timestamp.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Renders text as an inline code span
    ///
    /// Backticks cannot be escaped inside a code span, so they are dropped.
    fn code_span(text: &str) -> String {
        format!(
            "`{}`",
            Self::escape_markdown_table_cell(&text.replace('`', ""))
        )
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, response: &RemediationResponse) {
        output.push_str("## Dependency remediations\n\n");

        let remediated = response.remediated_count();
        if remediated == 0 {
            output.push_str(
                "No policy-compliant remediations were found for the changed dependencies.\n\n",
            );
        } else {
            output.push_str(&format!(
                "Policy evaluation found violation-free versions for **{}** of **{}** changed dependencies.\n\n",
                remediated,
                response.component_count()
            ));
        }
    }

    fn render_manifest(&self, output: &mut String, report: &ManifestReport) {
        if report.remediated().next().is_none() {
            return;
        }

        output.push_str(&format!(
            "### {}\n\n",
            Self::code_span(&report.manifest.filename)
        ));
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);

        for (entry, remediation) in report.remediated() {
            output.push_str(&format!(
                "| {} | {} | {} | **{}** |\n",
                entry.position,
                Self::code_span(&entry.component.display_name()),
                Self::escape_markdown_table_cell(entry.component.version()),
                Self::escape_markdown_table_cell(remediation.version())
            ));
        }
        output.push('\n');
    }

    fn render_skipped(&self, output: &mut String, response: &RemediationResponse) {
        let skipped = response.skipped_count();
        if skipped == 0 {
            return;
        }

        output.push_str("<details>\n");
        output.push_str(&format!(
            "<summary>Skipped components ({})</summary>\n\n",
            skipped
        ));

        for report in &response.manifests {
            for (entry, reason) in report.skipped() {
                output.push_str(&format!(
                    "- {} line {}: {} {} ({})\n",
                    Self::code_span(&report.manifest.filename),
                    entry.position,
                    Self::code_span(&entry.component.display_name()),
                    Self::escape_markdown_table_cell(entry.component.version()),
                    Self::escape_markdown_table_cell(&reason.to_string())
                ));
            }
        }

        output.push_str("\n</details>\n\n");
    }

    fn render_footer(&self, output: &mut String, response: &RemediationResponse) {
        output.push_str("---\n");
        output.push_str(&format!(
            "_Evaluated at {}_\n",
            response
                .evaluated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
}

impl RemediationFormatter for MarkdownFormatter {
    fn format(&self, response: &RemediationResponse) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, response);
        for report in &response.manifests {
            self.render_manifest(&mut output, report);
        }
        self.render_skipped(&mut output, response);
        self.render_footer(&mut output, response);

        Ok(output)
    }
}

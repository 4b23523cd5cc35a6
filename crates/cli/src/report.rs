//! Terminal reporting to the Actions runner.
//!
//! Failures become `::error` workflow commands (shown as annotations on the
//! check run) and, when `GITHUB_STEP_SUMMARY` is set, a markdown table is
//! appended to the job summary. The complete report is also available as
//! JSON for debug logging.

use std::io::Write;
use std::path::Path;

use checks::EvaluationReport;

/// Escapes a workflow command message.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// One `::error` command per configuration error and failed check.
pub fn annotations(report: &EvaluationReport) -> Vec<String> {
    let config = report.configuration_errors.iter().map(|e| {
        format!(
            "::error title={}::{}",
            escape_property(&format!("themis {} configuration", e.check)),
            escape_data(&e.to_string())
        )
    });
    let checks = report.failures().map(|r| {
        format!(
            "::error title={}::{}",
            escape_property(&format!("themis {}", r.check)),
            escape_data(r.reason.as_deref().unwrap_or("failed"))
        )
    });
    config.chain(checks).collect()
}

/// Renders the job summary markdown.
pub fn render_summary(report: &EvaluationReport) -> String {
    let mut out = String::from("### Themis policy checks\n\n");
    out.push_str("| Check | Result | Details |\n|---|---|---|\n");
    for e in &report.configuration_errors {
        out.push_str(&format!(
            "| {} | :x: invalid pattern | {} |\n",
            e.check,
            table_cell(&e.message)
        ));
    }
    for r in &report.results {
        let (status, details) = if r.passed {
            (":white_check_mark: passed", String::new())
        } else {
            (":x: failed", table_cell(r.reason.as_deref().unwrap_or("")))
        };
        out.push_str(&format!("| {} | {} | {} |\n", r.check, status, details));
    }
    if report.results.is_empty() && report.configuration_errors.is_empty() {
        out.push_str("| - | no checks enabled | |\n");
    }
    out
}

fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Serialises the full report for the debug log.
pub fn render_json(report: &EvaluationReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

/// Appends the rendered summary to the file at `path`.
pub fn append_summary(path: &Path, report: &EvaluationReport) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(render_summary(report).as_bytes())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

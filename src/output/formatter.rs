//! Output formatters for run results
//!
//! Provides the live progress stream and text/JSON report formats.

use std::io::Write;

use crate::models::CaseResult;
use crate::results::RunReport;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Print a single progress marker and flush so it shows immediately
pub fn print_progress(result: &CaseResult) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", result.symbol());
    let _ = stdout.flush();
}

/// Terminate the progress line
pub fn finish_progress() {
    println!();
}

/// Report formatter
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format the final run report
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Text => self.format_report_text(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        }
    }

    fn format_report_text(&self, report: &RunReport) -> String {
        let summary = &report.summary;
        format!(
            "elapsed: {}\ncalls: {}\npassed: {} / {}",
            format_mean(summary.mean_elapsed),
            format_mean(summary.mean_operation_count),
            summary.passed_cases,
            summary.total_cases
        )
    }
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| m.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

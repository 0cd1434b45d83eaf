//! Human and JSON rendering for command results
//!
//! Every command picks a formatter from the global `--json` and `--quiet`
//! flags. Logs go to stderr through tracing; this module owns stdout.

use std::path::Path;

use specsync_sync::SyncReport;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
    /// Renders the summary of a finished sync run
    fn sync_report(&self, path: &Path, report: &SyncReport);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter {
    quiet: bool,
}

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
    fn print_json(&self, _value: &serde_json::Value) {}

    fn sync_report(&self, path: &Path, report: &SyncReport) {
        self.success(&format!(
            "Synchronized {} in {:.1}s",
            path.display(),
            report.duration_ms as f64 / 1000.0
        ));
        for line in report_lines(report) {
            self.info(&line);
        }
        if report.template_mismatches > 0 {
            self.warn(&format!(
                "{} test case{} not updated: remote template differs",
                report.template_mismatches,
                plural(report.template_mismatches)
            ));
        }
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"level": "warning", "message": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }

    fn sync_report(&self, path: &Path, report: &SyncReport) {
        self.print_json(&report_json(path, report));
    }
}

pub fn get_formatter(json: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter { quiet })
    }
}

/// Pluralization suffix for counts in human output
pub fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn report_lines(report: &SyncReport) -> Vec<String> {
    vec![
        format!(
            "{} document{} synchronized, {} without a feature",
            report.documents,
            plural(report.documents),
            report.documents_skipped
        ),
        format!(
            "Folders: {} created, {} reused",
            report.folders_created, report.folders_reused
        ),
        format!(
            "Test cases: {} created, {} updated, {} recreated, {} skipped",
            report.test_cases_created,
            report.test_cases_updated,
            report.test_cases_recreated,
            report.test_cases_skipped
        ),
    ]
}

/// The report's counters plus `success` and `path`
fn report_json(path: &Path, report: &SyncReport) -> serde_json::Value {
    let mut value = serde_json::to_value(report).unwrap_or_else(|_| serde_json::json!({}));
    value["success"] = serde_json::Value::Bool(true);
    value["path"] = serde_json::Value::String(path.display().to_string());
    value
}

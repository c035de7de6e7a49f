//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;

use crate::call::CallReport;

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Print a single item as pretty-printed JSON.
pub fn output_json<T: Serialize>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize to JSON: {}", e)),
    }
}

/// Print a call report in the chosen mode.
pub fn print_report(report: &CallReport, mode: OutputMode) {
    if mode == OutputMode::Json {
        output_json(report);
        return;
    }

    if report.success {
        print_success(&report.message);
    } else {
        let label = report.error.as_deref().unwrap_or("Call failed");
        print_error(&format!("{}: {}", label, report.message));
    }

    if let Some(details) = &report.details {
        print_kv("username", &details.username);
        print_kv("text", &details.text);
        print_kv("language", &details.language);
        print_kv("repeat", &details.repeat.to_string());
        print_kv("carbon_copy", details.carbon_copy.as_str());
        print_kv("timeout", &format!("{}s", details.timeout));
    }
    if let Some(body) = &report.api_response {
        print_section("CallMeBot response", body);
    }
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "OK".green().bold(), msg);
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

/// Print a key-value pair line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a titled section with content.
pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.bold().underline());
    println!("{}", content);
}

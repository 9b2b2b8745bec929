//! Output → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one recipe per line, hints in parentheses
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use pantry_core::Record;
use pantry_search::SearchOutcome;
use serde_json::json;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format a search outcome.
pub fn format_outcome(outcome: &SearchOutcome, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let recipes: Vec<&Record> = outcome.records().collect();
            pretty(&json!({
                "hint": outcome.hint,
                "stats": outcome.stats,
                "recipes": recipes,
            }))
        }
        OutputMode::Human => {
            let mut lines: Vec<String> = outcome.records().map(format_record_line).collect();
            if let Some(hint) = outcome.hint {
                lines.push(format!("({})", hint));
            }
            lines.join("\n")
        }
    }
}

fn format_record_line(record: &Record) -> String {
    match record.time {
        Some(minutes) => format!(
            "{:>4}  {} ({} min)",
            record.id.as_u32(),
            record.name,
            minutes
        ),
        None => format!("{:>4}  {}", record.id.as_u32(), record.name),
    }
}

/// Format an inventory listing.
pub fn format_inventory(values: &[&str], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!(values)),
        OutputMode::Human if values.is_empty() => "(empty)".to_string(),
        OutputMode::Human => values.join("\n"),
    }
}

/// Format a confirmation message.
pub fn format_message(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "message": message })),
        OutputMode::Human => message.to_string(),
    }
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "error": format!("{:#}", err) })),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

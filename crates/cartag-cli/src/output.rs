//! Output formatting utilities.

use cartag_core::{Quote, Record, Step};
use serde_json::Value;

/// Formats a record as a simple table row.
pub fn format_record_row(record: &Record) -> String {
    format!(
        "{:<16} {:<20} {:<20} {:<8} {}",
        truncate(record.token().as_str(), 16),
        truncate(record.owner_name(), 20),
        truncate(record.vehicle_model(), 20),
        truncate(record.location(), 8),
        record.history().vehicle_type()
    )
}

/// Prints the record table header.
#[allow(clippy::print_literal)]
pub fn print_record_header() {
    println!(
        "{:<16} {:<20} {:<20} {:<8} {}",
        "TOKEN", "OWNER", "MODEL", "LOCATION", "TYPE"
    );
    println!("{}", "-".repeat(80));
}

/// Formats one record field; strings print bare, other values as JSON.
pub fn format_field_row(name: &str, value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{:<16} {}", name, rendered)
}

/// Prints the field listing header.
#[allow(clippy::print_literal)]
pub fn print_field_header() {
    println!("{:<16} {}", "FIELD", "VALUE");
    println!("{}", "-".repeat(60));
}

/// Formats one pricing step.
pub fn format_step_row(step: &Step) -> String {
    format!(
        "{:<13} {:<28} {:>8} {:>14}",
        step.kind,
        truncate(&step.name, 28),
        format!("x{}", step.factor.normalize()),
        step.after
    )
}

/// Prints a quote with its factor trail.
#[allow(clippy::print_literal)]
pub fn print_quote(quote: &Quote) {
    println!(
        "{:<13} {:<28} {:>8} {:>14}",
        "STEP", "DETAIL", "FACTOR", "RUNNING"
    );
    println!("{}", "-".repeat(66));
    for step in &quote.steps {
        println!("{}", format_step_row(step));
    }
    println!("{}", "-".repeat(66));
    println!("premium {:.2}", quote.premium);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

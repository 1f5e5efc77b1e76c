//! Fields command implementation.

use super::load_store;
use crate::output;
use cartag_store::resolve;
use serde_json::json;

pub fn run(
    records: Option<String>,
    token: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(records)?;
    let record = resolve(&store, &token)?;

    if json_output {
        let rows: Vec<_> = record
            .fields()
            .map(|(name, value)| json!({ "field": name, "value": value }))
            .collect();
        println!("{}", serde_json::to_string(&rows)?);
        return Ok(());
    }

    output::print_field_header();
    for (name, value) in record.fields() {
        println!("{}", output::format_field_row(name, &value));
    }
    Ok(())
}

//! List command implementation.

use super::load_store;
use crate::output;

pub fn run(records: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(records)?;

    if json {
        for record in store.iter() {
            println!("{}", serde_json::to_string(&record.to_json())?);
        }
        return Ok(());
    }

    output::print_record_header();
    for record in store.iter() {
        println!("{}", output::format_record_row(record));
    }
    Ok(())
}

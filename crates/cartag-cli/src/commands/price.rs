//! Price command implementation.

use super::{load_store, read_text};
use crate::output;
use cartag_core::{PremiumCalculator, RatingTable};
use cartag_store::quote_for_token;
use tracing::debug;

pub fn run(
    records: Option<String>,
    token: String,
    rating_table: Option<String>,
    explain: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = match rating_table {
        Some(path) => {
            debug!(path = %path, "loading rating table");
            RatingTable::from_yaml_str(&read_text(&path)?)?
        }
        None => RatingTable::default(),
    };
    let calculator = PremiumCalculator::new(table)?;
    let store = load_store(records)?;
    let quote = quote_for_token(&store, &calculator, &token)?;

    if json_output {
        if explain {
            println!("{}", serde_json::to_string_pretty(&quote)?);
        } else {
            let out = serde_json::json!({ "nft_token": quote.token, "premium": quote.premium });
            println!("{}", serde_json::to_string(&out)?);
        }
    } else if explain {
        output::print_quote(&quote);
    } else {
        println!("{:.2}", quote.premium);
    }
    Ok(())
}

//! Cross-module properties: canonical bytes, digests and prices agree on
//! what a record is.

use cartag_core::{
    digest, parse, price, serialize, verify, Decimal, PremiumCalculator, RatingTable, Record,
};
use serde_json::json;

fn records() -> Vec<Record> {
    vec![
        Record::from_json(&json!({
            "nft_token": "NFT123456789",
            "name": "John Doe",
            "vin": "1HGCM82633A004352",
            "history": {"accident_count": 1, "vehicle_type": "sedan"},
            "location": "CA",
            "address": "1234 Elm Street, Some City, CA",
            "car_model": "Honda Accord",
            "years_licensed": 2,
            "violations": 1,
            "claims": 0
        }))
        .unwrap(),
        Record::from_json(&json!({
            "nft_token": "NFT987654321",
            "name": "Jane Smith",
            "vin": "2FTRX18W1XCA12345",
            "history": {"accident_count": 0, "vehicle_type": "SUV"},
            "location": "NY",
            "address": "5678 Oak Avenue, Another City, NY",
            "car_model": "Toyota RAV4",
            "years_licensed": 5,
            "violations": 0,
            "claims": 0
        }))
        .unwrap(),
        Record::builder("NFT-EMPTY-HISTORY").build().unwrap(),
    ]
}

#[test]
fn serialize_and_digest_are_deterministic() {
    for record in records() {
        assert_eq!(serialize(&record).unwrap(), serialize(&record).unwrap());
        assert_eq!(digest(&record).unwrap(), digest(&record).unwrap());
        assert!(verify(&record, &digest(&record).unwrap()).unwrap());
    }
}

#[test]
fn canonical_bytes_parse_back() {
    for record in records() {
        let bytes = serialize(&record).unwrap();
        assert_eq!(parse(&bytes).unwrap(), record);
    }
}

#[test]
fn distinct_records_have_distinct_digests() {
    let digests: Vec<_> = records().iter().map(|r| digest(r).unwrap()).collect();
    assert_ne!(digests[0], digests[1]);
    assert_ne!(digests[1], digests[2]);
    assert_ne!(digests[0], digests[2]);
}

#[test]
fn documented_scenarios_price_exactly() {
    let all = records();
    assert_eq!(price(&all[0]), Decimal::new(115920, 2));
    assert_eq!(price(&all[1]), Decimal::new(105000, 2));
    assert_eq!(format!("{:.2}", price(&all[1])), "1050.00");
}

#[test]
fn premium_is_positive_for_every_sample() {
    let calc = PremiumCalculator::new(RatingTable::default()).unwrap();
    for record in records() {
        assert!(calc.price(&record) > Decimal::ZERO);
    }
}

#[test]
fn pricing_ignores_unrecognized_history() {
    let base = &records()[0];
    let annotated = base
        .to_builder()
        .history_entry("mileage", json!(15000))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(price(&annotated), price(base));
    assert_ne!(digest(&annotated).unwrap(), digest(base).unwrap());
}

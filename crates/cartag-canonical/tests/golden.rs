use cartag_canonical::{
    canonicalize, compute_digest, to_canonical_bytes, verify_digest, Digest, DigestAlg, NftToken,
};
use serde_json::json;

fn sample_record() -> serde_json::Value {
    json!({
        "nft_token": "NFT123456789",
        "name": "John Doe",
        "vin": "1HGCM82633A004352",
        "history": {"vehicle_type": "sedan", "accident_count": 1},
        "location": "CA",
        "address": "1234 Elm Street, Some City, CA",
        "car_model": "Honda Accord",
        "years_licensed": 2,
        "violations": 1,
        "claims": 0
    })
}

#[test]
fn digest_serializes_to_golden_json() {
    let digest = Digest::sha256(b"");

    assert_eq!(
        serde_json::to_string(&digest).unwrap(),
        r#"{"alg":"sha-256","hex":"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"}"#
    );
}

#[test]
fn digest_json_round_trips_and_rejects_garbage() {
    let digest = Digest::sha256(b"cartag");
    let text = serde_json::to_string(&digest).unwrap();
    let back: Digest = serde_json::from_str(&text).unwrap();
    assert_eq!(back, digest);

    let bad = r#"{"alg":"sha-256","hex":"not-hex"}"#;
    assert!(serde_json::from_str::<Digest>(bad).is_err());
}

#[test]
fn canonical_record_bytes_match_golden_text() {
    let bytes = canonicalize(&sample_record()).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        concat!(
            r#"{"address":"1234 Elm Street, Some City, CA","car_model":"Honda Accord","#,
            r#""claims":0,"history":{"accident_count":1,"vehicle_type":"sedan"},"#,
            r#""location":"CA","name":"John Doe","nft_token":"NFT123456789","#,
            r#""vin":"1HGCM82633A004352","violations":1,"years_licensed":2}"#
        )
    );
}

#[test]
fn record_digest_matches_golden_hex() {
    let digest = compute_digest(&sample_record()).unwrap();
    assert_eq!(digest.alg(), DigestAlg::Sha256);
    assert_eq!(
        digest.to_hex(),
        "436f00dc6192dc3765769071adad436ce769376782c2ae4d052fc5f99bf80f14"
    );
}

#[test]
fn verify_detects_nested_change() {
    let record = sample_record();
    let digest = compute_digest(&record).unwrap();
    assert!(verify_digest(&record, &digest).unwrap());

    let mut changed = record.clone();
    changed["history"]["accident_count"] = json!(2);
    assert!(!verify_digest(&changed, &digest).unwrap());
}

#[test]
fn typed_values_canonicalize_like_their_json() {
    let token = NftToken::parse("NFT123456789").unwrap();
    assert_eq!(to_canonical_bytes(&token).unwrap(), br#""NFT123456789""#.to_vec());
}

fn international_record() -> serde_json::Value {
    json!({
        "nft_token": "NFT-UTF8",
        "name": "José Ünïcode",
        "address": "12 \"Quoted\" St \\ Apt 4",
        "vin": "VF1RFB00X12345678",
        "history": {
            "accident_count": 0,
            "vehicle_type": "sedan",
            "mileage": 1.0,
            "service_log": ["2023-01-15: vidange", {"km": 0.5, "garage": "Müller"}]
        },
        "location": "BY",
        "car_model": "Škoda Octavia",
        "years_licensed": 7,
        "violations": 0,
        "claims": 1
    })
}

#[test]
fn non_ascii_record_is_raw_utf8() {
    let text = String::from_utf8(canonicalize(&international_record()).unwrap()).unwrap();
    assert!(text.contains(r#""name":"José Ünïcode""#));
    assert!(text.contains(r#""car_model":"Škoda Octavia""#));
    assert!(text.contains(r#""address":"12 \"Quoted\" St \\ Apt 4""#));
    assert!(text.contains(r#""mileage":1,"#));
    assert!(text.contains(r#"{"garage":"Müller","km":0.5}"#));
    assert!(!text.contains("\\u00"));
}

#[test]
fn non_ascii_record_digest_matches_golden_hex() {
    let digest = compute_digest(&international_record()).unwrap();
    assert_eq!(
        digest.to_hex(),
        "5df6ab3d869483f46f490b2819781523dce3596bf3ca018805d68799f8377987"
    );
}

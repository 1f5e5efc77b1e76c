use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted into a JSON tree.
    #[error("value is not representable as JSON: {0}")]
    Unrepresentable(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected under key {0}")]
    NonFiniteNumber(String),
    /// The encoder rejected the value.
    #[error("canonical encoding failed: {0}")]
    Encoding(String),
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Produces the canonical UTF-8 bytes for a JSON value.
///
/// Keys are sorted by code point at every level and no whitespace is emitted
/// between tokens. Strings are raw UTF-8; only `"`, `\` and control
/// characters are escaped. Integral floats inside the safe-integer range are
/// written as integers (`1.0` becomes `1`).
pub fn canonicalize(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let normalized = canonical_value(value)?;
    serde_json::to_vec(&normalized).map_err(|err| CanonicalizationError::Encoding(err.to_string()))
}

/// The tree `canonicalize` encodes: keys sorted, integral floats turned into
/// integers. Two values are canonically equal exactly when their canonical
/// trees compare equal.
pub fn canonical_value(value: &Value) -> Result<Value, CanonicalizationError> {
    normalize(value, "root")
}

/// Serializes any `Serialize` value to a JSON tree, then canonicalizes it.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, CanonicalizationError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| CanonicalizationError::Unrepresentable(err.to_string()))?;
    canonicalize(&tree)
}

/// Rebuilds the tree with sorted keys and canonical numbers. Entries are
/// inserted in sorted order so the result holds with or without
/// `serde_json/preserve_order`.
fn normalize(value: &Value, key: &str) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (k, child) in entries {
                sorted.insert(k.clone(), normalize(child, k)?);
            }
            Ok(Value::Object(sorted))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| normalize(item, key))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Number(num) => normalize_number(num, key).map(Value::Number),
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(value.clone()),
    }
}

fn normalize_number(num: &Number, key: &str) -> Result<Number, CanonicalizationError> {
    if num.is_i64() || num.is_u64() {
        return Ok(num.clone());
    }
    match num.as_f64() {
        Some(f) if !f.is_finite() => Err(CanonicalizationError::NonFiniteNumber(key.to_string())),
        Some(f) if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => Ok(Number::from(f as i64)),
        _ => Ok(num.clone()),
    }
}

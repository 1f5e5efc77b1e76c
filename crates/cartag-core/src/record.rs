//! Vehicle/owner record model.

use cartag_canonical::{canonical_value, NftToken};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Vehicle type assumed when the history carries none.
pub const DEFAULT_VEHICLE_TYPE: &str = "sedan";

const ACCIDENT_COUNT_KEY: &str = "accident_count";
const VEHICLE_TYPE_KEY: &str = "vehicle_type";

/// Vehicle history: two recognized keys plus a pass-through bag.
///
/// Unrecognized keys are kept in canonical form (integral floats become
/// integers) so a record survives a canonical round trip without loss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleHistory {
    accident_count: Option<u32>,
    vehicle_type: Option<String>,
    extra: BTreeMap<String, Value>,
}

impl VehicleHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded accidents, `0` when absent.
    pub fn accident_count(&self) -> u32 {
        self.accident_count.unwrap_or(0)
    }

    /// Vehicle type, `"sedan"` when absent.
    pub fn vehicle_type(&self) -> &str {
        self.vehicle_type.as_deref().unwrap_or(DEFAULT_VEHICLE_TYPE)
    }

    /// Accident count exactly as recorded.
    pub fn recorded_accident_count(&self) -> Option<u32> {
        self.accident_count
    }

    /// Vehicle type exactly as recorded.
    pub fn recorded_vehicle_type(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    /// Keys the history carries beyond the recognized ones.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Builds a history from an untyped mapping.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, CoreError> {
        let mut history = VehicleHistory::default();
        for (key, value) in map {
            match key.as_str() {
                ACCIDENT_COUNT_KEY => {
                    history.accident_count = Some(non_negative("history.accident_count", &value)?)
                }
                VEHICLE_TYPE_KEY => match value {
                    Value::String(s) => history.vehicle_type = Some(s),
                    other => {
                        return Err(CoreError::InvalidRecord(format!(
                            "history.vehicle_type must be a string, got {}",
                            other
                        )))
                    }
                },
                _ => {
                    history.extra.insert(key, canonical_value(&value)?);
                }
            }
        }
        Ok(history)
    }

    /// Untyped mapping form, the shape written to canonical bytes.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map: Map<String, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(count) = self.accident_count {
            map.insert(ACCIDENT_COUNT_KEY.to_string(), Value::from(count));
        }
        if let Some(kind) = &self.vehicle_type {
            map.insert(VEHICLE_TYPE_KEY.to_string(), Value::from(kind.clone()));
        }
        map
    }
}

impl Serialize for VehicleHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Immutable vehicle/owner record addressed by an NFT token.
///
/// Construct through [`Record::builder`] or decode with [`Record::from_json`];
/// both validate. Changing a field means deriving a new value with
/// [`Record::to_builder`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RecordWire")]
pub struct Record {
    token: NftToken,
    owner_name: String,
    owner_address: String,
    vehicle_id: String,
    history: VehicleHistory,
    location: String,
    vehicle_model: String,
    years_licensed: u32,
    violations: u32,
    claims: u32,
}

impl Record {
    /// Wire keys in canonical (lexicographic) order.
    pub const FIELDS: [&'static str; 10] = [
        "address",
        "car_model",
        "claims",
        "history",
        "location",
        "name",
        "nft_token",
        "vin",
        "violations",
        "years_licensed",
    ];

    /// Starts a builder for a record with the given token.
    pub fn builder(token: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(token)
    }

    /// Decodes a record from its JSON mapping form.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let wire: RecordWire = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        Record::try_from(wire)
    }

    /// Builder seeded with this record's fields.
    pub fn to_builder(&self) -> RecordBuilder {
        RecordBuilder {
            token: self.token.to_string(),
            owner_name: self.owner_name.clone(),
            owner_address: self.owner_address.clone(),
            vehicle_id: self.vehicle_id.clone(),
            history: self.history.clone(),
            location: self.location.clone(),
            vehicle_model: self.vehicle_model.clone(),
            years_licensed: self.years_licensed,
            violations: self.violations,
            claims: self.claims,
        }
    }

    /// NFT token.
    pub fn token(&self) -> &NftToken {
        &self.token
    }

    /// Owner's name.
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Owner's postal address.
    pub fn owner_address(&self) -> &str {
        &self.owner_address
    }

    /// Vehicle identification number, treated as opaque.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Vehicle history.
    pub fn history(&self) -> &VehicleHistory {
        &self.history
    }

    /// Jurisdiction code.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Vehicle make and model.
    pub fn vehicle_model(&self) -> &str {
        &self.vehicle_model
    }

    /// Years the primary driver has held a license.
    pub fn years_licensed(&self) -> u32 {
        self.years_licensed
    }

    /// Prior traffic violations.
    pub fn violations(&self) -> u32 {
        self.violations
    }

    /// Prior insurance claims.
    pub fn claims(&self) -> u32 {
        self.claims
    }

    /// Value of one wire field, `None` for an unknown name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "address" => Value::from(self.owner_address.clone()),
            "car_model" => Value::from(self.vehicle_model.clone()),
            "claims" => Value::from(self.claims),
            "history" => Value::Object(self.history.to_map()),
            "location" => Value::from(self.location.clone()),
            "name" => Value::from(self.owner_name.clone()),
            "nft_token" => Value::from(self.token.to_string()),
            "vin" => Value::from(self.vehicle_id.clone()),
            "violations" => Value::from(self.violations),
            "years_licensed" => Value::from(self.years_licensed),
            _ => return None,
        };
        Some(value)
    }

    /// `(wire key, value)` pairs in [`Record::FIELDS`] order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Value)> + '_ {
        Self::FIELDS
            .iter()
            .filter_map(move |name| self.field(name).map(|value| (*name, value)))
    }

    /// JSON mapping form.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

/// Builder for [`Record`]; validation runs in [`RecordBuilder::build`].
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    token: String,
    owner_name: String,
    owner_address: String,
    vehicle_id: String,
    history: VehicleHistory,
    location: String,
    vehicle_model: String,
    years_licensed: u32,
    violations: u32,
    claims: u32,
}

impl RecordBuilder {
    fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner_name: String::new(),
            owner_address: String::new(),
            vehicle_id: String::new(),
            history: VehicleHistory::default(),
            location: String::new(),
            vehicle_model: String::new(),
            years_licensed: 0,
            violations: 0,
            claims: 0,
        }
    }

    /// Sets the owner's name.
    pub fn owner_name(mut self, value: impl Into<String>) -> Self {
        self.owner_name = value.into();
        self
    }

    /// Sets the owner's address.
    pub fn owner_address(mut self, value: impl Into<String>) -> Self {
        self.owner_address = value.into();
        self
    }

    /// Sets the VIN.
    pub fn vehicle_id(mut self, value: impl Into<String>) -> Self {
        self.vehicle_id = value.into();
        self
    }

    /// Sets the jurisdiction code.
    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = value.into();
        self
    }

    /// Sets the vehicle model.
    pub fn vehicle_model(mut self, value: impl Into<String>) -> Self {
        self.vehicle_model = value.into();
        self
    }

    /// Sets years licensed.
    pub fn years_licensed(mut self, value: u32) -> Self {
        self.years_licensed = value;
        self
    }

    /// Sets the violation count.
    pub fn violations(mut self, value: u32) -> Self {
        self.violations = value;
        self
    }

    /// Sets the claim count.
    pub fn claims(mut self, value: u32) -> Self {
        self.claims = value;
        self
    }

    /// Records an accident count in the history.
    pub fn accident_count(mut self, value: u32) -> Self {
        self.history.accident_count = Some(value);
        self
    }

    /// Records a vehicle type in the history.
    pub fn vehicle_type(mut self, value: impl Into<String>) -> Self {
        self.history.vehicle_type = Some(value.into());
        self
    }

    /// Adds an unrecognized history key, preserved in canonical form.
    ///
    /// Recognized keys are routed to their typed slot and validated.
    pub fn history_entry(mut self, key: impl Into<String>, value: Value) -> Result<Self, CoreError> {
        let key = key.into();
        let mut single = Map::new();
        single.insert(key, value);
        let parsed = VehicleHistory::from_map(single)?;
        if parsed.accident_count.is_some() {
            self.history.accident_count = parsed.accident_count;
        }
        if parsed.vehicle_type.is_some() {
            self.history.vehicle_type = parsed.vehicle_type;
        }
        self.history.extra.extend(parsed.extra);
        Ok(self)
    }

    /// Replaces the whole history.
    pub fn history(mut self, history: VehicleHistory) -> Self {
        self.history = history;
        self
    }

    /// Validates and produces the record.
    pub fn build(self) -> Result<Record, CoreError> {
        let token = NftToken::parse(self.token)?;
        Ok(Record {
            token,
            owner_name: self.owner_name,
            owner_address: self.owner_address,
            vehicle_id: self.vehicle_id,
            history: self.history,
            location: self.location,
            vehicle_model: self.vehicle_model,
            years_licensed: self.years_licensed,
            violations: self.violations,
            claims: self.claims,
        })
    }
}

/// Untyped wire shape; numbers are signed so negatives surface as
/// `InvalidRecord` instead of a generic decode error.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordWire {
    nft_token: String,
    name: String,
    address: String,
    vin: String,
    #[serde(default)]
    history: Option<Map<String, Value>>,
    location: String,
    car_model: String,
    years_licensed: i64,
    violations: i64,
    claims: i64,
}

impl TryFrom<RecordWire> for Record {
    type Error = CoreError;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        let history = VehicleHistory::from_map(wire.history.unwrap_or_default())?;
        Record::builder(wire.nft_token)
            .owner_name(wire.name)
            .owner_address(wire.address)
            .vehicle_id(wire.vin)
            .location(wire.location)
            .vehicle_model(wire.car_model)
            .years_licensed(count("years_licensed", wire.years_licensed)?)
            .violations(count("violations", wire.violations)?)
            .claims(count("claims", wire.claims)?)
            .history(history)
            .build()
    }
}

fn count(field: &str, value: i64) -> Result<u32, CoreError> {
    u32::try_from(value).map_err(|_| {
        CoreError::InvalidRecord(format!(
            "{} must be a non-negative integer no larger than {}, got {}",
            field,
            u32::MAX,
            value
        ))
    })
}

fn non_negative(field: &str, value: &Value) -> Result<u32, CoreError> {
    match value.as_i64() {
        Some(n) => count(field, n),
        None => Err(CoreError::InvalidRecord(format!(
            "{} must be an integer, got {}",
            field, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire() -> Value {
        json!({
            "nft_token": "NFT987654321",
            "name": "Jane Smith",
            "vin": "2FTRX18W1XCA12345",
            "history": {"accident_count": 0, "vehicle_type": "SUV", "mileage": 15000},
            "location": "NY",
            "address": "5678 Oak Avenue, Another City, NY",
            "car_model": "Toyota RAV4",
            "years_licensed": 5,
            "violations": 0,
            "claims": 0
        })
    }

    #[test]
    fn decodes_wire_form() {
        let record = Record::from_json(&wire()).unwrap();
        assert_eq!(record.token().as_str(), "NFT987654321");
        assert_eq!(record.owner_name(), "Jane Smith");
        assert_eq!(record.history().vehicle_type(), "SUV");
        assert_eq!(record.history().extra().get("mileage"), Some(&json!(15000)));
    }

    #[test]
    fn json_form_round_trips() {
        let record = Record::from_json(&wire()).unwrap();
        assert_eq!(record.to_json(), wire());
        assert_eq!(Record::from_json(&record.to_json()).unwrap(), record);
    }

    #[test]
    fn missing_history_defaults() {
        let mut value = wire();
        value.as_object_mut().unwrap().remove("history");
        let record = Record::from_json(&value).unwrap();
        assert_eq!(record.history().accident_count(), 0);
        assert_eq!(record.history().vehicle_type(), DEFAULT_VEHICLE_TYPE);
        assert_eq!(record.field("history"), Some(json!({})));
    }

    #[test]
    fn negative_counts_are_invalid() {
        for field in ["years_licensed", "violations", "claims"] {
            let mut value = wire();
            value[field] = json!(-1);
            assert!(
                matches!(Record::from_json(&value), Err(CoreError::InvalidRecord(_))),
                "{field} accepted a negative value"
            );
        }

        let mut value = wire();
        value["history"]["accident_count"] = json!(-2);
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn mistyped_history_keys_are_invalid() {
        let mut value = wire();
        value["history"]["vehicle_type"] = json!(3);
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::InvalidRecord(_))
        ));

        let mut value = wire();
        value["history"]["accident_count"] = json!("one");
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn empty_token_is_invalid() {
        assert!(matches!(
            Record::builder("").build(),
            Err(CoreError::InvalidRecord(_))
        ));
        let mut value = wire();
        value["nft_token"] = json!("  ");
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn wrong_types_are_serialization_errors() {
        let mut value = wire();
        value["claims"] = json!("zero");
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::Serialization(_))
        ));

        let mut value = wire();
        value["color"] = json!("blue");
        assert!(matches!(
            Record::from_json(&value),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn fields_follow_declared_order() {
        let record = Record::from_json(&wire()).unwrap();
        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, Record::FIELDS.to_vec());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn history_entry_routes_recognized_keys() {
        let record = Record::builder("NFT1")
            .history_entry("accident_count", json!(3))
            .unwrap()
            .history_entry("service_log", json!(["2023-01-15: oil change"]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(record.history().accident_count(), 3);
        assert!(record.history().extra().contains_key("service_log"));
        assert!(Record::builder("NFT1")
            .history_entry("accident_count", json!(-1))
            .is_err());
    }

    #[test]
    fn to_builder_derives_a_new_value() {
        let record = Record::from_json(&wire()).unwrap();
        let moved = record.to_builder().location("TX").build().unwrap();
        assert_eq!(record.location(), "NY");
        assert_eq!(moved.location(), "TX");
        assert_ne!(record, moved);
    }
}

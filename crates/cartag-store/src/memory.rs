//! In-memory record store, optionally backed by a JSON file.

use cartag_canonical::NftToken;
use cartag_core::Record;
use serde_json::Value;
use tracing::debug;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::StoreError;
use crate::traits::RecordLookup;

/// Records keyed by NFT token, iterated in token order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<NftToken, Record>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records, rejecting duplicate tokens.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Parses a JSON array of records.
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        let items: Vec<Value> = serde_json::from_str(text)?;
        let records = items
            .iter()
            .map(Record::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    /// Loads a JSON array of records from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let store = Self::from_json_str(&text)?;
        debug!(path = %path.display(), records = store.len(), "loaded record store");
        Ok(store)
    }

    /// Writes every record, in token order, as a pretty JSON array.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let items: Vec<Value> = self.records.values().map(Record::to_json).collect();
        let mut text = serde_json::to_string_pretty(&items)?;
        text.push('\n');
        fs::write(path, text)?;
        debug!(path = %path.display(), records = items.len(), "saved record store");
        Ok(())
    }

    /// Adds a record. Tokens are unique; a second record with the same
    /// token is refused.
    pub fn insert(&mut self, record: Record) -> Result<(), StoreError> {
        let token = record.token().clone();
        if self.records.contains_key(&token) {
            return Err(StoreError::DuplicateToken(token.to_string()));
        }
        self.records.insert(token, record);
        Ok(())
    }

    /// Borrowed record by token string.
    pub fn get(&self, token: &str) -> Option<&Record> {
        self.records.get(token)
    }

    /// Records in token order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordLookup for MemoryStore {
    fn lookup(&self, token: &NftToken) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(token: &str) -> Record {
        Record::builder(token).location("CA").build().unwrap()
    }

    #[test]
    fn duplicate_tokens_are_refused() {
        let mut store = MemoryStore::new();
        store.insert(record("NFT1")).unwrap();
        assert!(matches!(
            store.insert(record("NFT1")),
            Err(StoreError::DuplicateToken(t)) if t == "NFT1"
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iterates_in_token_order() {
        let store =
            MemoryStore::from_records([record("NFT3"), record("NFT1"), record("NFT2")]).unwrap();
        let tokens: Vec<&str> = store.iter().map(|r| r.token().as_str()).collect();
        assert_eq!(tokens, ["NFT1", "NFT2", "NFT3"]);
    }

    #[test]
    fn lookup_returns_a_snapshot() {
        let store = MemoryStore::from_records([record("NFT1")]).unwrap();
        let token = NftToken::parse("NFT1").unwrap();
        assert_eq!(store.lookup(&token).unwrap(), Some(record("NFT1")));
        let missing = NftToken::parse("NFT404").unwrap();
        assert_eq!(store.lookup(&missing).unwrap(), None);
    }

    #[test]
    fn invalid_entries_fail_the_load() {
        let text = r#"[{"nft_token":"NFT1","name":"","address":"","vin":"","location":"","car_model":"","years_licensed":-3,"violations":0,"claims":0}]"#;
        assert!(matches!(
            MemoryStore::from_json_str(text),
            Err(StoreError::Core(cartag_core::CoreError::InvalidRecord(_)))
        ));
        assert!(matches!(
            MemoryStore::from_json_str("{"),
            Err(StoreError::Json(_))
        ));
    }
}

//! Subcommand implementations and the input helpers they share.

pub mod canonicalize;
pub mod digest;
pub mod fields;
pub mod keygen;
pub mod list;
pub mod price;
pub mod seal;
pub mod unseal;
pub mod verify;

use cartag_store::{sample_store, MemoryStore, StoreError};
use std::io::{self, Read};
use thiserror::Error;
use tracing::debug;

/// Failures reading command inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// File could not be read.
    #[error("Failed to read file {path}: {source}")]
    Read {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// Records file could not be loaded.
    #[error("Failed to load records from {path}: {source}")]
    Records {
        /// Path as given on the command line.
        path: String,
        /// Underlying store failure.
        source: StoreError,
    },
}

/// Loads the records file, or the built-in samples when none is given.
pub fn load_store(records: Option<String>) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    match records {
        Some(path) => MemoryStore::load_json(&path)
            .map_err(|source| InputError::Records { path, source }.into()),
        None => {
            debug!("no records file given, using built-in samples");
            Ok(sample_store()?)
        }
    }
}

/// Reads a text file.
pub fn read_text(path: &str) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_string(),
        source,
    })
}

/// Reads a file, or stdin if no path is given.
pub fn read_bytes(input: Option<String>) -> Result<Vec<u8>, InputError> {
    match input {
        Some(path) => std::fs::read(&path).map_err(|source| InputError::Read { path, source }),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|source| InputError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}

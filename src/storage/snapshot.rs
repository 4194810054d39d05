use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::models::product::Product;

pub const SNAPSHOT_FORMAT: &str = "shopping-cart";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to replace snapshot file: {0}")]
    PersistError(#[from] tempfile::PersistError),

    #[error("Unsupported snapshot: format '{format}' version {version}")]
    UnsupportedFormat { format: String, version: u32 },
}

/// Serde adapter for prices. JSON has no NaN or infinities, so those are
/// stored as the strings `"NaN"`, `"inf"` and `"-inf"`; finite prices stay
/// plain numbers.
pub(crate) mod price {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredPrice {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if price.is_finite() {
            serializer.serialize_f64(*price)
        } else if price.is_nan() {
            serializer.serialize_str("NaN")
        } else if price.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match StoredPrice::deserialize(deserializer)? {
            StoredPrice::Number(price) => Ok(price),
            StoredPrice::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    format: &'a str,
    version: u32,
    items: &'a [Product],
}

#[derive(Deserialize)]
struct Snapshot {
    format: String,
    version: u32,
    items: Vec<Product>,
}

/// Serializes the item sequence as one JSON document.
pub fn encode(items: &[Product]) -> Result<String, StorageError> {
    let snapshot = SnapshotRef {
        format: SNAPSHOT_FORMAT,
        version: SNAPSHOT_VERSION,
        items,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

pub fn decode(data: &str) -> Result<Vec<Product>, StorageError> {
    let snapshot: Snapshot = serde_json::from_str(data)?;

    if snapshot.format != SNAPSHOT_FORMAT || snapshot.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedFormat {
            format: snapshot.format,
            version: snapshot.version,
        });
    }

    Ok(snapshot.items)
}

/// Replaces the file at `path` with a snapshot of `items`.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so a failed save leaves the previous snapshot in place.
pub fn write_snapshot(path: &Path, items: &[Product]) -> Result<(), StorageError> {
    let json_data = encode(items)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(json_data.as_bytes())?;
    file.flush()?;
    file.as_file().sync_all()?;

    // the temp file is created owner-only; keep the mode of the file it replaces
    if let Ok(existing) = fs::metadata(path) {
        file.as_file().set_permissions(existing.permissions())?;
    }
    file.persist(path)?;

    debug!("Snapshot of {} item(s) written to {}", items.len(), path.display());
    Ok(())
}

/// Reads the snapshot at `path`. A missing file is `Ok(None)`; anything
/// else that prevents reading it back is an error.
pub fn read_snapshot(path: &Path) -> Result<Option<Vec<Product>>, StorageError> {
    let json_data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let items = decode(&json_data)?;
    debug!("Snapshot of {} item(s) read from {}", items.len(), path.display());
    Ok(Some(items))
}

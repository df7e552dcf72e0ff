use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::PackError;
use crate::sources::npy::NpyArray;

/// Shape of a decoded array source: a list (`tolist()` of an array) or a
/// dictionary payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayPayload {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl ArrayPayload {
    pub fn from_value(path: &Path, value: Value) -> Result<Self, PackError> {
        match value {
            Value::Array(items) => Ok(ArrayPayload::Sequence(items)),
            Value::Object(map) => Ok(ArrayPayload::Mapping(map)),
            other => Err(PackError::malformed(
                path,
                format!("expected an array or a dictionary, found {}", kind_of(&other)),
            )),
        }
    }

    pub fn into_sequence(self, path: &Path) -> Result<Vec<Value>, PackError> {
        match self {
            ArrayPayload::Sequence(items) => Ok(items),
            ArrayPayload::Mapping(_) => Err(PackError::malformed(
                path,
                "expected an array, found a dictionary",
            )),
        }
    }

    pub fn into_mapping(self, path: &Path) -> Result<Map<String, Value>, PackError> {
        match self {
            ArrayPayload::Mapping(map) => Ok(map),
            ArrayPayload::Sequence(_) => Err(PackError::malformed(
                path,
                "expected a dictionary, found an array",
            )),
        }
    }
}

/// Reads one array source. `Ok(None)` means the source does not exist.
pub trait ArrayLoader {
    fn load(&self, path: &Path) -> Result<Option<ArrayPayload>, PackError>;
}

/// Loads array sources from disk, choosing the decoder by file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArrayLoader;

impl ArrayLoader for FsArrayLoader {
    fn load(&self, path: &Path) -> Result<Option<ArrayPayload>, PackError> {
        if !path.is_file() {
            return Ok(None);
        }
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let value = match extension {
            "npy" => {
                let bytes = fs::read(path)?;
                NpyArray::parse(&bytes)
                    .map_err(|e| PackError::malformed(path, e.to_string()))?
                    .to_value()
            }
            "json" => {
                let bytes = fs::read(path)?;
                serde_json::from_slice(&bytes)
                    .map_err(|e| PackError::malformed(path, e.to_string()))?
            }
            "pkl" => {
                return Err(PackError::malformed(
                    path,
                    format!(
                        "pickled objects cannot be decoded; export it as {}",
                        path.with_extension("json").display()
                    ),
                ))
            }
            other => {
                return Err(PackError::malformed(
                    path,
                    format!("unsupported file type '.{other}'"),
                ))
            }
        };
        ArrayPayload::from_value(path, value).map(Some)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a dictionary",
    }
}

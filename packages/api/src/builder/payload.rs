//! Request payload model
//!
//! A request carries at most one payload kind. Whichever `send_*` call ran last
//! decides it; dispatch resolves the kind into bytes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Number, Value};

/// Structured key/value payload used for JSON, form and multipart fields.
pub type PayloadMap = BTreeMap<String, PayloadValue>;

/// A dynamically typed payload value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Text(String),
    /// An array whose every element is a string
    List(Vec<String>),
    Number(Number),
    /// Booleans, null, objects and mixed arrays
    Other(Value),
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => PayloadValue::Text(text),
            Value::Number(number) => PayloadValue::Number(number),
            Value::Array(items) if items.iter().all(Value::is_string) => PayloadValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => PayloadValue::Other(other),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<Vec<String>> for PayloadValue {
    fn from(value: Vec<String>) -> Self {
        PayloadValue::List(value)
    }
}

impl PayloadValue {
    /// Values this entry contributes to a URL-encoded form.
    ///
    /// Strings are added as-is, lists as repeated keys and numbers in decimal form.
    /// Anything else is not representable and contributes nothing.
    #[must_use]
    pub fn form_values(&self) -> Vec<String> {
        match self {
            PayloadValue::Text(text) => vec![text.clone()],
            PayloadValue::List(items) => items.clone(),
            PayloadValue::Number(number) => vec![number.to_string()],
            PayloadValue::Other(_) => Vec::new(),
        }
    }

    /// Values this entry contributes as multipart text fields.
    ///
    /// Like `form_values`, except that other values are written as their JSON text.
    #[must_use]
    pub fn multipart_values(&self) -> Vec<String> {
        match self {
            PayloadValue::Other(value) => vec![value.to_string()],
            _ => self.form_values(),
        }
    }
}

/// Convert a decoded JSON object into the payload map.
pub(crate) fn map_from_object(object: serde_json::Map<String, Value>) -> PayloadMap {
    object
        .into_iter()
        .map(|(key, value)| (key, PayloadValue::from(value)))
        .collect()
}

/// Encode `map` as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form(map: &PayloadMap) -> Result<String, serde_urlencoded::ser::Error> {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(map.len());
    for (key, value) in map {
        let values = value.form_values();
        if values.is_empty() {
            log::debug!("form encoding drops non-scalar field '{key}'");
        }
        pairs.extend(values.into_iter().map(|v| (key.as_str(), v)));
    }
    serde_urlencoded::to_string(pairs)
}

/// File to upload as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// Form field name of the file part
    pub field: String,
    /// Path read at dispatch time
    pub path: PathBuf,
    /// Extra text fields written after the file part
    pub fields: PayloadMap,
}

/// The single body representation a request carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    /// Structured mapping, encoded according to the content type
    Fields(PayloadMap),
    Bytes(Bytes),
    Text(String),
    File(FileUpload),
}

impl Payload {
    /// Structured fields carried by this payload, if any.
    #[must_use]
    pub fn fields(&self) -> Option<&PayloadMap> {
        match self {
            Payload::Fields(map) => Some(map),
            Payload::File(upload) => Some(&upload.fields),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }
}

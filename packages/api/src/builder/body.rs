//! Payload selection
//!
//! Each `send_*` method replaces the payload kind; the last call wins. Structured
//! fields survive a switch to or from a file upload so they can travel as extra
//! multipart fields.

use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;

use chainreq_client::error;

use crate::builder::content_type::ContentType;
use crate::builder::core::RequestSpec;
use crate::builder::payload::{FileUpload, Payload, PayloadMap, map_from_object};

impl RequestSpec {
    /// Send `bytes` verbatim.
    ///
    /// Sets `Content-Type: application/octet-stream` unless a content type is already set.
    #[must_use]
    pub fn send_raw_bytes(self, bytes: impl Into<Bytes>) -> Self {
        let mut spec = self.default_content_type(ContentType::ApplicationOctetStream);
        let bytes = bytes.into();
        spec.trace(format_args!("raw bytes payload ({} bytes)", bytes.len()));
        spec.payload = Payload::Bytes(bytes);
        spec
    }

    /// Send `text` verbatim.
    ///
    /// Sets `Content-Type: text/plain` unless a content type is already set.
    #[must_use]
    pub fn send_raw_string(self, text: impl Into<String>) -> Self {
        let mut spec = self.default_content_type(ContentType::TextPlain);
        let text = text.into();
        spec.trace(format_args!("raw string payload ({} bytes)", text.len()));
        spec.payload = Payload::Text(text);
        spec
    }

    /// Upload the file at `path` as a multipart part named `field`.
    ///
    /// The file is opened when the request is dispatched, not here. Fields from an
    /// earlier `send_struct` are written after the file part.
    ///
    /// # Examples
    /// ```
    /// use chainreq::Payload;
    ///
    /// let spec = chainreq::new("https://api.example.com/upload")
    ///     .post()
    ///     .send_file("document", "/tmp/report.pdf");
    /// assert!(matches!(spec.payload(), Payload::File(upload) if upload.field == "document"));
    /// ```
    #[must_use]
    pub fn send_file(mut self, field: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let field = field.into();
        let path = path.into();
        self.trace(format_args!("file payload '{}' from {}", field, path.display()));

        let fields = match std::mem::take(&mut self.payload) {
            Payload::Fields(map) => map,
            Payload::File(upload) => upload.fields,
            _ => PayloadMap::new(),
        };
        self.payload = Payload::File(FileUpload { field, path, fields });
        self
    }

    /// Use a serializable value as the structured payload.
    ///
    /// The value is serialized to JSON and decoded into a `PayloadMap`, so it must
    /// serialize to a JSON object; `null` (such as `()` or `None`) gives an empty map.
    /// On failure a configuration error is recorded and the payload is left as it was.
    ///
    /// # Examples
    /// ```
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Login<'a> {
    ///     user: &'a str,
    ///     scopes: Vec<&'a str>,
    /// }
    ///
    /// let spec = chainreq::new("https://api.example.com/login")
    ///     .post()
    ///     .content_type("form")
    ///     .send_struct(&Login { user: "ada", scopes: vec!["read", "write"] });
    /// assert!(spec.errors().is_empty());
    ///
    /// let rejected = chainreq::new("https://api.example.com").send_struct(&vec![1, 2]);
    /// assert_eq!(rejected.errors().len(), 1);
    /// ```
    #[must_use]
    pub fn send_struct<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        let object = match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(object)) => object,
            Ok(serde_json::Value::Null) => serde_json::Map::new(),
            Ok(other) => {
                self.record(error::configuration(format!(
                    "payload must serialize to a JSON object, got {}",
                    json_kind(&other)
                )));
                return self;
            }
            Err(e) => {
                self.record(error::configuration(e));
                return self;
            }
        };

        let map = map_from_object(object);
        self.trace(format_args!("structured payload ({} fields)", map.len()));

        match &mut self.payload {
            Payload::File(upload) => upload.fields = map,
            payload => *payload = Payload::Fields(map),
        }
        self
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

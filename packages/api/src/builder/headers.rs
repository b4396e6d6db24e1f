//! Header management
//!
//! Headers are kept as plain strings, one value per name, and are only validated
//! when dispatch copies them onto the wire request.

use http::header::CONTENT_TYPE;

use crate::builder::content_type::{self, ContentType};
use crate::builder::core::RequestSpec;

impl RequestSpec {
    /// Set a header, replacing any previous value stored under the same name.
    ///
    /// # Examples
    /// ```
    /// let spec = chainreq::new("https://api.example.com")
    ///     .set_header("X-Trace", "abc")
    ///     .set_header("X-Trace", "def");
    /// assert_eq!(spec.header_value("X-Trace"), Some("def"));
    /// ```
    #[must_use]
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        self.trace(format_args!("header {name}: {value}"));
        self.headers.insert(name, value);
        self
    }

    /// Set several headers at once.
    #[must_use]
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |spec, (name, value)| spec.set_header(name, value))
    }

    /// Set `Content-Type`, resolving short aliases.
    ///
    /// `html`, `text`, `json`, `xml`, `urlencoded`, `form`, `form-data` and `stream`
    /// expand to their MIME types; anything else is used verbatim.
    ///
    /// # Examples
    /// ```
    /// let spec = chainreq::new("https://api.example.com").content_type("form");
    /// assert_eq!(
    ///     spec.content_type_value(),
    ///     Some("application/x-www-form-urlencoded")
    /// );
    /// ```
    #[must_use]
    pub fn content_type(self, name: &str) -> Self {
        let canonical = content_type::canonical(name);
        self.replace_content_type(canonical)
    }

    /// Current `Content-Type`, whatever the case of the stored header name.
    #[must_use]
    pub fn content_type_value(&self) -> Option<&str> {
        self.content_type_key()
            .and_then(|key| self.headers.get(key))
            .map(String::as_str)
    }

    fn content_type_key(&self) -> Option<&String> {
        self.headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
    }

    /// Set `Content-Type`, dropping any differently-cased duplicates.
    pub(crate) fn replace_content_type(mut self, value: String) -> Self {
        self.put_content_type(value);
        self
    }

    /// Set `Content-Type` only when none is present.
    pub(crate) fn default_content_type(mut self, content_type: ContentType) -> Self {
        self.ensure_content_type(content_type);
        self
    }

    pub(crate) fn put_content_type(&mut self, value: String) {
        self.headers
            .retain(|key, _| !key.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        self.headers.insert("Content-Type".to_string(), value);
    }

    pub(crate) fn ensure_content_type(&mut self, content_type: ContentType) {
        if self.content_type_value().is_none() {
            self.headers
                .insert("Content-Type".to_string(), content_type.as_str().to_string());
        }
    }
}

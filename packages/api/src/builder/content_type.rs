//! Content type enumeration and the short alias table
//!
//! `ContentType` names the MIME types the builder itself produces. Callers can also
//! pass short aliases such as `"json"` or `"form"` to `RequestSpec::content_type`,
//! which are resolved through `resolve_alias`.

/// Content type enumeration for elegant API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/xml content type
    ApplicationXml,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
    /// text/html content type
    TextHtml,
    /// multipart/form-data content type
    MultipartFormData,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationXml => "application/xml",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
            ContentType::MultipartFormData => "multipart/form-data",
        }
    }

    /// Match a `Content-Type` header value, ignoring parameters and case.
    ///
    /// `"application/json; charset=utf-8"` matches `ApplicationJson`.
    #[must_use]
    pub fn matches(self, header_value: &str) -> bool {
        essence(header_value).eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a short alias to its canonical MIME type.
///
/// | alias        | MIME type                           |
/// |--------------|-------------------------------------|
/// | `html`       | `text/html`                         |
/// | `text`       | `text/plain`                        |
/// | `json`       | `application/json`                  |
/// | `xml`        | `application/xml`                   |
/// | `urlencoded` | `application/x-www-form-urlencoded` |
/// | `form`       | `application/x-www-form-urlencoded` |
/// | `form-data`  | `application/x-www-form-urlencoded` |
/// | `stream`     | `application/octet-stream`          |
///
/// Aliases are exact and case-sensitive.
#[must_use]
pub fn resolve_alias(alias: &str) -> Option<ContentType> {
    match alias {
        "html" => Some(ContentType::TextHtml),
        "text" => Some(ContentType::TextPlain),
        "json" => Some(ContentType::ApplicationJson),
        "xml" => Some(ContentType::ApplicationXml),
        "urlencoded" | "form" | "form-data" => Some(ContentType::ApplicationFormUrlEncoded),
        "stream" => Some(ContentType::ApplicationOctetStream),
        _ => None,
    }
}

/// Canonical header value for `name`: the aliased MIME type, or `name` verbatim.
#[must_use]
pub fn canonical(name: &str) -> String {
    match resolve_alias(name) {
        Some(content_type) => content_type.as_str().to_string(),
        None => name.to_string(),
    }
}

fn essence(header_value: &str) -> &str {
    header_value.split(';').next().unwrap_or_default().trim()
}

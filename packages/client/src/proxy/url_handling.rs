//! URL handling and authentication utilities for proxy configuration

use http::header::HeaderValue;

use crate::Url;

/// Extract percent-decoded `(username, password)` from a URL's userinfo.
pub(crate) fn credentials_from_url(url: &Url) -> Option<(String, String)> {
    if url.username().is_empty() {
        return None;
    }

    let decode = |raw: &str| match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!(
                target: "chainreq::proxy",
                "proxy credentials are not valid UTF-8 after decoding: {e}"
            );
            raw.to_string()
        }
    };

    let username = decode(url.username());
    let password = url.password().map(decode).unwrap_or_default();
    Some((username, password))
}

/// Build a `Basic` authorization header value.
pub fn encode_basic_auth(username: &str, password: &str) -> HeaderValue {
    use base64::Engine;
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
    let auth_value = format!("Basic {}", encoded);

    let mut value =
        HeaderValue::from_str(&auth_value).unwrap_or_else(|_| HeaderValue::from_static(""));
    value.set_sensitive(true);
    value
}

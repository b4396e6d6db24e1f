//! Request dispatch
//!
//! `call` resolves a `RequestSpec` into a wire request, sends it, and drains the response
//! body. Failures never stop the pipeline from returning; they are appended to the
//! request's error list, which the caller receives alongside whatever body and response
//! could be obtained.

use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use http::{HeaderName, HeaderValue};

use chainreq_client::{HttpClient, HttpError, HttpRequest, HttpResponse, Url, error};

use crate::builder::content_type::ContentType;
use crate::builder::core::RequestSpec;
use crate::builder::methods::{carries_body, is_bodyless};
use crate::builder::multipart::MultipartWriter;
use crate::builder::payload::{FileUpload, Payload, encode_form};

/// Response body, response handle and every error recorded for the request.
///
/// The error list is the success signal: empty means the request was sent and the
/// whole body was read.
pub type CallResult = (String, Option<HttpResponse>, Vec<HttpError>);

impl RequestSpec {
    /// Dispatch the request and read the whole response body.
    ///
    /// Nothing is sent when configuration already recorded an error, when no method
    /// was selected, or when the request could not be assembled. A failure while
    /// reading the body still returns the response and the bytes read so far.
    ///
    /// Blocks the calling thread; must not be called from within an async runtime.
    ///
    /// # Examples
    /// ```no_run
    /// let (body, response, errors) = chainreq::new("https://httpbin.org/post")
    ///     .post()
    ///     .content_type("json")
    ///     .send_struct(&serde_json::json!({"name": "ada"}))
    ///     .call();
    ///
    /// if errors.is_empty() {
    ///     println!("{} -> {body}", response.map(|r| r.status().as_u16()).unwrap_or_default());
    /// }
    /// ```
    pub fn call(mut self) -> CallResult {
        if !self.errors.is_empty() {
            self.trace(format_args!(
                "skipping dispatch, {} configuration errors",
                self.errors.len()
            ));
            return (String::new(), None, self.errors);
        }

        let client = match HttpClient::with_config(self.config.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                self.record(e);
                None
            }
        };

        let request = self.build_request();

        let (Some(client), Some(request)) = (client, request) else {
            return (String::new(), None, self.errors);
        };
        if !self.errors.is_empty() {
            return (String::new(), None, self.errors);
        }

        let mut response = match client.execute(request) {
            Ok(response) => response,
            Err(e) => {
                self.record(e);
                return (String::new(), None, self.errors);
            }
        };
        self.trace(format_args!("response status {}", response.status()));

        let mut body = Vec::new();
        if let Err(e) = response.read_to_end(&mut body) {
            self.record(e);
        }
        self.trace(format_args!("response body {} bytes", body.len()));

        (String::from_utf8_lossy(&body).into_owned(), Some(response), self.errors)
    }

    /// Assemble the wire request, recording every failure.
    fn build_request(&mut self) -> Option<HttpRequest> {
        let url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(e) => {
                self.record(error::builder(e));
                return None;
            }
        };

        let method = match self.method.clone() {
            Some(method) if is_bodyless(&method) || carries_body(&method) => method,
            _ => {
                self.record(error::no_method().with_url(url));
                return None;
            }
        };

        let body = if carries_body(&method) {
            self.prepare_body()?
        } else {
            Bytes::new()
        };

        let mut request = HttpRequest::new(method, url).with_body(body);
        let mut invalid = Vec::new();
        for (name, value) in &self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    request.headers_mut().insert(name, value);
                }
                (Err(e), _) => invalid.push(error::builder(e)),
                (_, Err(e)) => invalid.push(error::builder(e)),
            }
        }
        for e in invalid {
            self.record(e);
        }

        Some(request)
    }

    /// Default the content type and turn the payload into body bytes.
    fn prepare_body(&mut self) -> Option<Bytes> {
        self.ensure_content_type(ContentType::ApplicationJson);
        let content_type = self.content_type_value().unwrap_or_default().to_string();

        match std::mem::take(&mut self.payload) {
            Payload::File(upload) => match write_multipart(&upload) {
                Ok((body, multipart_type)) => {
                    self.trace(format_args!("multipart body ({} bytes)", body.len()));
                    self.put_content_type(multipart_type);
                    Some(body)
                }
                Err(e) => {
                    self.record(e);
                    None
                }
            },
            Payload::Fields(map) if ContentType::ApplicationJson.matches(&content_type) => {
                if map.is_empty() {
                    return Some(Bytes::new());
                }
                match serde_json::to_vec(&map) {
                    Ok(json) => Some(Bytes::from(json)),
                    Err(e) => {
                        self.record(error::builder(e));
                        None
                    }
                }
            }
            Payload::Fields(map)
                if ContentType::ApplicationFormUrlEncoded.matches(&content_type) =>
            {
                match encode_form(&map) {
                    Ok(form) => Some(Bytes::from(form)),
                    Err(e) => {
                        self.record(error::builder(e));
                        None
                    }
                }
            }
            Payload::Fields(_) => {
                log::warn!(
                    "structured payload cannot be encoded as '{}', sending an empty body",
                    content_type
                );
                Some(Bytes::new())
            }
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Text(text) => Some(Bytes::from(text)),
            Payload::None => Some(Bytes::new()),
        }
    }
}

/// Build the multipart body for `upload`, returning it with its `Content-Type`.
///
/// The file handle is closed before returning on every path.
fn write_multipart(upload: &FileUpload) -> Result<(Bytes, String), HttpError> {
    let mut file = File::open(&upload.path).map_err(|e| {
        error::builder(FileError {
            path: upload.path.display().to_string(),
            source: e,
        })
    })?;

    let file_name = file_name(&upload.path);
    let mut writer = MultipartWriter::new();
    writer
        .write_file(&upload.field, &file_name, &mut file)
        .map_err(|e| {
            error::builder(FileError {
                path: upload.path.display().to_string(),
                source: e,
            })
        })?;

    for (name, value) in &upload.fields {
        for text in value.multipart_values() {
            writer.write_field(name, &text);
        }
    }

    let content_type = writer.content_type();
    Ok((Bytes::from(writer.finish()), content_type))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Failure to read the file being uploaded
#[derive(Debug, thiserror::Error)]
#[error("cannot read upload file {path}: {source}")]
struct FileError {
    path: String,
    #[source]
    source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preexisting_error_short_circuits() {
        let spec = RequestSpec::new("http://127.0.0.1:9/").proxy("nope").get();
        let before: Vec<String> = spec.errors().iter().map(ToString::to_string).collect();

        let (body, response, errors) = spec.call();

        assert!(body.is_empty());
        assert!(response.is_none());
        let after: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn missing_method_is_reported() {
        let (body, response, errors) = RequestSpec::new("http://127.0.0.1:9/").call();
        assert!(body.is_empty());
        assert!(response.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_no_method());
        assert!(errors[0].to_string().starts_with("no method specified"));
    }

    #[test]
    fn unparseable_url_is_a_build_error() {
        let (_, response, errors) = RequestSpec::new("not a url").get().call();
        assert!(response.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_builder());
    }

    #[test]
    fn missing_upload_file_is_reported_before_sending() {
        let (_, response, errors) = RequestSpec::new("http://127.0.0.1:9/")
            .post()
            .send_file("upload", "/nonexistent/path")
            .call();
        assert!(response.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_builder());
        assert!(errors[0].to_string().contains("/nonexistent/path"));
    }

    #[test]
    fn invalid_header_is_a_build_error() {
        let (_, response, errors) = RequestSpec::new("http://127.0.0.1:9/")
            .get()
            .set_header("Bad Header", "x")
            .call();
        assert!(response.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_builder());
    }

    #[test]
    fn json_body_is_encoded() {
        let mut spec = RequestSpec::new("http://example.com")
            .post()
            .content_type("json")
            .send_struct(&json!({"a": 1}));
        let request = spec.build_request().expect("request builds");
        let decoded: serde_json::Value = serde_json::from_slice(request.body()).expect("json body");
        assert_eq!(decoded, json!({"a": 1}));
    }

    #[test]
    fn post_defaults_to_json() {
        let mut spec = RequestSpec::new("http://example.com")
            .post()
            .send_struct(&json!({"a": "b"}));
        let request = spec.build_request().expect("request builds");
        assert_eq!(request.headers()["content-type"], "application/json");
        assert_eq!(request.body().as_ref(), br#"{"a":"b"}"#);
    }

    #[test]
    fn form_body_is_encoded() {
        let mut spec = RequestSpec::new("http://example.com")
            .post()
            .content_type("form")
            .send_struct(&json!({"x": "1", "y": ["2", "3"]}));
        let request = spec.build_request().expect("request builds");
        let body = std::str::from_utf8(request.body()).expect("utf8 body");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).expect("form body");
        assert!(pairs.contains(&("x".to_string(), "1".to_string())));
        let ys: Vec<&str> = pairs
            .iter()
            .filter(|(k, _)| k == "y")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(ys, vec!["2", "3"]);
    }

    #[test]
    fn raw_bytes_win_over_empty_json() {
        let mut spec = RequestSpec::new("http://example.com")
            .post()
            .content_type("json")
            .send_raw_bytes(&b"\x00\x01raw"[..]);
        let request = spec.build_request().expect("request builds");
        assert_eq!(request.body().as_ref(), b"\x00\x01raw");
    }

    #[test]
    fn bodyless_methods_ignore_payload() {
        let build = |spec: RequestSpec| {
            let mut spec = spec.send_raw_string("ignored");
            spec.build_request().expect("request builds")
        };
        for spec in [
            RequestSpec::new("http://example.com").get(),
            RequestSpec::new("http://example.com").head(),
            RequestSpec::new("http://example.com").delete(),
            RequestSpec::new("http://example.com").options(),
        ] {
            assert!(build(spec).body().is_empty());
        }
    }

    #[test]
    fn fields_under_other_content_type_send_nothing() {
        let mut spec = RequestSpec::new("http://example.com")
            .post()
            .content_type("xml")
            .send_struct(&json!({"a": 1}));
        let request = spec.build_request().expect("request builds");
        assert!(request.body().is_empty());
        assert!(spec.errors().is_empty());
    }

    #[test]
    fn json_content_type_parameters_are_accepted() {
        let mut spec = RequestSpec::new("http://example.com")
            .put()
            .content_type("application/json; charset=utf-8")
            .send_struct(&json!({"k": "v"}));
        let request = spec.build_request().expect("request builds");
        assert_eq!(request.body().as_ref(), br#"{"k":"v"}"#);
    }

    #[test]
    fn file_name_falls_back_to_path() {
        assert_eq!(file_name(Path::new("/tmp/report.pdf")), "report.pdf");
        assert_eq!(file_name(Path::new("/")), "/");
    }
}

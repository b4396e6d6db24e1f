//! `multipart/form-data` body writer
//!
//! Parts are written into an in-memory buffer in call order. `finish` appends the
//! closing boundary.

use std::io::{self, Read};

/// Generate boundary string for multipart forms
#[must_use]
pub fn generate_boundary() -> String {
    format!("----chainreq-formdata-{:016x}", fastrand::u64(..))
}

#[derive(Debug)]
pub struct MultipartWriter {
    boundary: String,
    buf: Vec<u8>,
}

impl Default for MultipartWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: Vec::new(),
        }
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `Content-Type` header value announcing this writer's boundary.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Write a file part, streaming its content from `reader`.
    ///
    /// On a read error the part stays incomplete in the buffer.
    pub fn write_file<R: Read>(
        &mut self,
        field: &str,
        file_name: &str,
        reader: &mut R,
    ) -> io::Result<u64> {
        self.open_part(field, Some(file_name));
        self.buf.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        let copied = io::copy(reader, &mut self.buf)?;
        self.buf.extend_from_slice(b"\r\n");
        Ok(copied)
    }

    /// Write a plain text field.
    pub fn write_field(&mut self, name: &str, value: &str) {
        self.open_part(name, None);
        self.buf.extend_from_slice(b"\r\n");
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Append the closing boundary and return the body.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");
        self.buf
    }

    fn open_part(&mut self, name: &str, file_name: Option<&str>) {
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\nContent-Disposition: form-data; name=\"");
        self.buf.extend_from_slice(escape_quoted(name).as_bytes());
        self.buf.push(b'"');
        if let Some(file_name) = file_name {
            self.buf.extend_from_slice(b"; filename=\"");
            self.buf.extend_from_slice(escape_quoted(file_name).as_bytes());
            self.buf.push(b'"');
        }
        self.buf.extend_from_slice(b"\r\n");
    }
}

/// Escape a value for a quoted-string header parameter.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_fields() {
        let mut writer = MultipartWriter::with_boundary("XYZ");
        writer
            .write_file("upload", "notes.txt", &mut "file body".as_bytes())
            .expect("in-memory copy");
        writer.write_field("title", "hello");
        let body = String::from_utf8(writer.finish()).expect("utf8 body");

        let expected = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"upload\"; filename=\"notes.txt\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            file body\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            hello\r\n\
            --XYZ--\r\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(escape_quoted(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_quoted("x\r\ny"), "x%0D%0Ay");
    }

    #[test]
    fn boundaries_are_random() {
        assert_ne!(generate_boundary(), generate_boundary());
        let writer = MultipartWriter::with_boundary("abc");
        assert_eq!(writer.content_type(), "multipart/form-data; boundary=abc");
    }
}

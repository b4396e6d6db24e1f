use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for invalid builder input.
pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Configuration).with(e.into())
}

/// Creates the `Error` reported when dispatch runs without a method.
pub fn no_method() -> Error {
    Error::new(Kind::NoMethod)
}

/// Creates an `Error` for a request that could not be assembled.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a connection failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for an elapsed deadline.
pub fn timeout(url: crate::Url) -> Error {
    Error::new(Kind::Timeout)
        .with(super::helpers::TimedOut)
        .with_url(url)
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

pub fn url_bad_scheme(url: crate::Url) -> Error {
    Error::new(Kind::Builder)
        .with(super::helpers::BadScheme)
        .with_url(url)
}

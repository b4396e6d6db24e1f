//! HTTP method selectors
//!
//! Each selector only records the verb; the last one called wins.

use http::Method;

use crate::builder::core::RequestSpec;

impl RequestSpec {
    fn with_method(mut self, method: Method) -> Self {
        self.trace(format_args!("method {method}"));
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn get(self) -> Self {
        self.with_method(Method::GET)
    }

    #[must_use]
    pub fn post(self) -> Self {
        self.with_method(Method::POST)
    }

    #[must_use]
    pub fn put(self) -> Self {
        self.with_method(Method::PUT)
    }

    #[must_use]
    pub fn delete(self) -> Self {
        self.with_method(Method::DELETE)
    }

    #[must_use]
    pub fn head(self) -> Self {
        self.with_method(Method::HEAD)
    }

    #[must_use]
    pub fn options(self) -> Self {
        self.with_method(Method::OPTIONS)
    }

    #[must_use]
    pub fn patch(self) -> Self {
        self.with_method(Method::PATCH)
    }
}

/// Methods sent without a body.
pub(crate) fn is_bodyless(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::DELETE | Method::OPTIONS)
}

/// Methods whose body is resolved from the payload.
pub(crate) fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

//! Request builder modules
//!
//! `RequestSpec` is configured through chained calls split across these modules and
//! consumed by `call`, which performs the request.

pub mod body;
pub mod content_type;
pub mod core;
pub mod dispatch;
pub mod headers;
pub mod methods;
pub mod multipart;
pub mod payload;
pub mod transport;

pub use content_type::ContentType;
pub use core::RequestSpec;
pub use dispatch::CallResult;
pub use multipart::MultipartWriter;
pub use payload::{FileUpload, Payload, PayloadMap, PayloadValue};

//! HTTP request handlers
//!
//! Each endpoint decodes its body manually so validation failures produce the
//! exact error literals the frontend expects, while a malformed body falls
//! through to the generic internal error path.

pub mod analyze;
pub mod plan;

pub use analyze::analyze_book;
pub use plan::generate_plan;

use crate::{Error, Result};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Internal(e.to_string()))
}

/// Fallback for any non-POST method on the API routes.
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

//! Shared response envelope types for API handlers.
//!
//! Resource endpoints under `/api/v1` answer with a `{ "data": ... }`
//! envelope. The delivery endpoints answer with a flat `{ "success": true,
//! ... }` object because the web client already consumes that shape.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

//! Shared response envelope types for API handlers.
//!
//! All success responses use the `{ "ok": true, "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!` so the shape stays
//! consistent across handlers.

use serde::Serialize;

/// Standard `{ "ok": true, "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

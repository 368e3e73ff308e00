//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use helpdesk_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of create endpoints: the new row's ID.
#[derive(Debug, Serialize)]
pub struct CreatedId {
    pub id: DbId,
}

/// Payload of count endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

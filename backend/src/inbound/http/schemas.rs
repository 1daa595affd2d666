//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror the serialised shape of the error envelope and live
//! in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist, or no estimate exists for a
    /// name.
    #[schema(rename = "not_found")]
    NotFound,
    /// An enrichment lookup failed while creating a user.
    #[schema(rename = "enrichment_failed")]
    EnrichmentFailed,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// The trace identifier travels in the `trace-id` header, not the body.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    error: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "nationality not found")]
    message: String,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

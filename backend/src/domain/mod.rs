//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed people entities used by the HTTP and
//! persistence layers, plus the service that enriches and stores them.
//! Adapters depend on this module; it depends on none of them.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserInfo, Email, Friend: people records and read models.
//! - FriendshipPair: canonical `(low, high)` friendship key.
//! - PeopleService: implementation of the driving ports.

pub mod error;
pub mod friendship;
pub mod people_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::friendship::{CanonicalPairs, FriendshipPair, canonical_pairs, friendships_for};
pub use self::people_service::PeopleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, EmailId, Friend, PersonName, User, UserId, UserInfo, UserValidationError,
    normalise_email_addresses,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use people::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no users"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

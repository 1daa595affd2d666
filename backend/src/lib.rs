//! People service library: users, emails, and friendships over REST.
//!
//! The crate is laid out hexagonally. [`domain`] holds the model, ports, and
//! the orchestrating service; [`inbound`] adapts HTTP requests to the driving
//! ports; [`outbound`] implements the driven ports with Diesel and reqwest.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

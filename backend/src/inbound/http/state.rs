//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PeopleCommand, PeopleQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use people::domain::PeopleService;
/// use people::domain::ports::FixtureEnrichmentSource;
/// use people::inbound::http::state::HttpState;
/// use people::outbound::persistence::{DbPool, DieselPeopleRepository, PoolConfig};
///
/// # async fn build() -> Result<HttpState, Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("postgres://localhost/people")).await?;
/// let service = Arc::new(PeopleService::new(
///     Arc::new(DieselPeopleRepository::new(pool)),
///     Arc::new(FixtureEnrichmentSource),
/// ));
/// Ok(HttpState::new(service.clone(), service))
/// # }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub query: Arc<dyn PeopleQuery>,
    pub command: Arc<dyn PeopleCommand>,
}

impl HttpState {
    /// Construct state from the read and write ports.
    pub fn new(query: Arc<dyn PeopleQuery>, command: Arc<dyn PeopleCommand>) -> Self {
        Self { query, command }
    }
}

//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use people::outbound::enrichment::HttpEnrichmentSource;
use people::outbound::persistence::DbPool;

/// Everything the server needs to build its adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) enrichment: HttpEnrichmentSource,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, enrichment: HttpEnrichmentSource) -> Self {
        Self {
            bind_addr,
            db_pool,
            enrichment,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

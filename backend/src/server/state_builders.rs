//! Builders wiring the outbound adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;

use people::domain::PeopleService;
use people::inbound::http::state::HttpState;
use people::outbound::persistence::DieselPeopleRepository;

use super::ServerConfig;

/// Build the handler state from the configured pool and enrichment client.
///
/// One [`PeopleService`] instance backs both the query and command ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(DieselPeopleRepository::new(config.db_pool.clone()));
    let enrichment = Arc::new(config.enrichment.clone());
    let service = Arc::new(PeopleService::new(repository, enrichment));
    web::Data::new(HttpState::new(service.clone(), service))
}

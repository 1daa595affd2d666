//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod enrichment_source;
mod people_command;
mod people_query;
mod people_repository;

#[cfg(test)]
pub use enrichment_source::MockEnrichmentSource;
pub use enrichment_source::{EnrichmentSource, EnrichmentSourceError, FixtureEnrichmentSource};
#[cfg(test)]
pub use people_command::MockPeopleCommand;
pub use people_command::PeopleCommand;
#[cfg(test)]
pub use people_query::MockPeopleQuery;
pub use people_query::PeopleQuery;
#[cfg(test)]
pub use people_repository::MockPeopleRepository;
pub use people_repository::{PeopleRepository, PeopleRepositoryError};

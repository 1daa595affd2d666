//! Enrichment outbound adapters.
//!
//! Thin reqwest implementation of the `EnrichmentSource` port that queries
//! the age, gender, and nationality estimation services.

mod dto;
mod http_source;

pub use http_source::{EnrichmentEndpoints, HttpEnrichmentSource};

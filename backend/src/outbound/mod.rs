//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed people repository using Diesel ORM
//! - **enrichment**: reqwest-backed age, gender, and nationality lookups
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod enrichment;
pub mod persistence;

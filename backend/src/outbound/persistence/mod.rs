//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the concrete [`PeopleRepository`](crate::domain::ports::PeopleRepository)
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types. Friendship canonicalisation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every pool and Diesel failure is mapped to
//!   [`PeopleRepositoryError`](crate::domain::ports::PeopleRepositoryError).
//!
//! # Example
//!
//! ```no_run
//! use people::outbound::persistence::{DbPool, DieselPeopleRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/people")).await?;
//! let repository = DieselPeopleRepository::new(pool);
//! repository.ensure_schema().await?;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_people_repository;
mod models;
mod pool;
mod schema;

pub use diesel_people_repository::DieselPeopleRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

//! Driving port for people mutations.
//!
//! HTTP handlers call this port to create users (with enrichment), attach
//! emails and friends, and update or delete records.

use async_trait::async_trait;

use crate::domain::{EmailId, Error, PersonName, User, UserId};

/// Domain use-case port for mutating people.
///
/// # Errors
///
/// Every operation returns a domain [`Error`] whose code tells the adapter
/// how to report it: `InvalidRequest` for unusable input, `NotFound` for a
/// missing target, `EnrichmentFailed` when a lookup failed during creation,
/// and `InternalError` for storage faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleCommand: Send + Sync {
    /// Enrich the name and store a new user, returning its identifier.
    async fn create_user(&self, name: PersonName) -> Result<UserId, Error>;

    /// Attach email addresses to a user.
    async fn add_user_emails(&self, user_id: UserId, emails: Vec<String>) -> Result<(), Error>;

    /// Link a user to each of the given friends.
    async fn add_user_friendships(
        &self,
        user_id: UserId,
        friend_ids: Vec<UserId>,
    ) -> Result<(), Error>;

    /// Replace every field of a user.
    async fn update_user(&self, user_id: UserId, user: User) -> Result<(), Error>;

    /// Delete a user and everything they own.
    async fn delete_user(&self, user_id: UserId) -> Result<(), Error>;

    /// Delete email rows by id.
    async fn delete_emails(&self, email_ids: Vec<EmailId>) -> Result<(), Error>;

    /// Delete friendship pairs given in any orientation.
    async fn delete_friendships(&self, pairs: Vec<(UserId, UserId)>) -> Result<(), Error>;
}

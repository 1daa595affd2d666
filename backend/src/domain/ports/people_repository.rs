//! Driven port for people persistence.
//!
//! Adapters store users, their email addresses, and friendship pairs. Batch
//! mutations are applied as a single statement so each call either lands
//! entirely or fails with one aggregated error.

use async_trait::async_trait;

use crate::domain::{Email, EmailId, Friend, User, UserId, UserInfo};

use super::define_port_error;

define_port_error! {
    /// Errors raised by people repository adapters.
    pub enum PeopleRepositoryError {
        /// The addressed record (or every record of a listing) is absent.
        NotFound { message: String } => "{message}",
        /// The call's arguments cannot be applied, such as an empty batch.
        InvalidInput { message: String } => "{message}",
        /// Repository connection could not be established or was lost.
        Connection { message: String } => "people repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "people repository query failed: {message}",
    }
}

/// Port for people storage and retrieval.
///
/// Listing calls report [`PeopleRepositoryError::NotFound`] instead of an
/// empty collection. Friendship writes and deletes canonicalise pairs so
/// `(a, b)` and `(b, a)` address the same row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    /// Every user with their email addresses, ordered by id.
    async fn get_all_users(&self) -> Result<Vec<UserInfo>, PeopleRepositoryError>;

    /// The lowest-id user with the given last name.
    async fn get_user_by_last_name(
        &self,
        last_name: &str,
    ) -> Result<UserInfo, PeopleRepositoryError>;

    /// Email rows owned by a user, oldest first.
    async fn get_user_emails(&self, user_id: UserId) -> Result<Vec<Email>, PeopleRepositoryError>;

    /// Users linked to `user_id` in either orientation, ordered by id.
    async fn get_user_friends(&self, user_id: UserId)
    -> Result<Vec<Friend>, PeopleRepositoryError>;

    /// Insert a user and return the generated identifier.
    async fn create_user(&self, user: &User) -> Result<UserId, PeopleRepositoryError>;

    /// Attach email addresses to a user, ignoring addresses already stored.
    async fn add_user_emails(
        &self,
        user_id: UserId,
        emails: &[String],
    ) -> Result<(), PeopleRepositoryError>;

    /// Link a user to each friend id, skipping self ids and existing pairs.
    async fn add_user_friendships(
        &self,
        user_id: UserId,
        friend_ids: &[UserId],
    ) -> Result<(), PeopleRepositoryError>;

    /// Replace every field of an existing user.
    async fn update_user(&self, user_id: UserId, user: &User) -> Result<(), PeopleRepositoryError>;

    /// Remove a user together with their emails and friendships.
    async fn delete_user(&self, user_id: UserId) -> Result<(), PeopleRepositoryError>;

    /// Remove email rows by id; unknown ids are ignored.
    async fn delete_emails(&self, email_ids: &[EmailId]) -> Result<(), PeopleRepositoryError>;

    /// Remove friendship pairs given in any orientation.
    async fn delete_friendships(
        &self,
        pairs: &[(UserId, UserId)],
    ) -> Result<(), PeopleRepositoryError>;
}

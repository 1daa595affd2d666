//! Driving port for people read use-cases.
//!
//! Inbound adapters call this port to list users, look them up, and read
//! their emails and friends without touching persistence concerns.

use async_trait::async_trait;

use crate::domain::{Email, Error, Friend, UserId, UserInfo};

/// Domain use-case port for reading people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleQuery: Send + Sync {
    /// Every user with their emails; not-found when there are none.
    async fn get_all_users(&self) -> Result<Vec<UserInfo>, Error>;

    /// The lowest-id user with the given last name.
    async fn get_user_by_last_name(&self, last_name: &str) -> Result<UserInfo, Error>;

    /// A user's email rows; not-found when there are none.
    async fn get_user_emails(&self, user_id: UserId) -> Result<Vec<Email>, Error>;

    /// A user's friends; not-found when there are none.
    async fn get_user_friends(&self, user_id: UserId) -> Result<Vec<Friend>, Error>;
}

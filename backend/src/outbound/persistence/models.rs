//! Internal Diesel row structs for the people tables.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types live here so the repository only deals with queries.

use diesel::prelude::*;

use crate::domain::ports::PeopleRepositoryError;
use crate::domain::{Email, EmailId, Friend, User, UserId};

use super::schema::{emails, friends, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub nationality: String,
    pub age: i32,
}

/// Insertable and changeset struct for user records.
///
/// Updates replace every column, matching the full-row update contract.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWriteRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub gender: &'a str,
    pub nationality: &'a str,
    pub age: i32,
}

impl<'a> From<&'a User> for UserWriteRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            gender: user.gender.as_str(),
            nationality: user.nationality.as_str(),
            age: i32::from(user.age),
        }
    }
}

/// Row struct for reading from the emails table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = emails)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmailRow {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
}

/// Insertable struct for new email rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = emails)]
pub(crate) struct NewEmailRow<'a> {
    pub user_id: i64,
    pub email: &'a str,
}

/// Row struct for the friends table, used for reads and inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = friends)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendshipRow {
    pub id_first_friend: i64,
    pub id_second_friend: i64,
}

/// Projection of a user row used for friend listings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendSummaryRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Convert a stored identifier into a domain id.
///
/// `BIGSERIAL` never yields negative values, so a negative id means the
/// table was written outside this service.
pub(crate) fn stored_id(id: i64, column: &str) -> Result<u64, PeopleRepositoryError> {
    u64::try_from(id)
        .map_err(|_| PeopleRepositoryError::query(format!("negative {column} in storage: {id}")))
}

/// Convert a domain identifier into a storage key.
///
/// Returns `None` for ids above `i64::MAX`, which cannot exist in storage.
pub(crate) fn storage_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

impl UserRow {
    /// Split the row into its id and the domain user.
    pub(crate) fn into_domain(self) -> Result<(UserId, User), PeopleRepositoryError> {
        let Self {
            id,
            first_name,
            last_name,
            gender,
            nationality,
            age,
        } = self;
        let age = u8::try_from(age)
            .map_err(|_| PeopleRepositoryError::query(format!("age out of range: {age}")))?;
        Ok((
            UserId::new(stored_id(id, "users.id")?),
            User {
                first_name,
                last_name,
                gender,
                nationality,
                age,
            },
        ))
    }
}

impl TryFrom<EmailRow> for Email {
    type Error = PeopleRepositoryError;

    fn try_from(row: EmailRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmailId::new(stored_id(row.id, "emails.id")?),
            user_id: UserId::new(stored_id(row.user_id, "emails.user_id")?),
            email: row.email,
        })
    }
}

impl TryFrom<FriendSummaryRow> for Friend {
    type Error = PeopleRepositoryError;

    fn try_from(row: FriendSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            friend_id: UserId::new(stored_id(row.id, "users.id")?),
            first_name: row.first_name,
            last_name: row.last_name,
        })
    }
}

//! PostgreSQL-backed `PeopleRepository` implementation using Diesel ORM.
//!
//! Every batch mutation is one SQL statement, so a call either lands
//! completely or fails with a single error. Friendship pairs are
//! canonicalised by the domain before they reach SQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, BigInt};
use diesel_async::{AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection};
use tracing::{debug, warn};

use crate::domain::ports::{PeopleRepository, PeopleRepositoryError};
use crate::domain::{
    CanonicalPairs, Email, EmailId, Friend, FriendshipPair, User, UserId, UserInfo,
    canonical_pairs, friendships_for, normalise_email_addresses,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    EmailRow, FriendSummaryRow, FriendshipRow, NewEmailRow, UserRow, UserWriteRow, storage_id,
};
use super::pool::DbPool;
use super::schema::{emails, friends, users};

/// Schema bootstrap executed by [`DieselPeopleRepository::ensure_schema`].
const SCHEMA_SQL: &str = include_str!("../../../migrations/2025-01-20-000000_create_people/up.sql");

const DELETE_FRIENDSHIPS_SQL: &str = r#"
DELETE FROM friends
WHERE (id_first_friend, id_second_friend) IN (
    SELECT * FROM UNNEST($1::bigint[], $2::bigint[])
)
"#;

/// Diesel-backed implementation of the people repository port.
#[derive(Clone)]
pub struct DieselPeopleRepository {
    pool: DbPool,
}

impl DieselPeopleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the people tables and indexes when they are missing.
    ///
    /// Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns a connection error when no connection can be checked out and
    /// a query error when the DDL batch fails.
    pub async fn ensure_schema(&self) -> Result<(), PeopleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.batch_execute(SCHEMA_SQL)
            .await
            .map_err(map_diesel_error)?;
        debug!("people schema ensured");
        Ok(())
    }
}

fn user_not_found(user_id: UserId) -> PeopleRepositoryError {
    PeopleRepositoryError::not_found(format!("user {user_id} not found"))
}

/// Storage key for an id addressed by a lookup, update or delete.
fn lookup_key(user_id: UserId) -> Result<i64, PeopleRepositoryError> {
    storage_id(user_id.get()).ok_or_else(|| user_not_found(user_id))
}

/// Storage key for an id carried inside a batch write.
fn batch_key(id: u64, what: &str) -> Result<i64, PeopleRepositoryError> {
    storage_id(id)
        .ok_or_else(|| PeopleRepositoryError::invalid_input(format!("{what} {id} is out of range")))
}

fn pair_row(pair: FriendshipPair) -> Result<FriendshipRow, PeopleRepositoryError> {
    Ok(FriendshipRow {
        id_first_friend: batch_key(pair.low().get(), "user id")?,
        id_second_friend: batch_key(pair.high().get(), "user id")?,
    })
}

fn log_skipped_self_pairs(pairs: &CanonicalPairs, operation: &'static str) {
    if pairs.skipped_self_pairs > 0 {
        warn!(
            operation,
            skipped = pairs.skipped_self_pairs,
            "ignoring self friendship"
        );
    }
}

/// Group `(user, email)` rows, ordered by user id then email id, into read
/// models.
fn group_user_rows(
    rows: Vec<(UserRow, Option<String>)>,
) -> Result<Vec<UserInfo>, PeopleRepositoryError> {
    let mut infos: Vec<UserInfo> = Vec::new();
    for (row, email) in rows {
        let row_id = row.id;
        let same_user = infos
            .last()
            .is_some_and(|info| storage_id(info.id.get()) == Some(row_id));
        if !same_user {
            let (id, user) = row.into_domain()?;
            infos.push(UserInfo {
                id,
                user,
                emails: Vec::new(),
            });
        }
        if let (Some(email), Some(info)) = (email, infos.last_mut()) {
            info.emails.push(email);
        }
    }
    Ok(infos)
}

async fn load_user_infos(
    conn: &mut AsyncPgConnection,
    last_name: Option<&str>,
) -> Result<Vec<UserInfo>, PeopleRepositoryError> {
    let mut query = users::table
        .left_join(emails::table)
        .select((UserRow::as_select(), emails::email.nullable()))
        .order((users::id.asc(), emails::id.asc()))
        .into_boxed::<diesel::pg::Pg>();
    if let Some(last_name) = last_name {
        query = query.filter(users::last_name.eq(last_name));
    }

    let rows: Vec<(UserRow, Option<String>)> =
        query.load(conn).await.map_err(map_diesel_error)?;
    group_user_rows(rows)
}

#[async_trait]
impl PeopleRepository for DieselPeopleRepository {
    async fn get_all_users(&self) -> Result<Vec<UserInfo>, PeopleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let infos = load_user_infos(&mut conn, None).await?;
        if infos.is_empty() {
            return Err(PeopleRepositoryError::not_found("no users found"));
        }
        Ok(infos)
    }

    async fn get_user_by_last_name(
        &self,
        last_name: &str,
    ) -> Result<UserInfo, PeopleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user_infos(&mut conn, Some(last_name))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PeopleRepositoryError::not_found(format!(
                    "no user with last name {last_name:?}"
                ))
            })
    }

    async fn get_user_emails(&self, user_id: UserId) -> Result<Vec<Email>, PeopleRepositoryError> {
        let key = lookup_key(user_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EmailRow> = emails::table
            .filter(emails::user_id.eq(key))
            .order(emails::id.asc())
            .select(EmailRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Err(PeopleRepositoryError::not_found(format!(
                "no emails for user {user_id}"
            )));
        }

        rows.into_iter().map(Email::try_from).collect()
    }

    async fn get_user_friends(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Friend>, PeopleRepositoryError> {
        let key = lookup_key(user_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let linked = friends::id_first_friend
            .eq(key)
            .and(friends::id_second_friend.eq(users::id))
            .or(friends::id_second_friend
                .eq(key)
                .and(friends::id_first_friend.eq(users::id)));
        let rows: Vec<FriendSummaryRow> = users::table
            .inner_join(friends::table.on(linked))
            .order(users::id.asc())
            .select(FriendSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Err(PeopleRepositoryError::not_found(format!(
                "no friends for user {user_id}"
            )));
        }

        rows.into_iter().map(Friend::try_from).collect()
    }

    async fn create_user(&self, user: &User) -> Result<UserId, PeopleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(users::table)
            .values(UserWriteRow::from(user))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(id)
            .map(UserId::new)
            .map_err(|_| PeopleRepositoryError::query(format!("negative user id returned: {id}")))
    }

    async fn add_user_emails(
        &self,
        user_id: UserId,
        emails: &[String],
    ) -> Result<(), PeopleRepositoryError> {
        let addresses = normalise_email_addresses(emails);
        if addresses.is_empty() {
            return Err(PeopleRepositoryError::invalid_input(
                "emails must contain at least one address",
            ));
        }
        let key = batch_key(user_id.get(), "user id")?;
        let rows: Vec<NewEmailRow<'_>> = addresses
            .iter()
            .map(|email| NewEmailRow {
                user_id: key,
                email: email.as_str(),
            })
            .collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(emails::table)
            .values(&rows)
            .on_conflict(emails::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(%user_id, requested = rows.len(), inserted, "emails stored");
        Ok(())
    }

    async fn add_user_friendships(
        &self,
        user_id: UserId,
        friend_ids: &[UserId],
    ) -> Result<(), PeopleRepositoryError> {
        if friend_ids.is_empty() {
            return Err(PeopleRepositoryError::invalid_input(
                "friend ids must not be empty",
            ));
        }
        let pairs = friendships_for(user_id, friend_ids.iter().copied());
        log_skipped_self_pairs(&pairs, "add_user_friendships");
        if pairs.pairs.is_empty() {
            return Ok(());
        }
        let rows = pairs
            .pairs
            .into_iter()
            .map(pair_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(friends::table)
            .values(&rows)
            .on_conflict((friends::id_first_friend, friends::id_second_friend))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(%user_id, requested = rows.len(), inserted, "friendships stored");
        Ok(())
    }

    async fn update_user(&self, user_id: UserId, user: &User) -> Result<(), PeopleRepositoryError> {
        let key = lookup_key(user_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.find(key))
            .set(UserWriteRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), PeopleRepositoryError> {
        let key = lookup_key(user_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn delete_emails(&self, email_ids: &[EmailId]) -> Result<(), PeopleRepositoryError> {
        if email_ids.is_empty() {
            return Err(PeopleRepositoryError::invalid_input(
                "email ids must not be empty",
            ));
        }
        let keys = email_ids
            .iter()
            .map(|id| batch_key(id.get(), "email id"))
            .collect::<Result<Vec<_>, _>>()?;

        let requested = keys.len();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(emails::table.filter(emails::id.eq_any(keys)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(requested, deleted, "emails deleted");
        Ok(())
    }

    async fn delete_friendships(
        &self,
        pairs: &[(UserId, UserId)],
    ) -> Result<(), PeopleRepositoryError> {
        if pairs.is_empty() {
            return Err(PeopleRepositoryError::invalid_input(
                "friendship pairs must not be empty",
            ));
        }
        let canonical = canonical_pairs(pairs.iter().copied());
        log_skipped_self_pairs(&canonical, "delete_friendships");
        if canonical.pairs.is_empty() {
            return Ok(());
        }
        let rows = canonical
            .pairs
            .into_iter()
            .map(pair_row)
            .collect::<Result<Vec<_>, _>>()?;
        let (lows, highs): (Vec<i64>, Vec<i64>) = rows
            .iter()
            .map(|row| (row.id_first_friend, row.id_second_friend))
            .unzip();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = sql_query(DELETE_FRIENDSHIPS_SQL)
            .bind::<Array<BigInt>, _>(&lows)
            .bind::<Array<BigInt>, _>(&highs)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(requested = rows.len(), deleted, "friendships deleted");
        Ok(())
    }
}

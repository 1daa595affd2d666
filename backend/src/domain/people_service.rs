//! People domain service.
//!
//! Implements the driving ports on top of the repository and enrichment
//! ports. Creation runs the three lookups concurrently and stores nothing
//! unless all of them succeed; every other operation forwards to the
//! repository and translates its errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    EnrichmentSource, EnrichmentSourceError, PeopleCommand, PeopleQuery, PeopleRepository,
    PeopleRepositoryError,
};
use crate::domain::{
    Email, EmailId, Error, Friend, PersonName, User, UserId, UserInfo, UserValidationError,
};

/// Which enrichment lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Age,
    Gender,
    Nationality,
}

impl Lookup {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
        }
    }
}

/// People service implementing [`PeopleQuery`] and [`PeopleCommand`].
#[derive(Clone)]
pub struct PeopleService<R, E> {
    repository: Arc<R>,
    enrichment: Arc<E>,
}

impl<R, E> PeopleService<R, E> {
    /// Create a new service over the given adapters.
    pub fn new(repository: Arc<R>, enrichment: Arc<E>) -> Self {
        Self {
            repository,
            enrichment,
        }
    }
}

impl<R, E> PeopleService<R, E>
where
    R: PeopleRepository,
    E: EnrichmentSource,
{
    fn map_repository_error(operation: &'static str, error: PeopleRepositoryError) -> Error {
        match error {
            PeopleRepositoryError::NotFound { message } => {
                debug!(operation, %message, "people record not found");
                Error::not_found(message)
            }
            PeopleRepositoryError::InvalidInput { message } => {
                warn!(operation, %message, "people repository rejected input");
                Error::invalid_request(message)
            }
            PeopleRepositoryError::Connection { message } => {
                error!(operation, %message, "people repository unavailable");
                Error::internal(format!("people repository unavailable: {message}"))
            }
            PeopleRepositoryError::Query { message } => {
                error!(operation, %message, "people repository query failed");
                Error::internal(format!("people repository error: {message}"))
            }
        }
    }

    fn map_enrichment_error(lookup: Lookup, name: &str, error: EnrichmentSourceError) -> Error {
        let lookup_name = lookup.as_str();
        if let EnrichmentSourceError::NoEstimate { .. } = error {
            warn!(lookup = lookup_name, name, "enrichment returned no estimate");
            return Error::not_found(format!("{lookup_name} not found")).with_details(json!({
                "lookup": lookup_name,
                "code": "no_estimate",
            }));
        }

        error!(lookup = lookup_name, name, error = %error, "enrichment lookup failed");
        Error::enrichment_failed(format!("{lookup_name} lookup failed")).with_details(json!({
            "lookup": lookup_name,
        }))
    }

    fn map_validation_error(error: &UserValidationError) -> Error {
        match error {
            UserValidationError::EmptyFirstName => Error::invalid_request(error.to_string())
                .with_details(json!({ "field": "first_name", "code": "empty_first_name" })),
        }
    }

    async fn enrich(&self, name: &PersonName) -> Result<User, Error> {
        let first_name = name.first_name();
        let source = self.enrichment.as_ref();

        // The first failure to complete is reported and drops the remaining
        // lookups. Failures ready in the same poll resolve in declaration order.
        let (age, gender, nationality) = tokio::try_join!(
            async {
                source
                    .age(first_name)
                    .await
                    .map_err(|err| Self::map_enrichment_error(Lookup::Age, first_name, err))
            },
            async {
                source
                    .gender(first_name)
                    .await
                    .map_err(|err| Self::map_enrichment_error(Lookup::Gender, first_name, err))
            },
            async {
                source.nationality(first_name).await.map_err(|err| {
                    Self::map_enrichment_error(Lookup::Nationality, first_name, err)
                })
            },
        )?;

        Ok(User {
            first_name: first_name.to_owned(),
            last_name: name.last_name().to_owned(),
            gender,
            nationality,
            age,
        })
    }
}

#[async_trait]
impl<R, E> PeopleQuery for PeopleService<R, E>
where
    R: PeopleRepository,
    E: EnrichmentSource,
{
    async fn get_all_users(&self) -> Result<Vec<UserInfo>, Error> {
        self.repository
            .get_all_users()
            .await
            .map_err(|err| Self::map_repository_error("get_all_users", err))
    }

    async fn get_user_by_last_name(&self, last_name: &str) -> Result<UserInfo, Error> {
        self.repository
            .get_user_by_last_name(last_name)
            .await
            .map_err(|err| Self::map_repository_error("get_user_by_last_name", err))
    }

    async fn get_user_emails(&self, user_id: UserId) -> Result<Vec<Email>, Error> {
        self.repository
            .get_user_emails(user_id)
            .await
            .map_err(|err| Self::map_repository_error("get_user_emails", err))
    }

    async fn get_user_friends(&self, user_id: UserId) -> Result<Vec<Friend>, Error> {
        self.repository
            .get_user_friends(user_id)
            .await
            .map_err(|err| Self::map_repository_error("get_user_friends", err))
    }
}

#[async_trait]
impl<R, E> PeopleCommand for PeopleService<R, E>
where
    R: PeopleRepository,
    E: EnrichmentSource,
{
    async fn create_user(&self, name: PersonName) -> Result<UserId, Error> {
        let user = self.enrich(&name).await?;
        let user_id = self
            .repository
            .create_user(&user)
            .await
            .map_err(|err| Self::map_repository_error("create_user", err))?;
        info!(%user_id, nationality = %user.nationality, "user created");
        Ok(user_id)
    }

    async fn add_user_emails(&self, user_id: UserId, emails: Vec<String>) -> Result<(), Error> {
        if emails.is_empty() {
            return Err(Error::invalid_request("emails must not be empty"));
        }
        self.repository
            .add_user_emails(user_id, &emails)
            .await
            .map_err(|err| Self::map_repository_error("add_user_emails", err))
    }

    async fn add_user_friendships(
        &self,
        user_id: UserId,
        friend_ids: Vec<UserId>,
    ) -> Result<(), Error> {
        if friend_ids.is_empty() {
            return Err(Error::invalid_request("friends_ids must not be empty"));
        }
        self.repository
            .add_user_friendships(user_id, &friend_ids)
            .await
            .map_err(|err| Self::map_repository_error("add_user_friendships", err))
    }

    async fn update_user(&self, user_id: UserId, user: User) -> Result<(), Error> {
        user.validate()
            .map_err(|err| Self::map_validation_error(&err))?;
        self.repository
            .update_user(user_id, &user)
            .await
            .map_err(|err| Self::map_repository_error("update_user", err))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), Error> {
        self.repository
            .delete_user(user_id)
            .await
            .map_err(|err| Self::map_repository_error("delete_user", err))
    }

    async fn delete_emails(&self, email_ids: Vec<EmailId>) -> Result<(), Error> {
        if email_ids.is_empty() {
            return Err(Error::invalid_request("ids must not be empty"));
        }
        self.repository
            .delete_emails(&email_ids)
            .await
            .map_err(|err| Self::map_repository_error("delete_emails", err))
    }

    async fn delete_friendships(&self, pairs: Vec<(UserId, UserId)>) -> Result<(), Error> {
        if pairs.is_empty() {
            return Err(Error::invalid_request("friends must not be empty"));
        }
        self.repository
            .delete_friendships(&pairs)
            .await
            .map_err(|err| Self::map_repository_error("delete_friendships", err))
    }
}

#[cfg(test)]
#[path = "people_service_tests.rs"]
mod tests;

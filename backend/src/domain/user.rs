//! People data model: users, their email addresses, and friend summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised while building user data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The first name was blank.
    #[error("first name must not be empty")]
    EmptyFirstName,
}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage-assigned email row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(u64);

impl EmailId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name supplied when creating a user; the rest is derived by enrichment.
///
/// ## Invariants
/// - `first_name` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first_name: String,
    last_name: String,
}

impl PersonName {
    /// Validate and construct a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyFirstName`] when the first name is
    /// blank.
    ///
    /// # Examples
    /// ```
    /// use people::domain::PersonName;
    ///
    /// let name = PersonName::new(" Alice ", "Smith").expect("valid name");
    /// assert_eq!(name.first_name(), "Alice");
    /// assert!(PersonName::new("  ", "Smith").is_err());
    /// ```
    pub fn new(
        first_name: impl AsRef<str>,
        last_name: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.as_ref().trim();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.as_ref().trim().to_owned(),
        })
    }

    /// First name used as the enrichment key.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Last name stored verbatim.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}

/// A person record without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Given name; never blank.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Gender estimate, as reported by enrichment or set on update.
    pub gender: String,
    /// Country code, as reported by enrichment or set on update.
    pub nationality: String,
    /// Age in years.
    pub age: u8,
}

impl User {
    /// Check the record's invariants before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyFirstName`] when the first name is
    /// blank.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        Ok(())
    }
}

/// Read model combining a user with their email addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User identifier.
    pub id: UserId,
    /// User fields.
    pub user: User,
    /// Email addresses owned by the user, oldest first. Empty, never absent.
    pub emails: Vec<String>,
}

/// One stored email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Email row identifier.
    pub id: EmailId,
    /// Owning user.
    pub user_id: UserId,
    /// The address, trimmed of surrounding whitespace.
    pub email: String,
}

/// Summary of a user linked by a friendship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// The friend's user identifier.
    pub friend_id: UserId,
    /// The friend's first name.
    pub first_name: String,
    /// The friend's last name.
    pub last_name: String,
}

/// Trim addresses, drop blanks, and collapse duplicates keeping first-seen
/// order.
///
/// # Examples
/// ```
/// use people::domain::normalise_email_addresses;
///
/// let cleaned = normalise_email_addresses([" a@x.io ", "b@x.io", "a@x.io", " "]);
/// assert_eq!(cleaned, vec!["a@x.io".to_owned(), "b@x.io".to_owned()]);
/// ```
pub fn normalise_email_addresses<I, S>(addresses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for address in addresses {
        let trimmed = address.as_ref().trim();
        if trimmed.is_empty() || cleaned.iter().any(|seen| seen == trimmed) {
            continue;
        }
        cleaned.push(trimmed.to_owned());
    }
    cleaned
}

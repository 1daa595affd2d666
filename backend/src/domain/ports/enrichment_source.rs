//! Driven port for name-keyed enrichment lookups.
//!
//! Three independent services estimate a person's age, gender, and
//! nationality from their first name. The domain owns the contract so the
//! creation workflow stays adapter-agnostic.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling an enrichment service.
    pub enum EnrichmentSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } => "enrichment transport failed: {message}",
        /// The call exceeded the client timeout.
        Timeout { message: String } => "enrichment timeout: {message}",
        /// The service answered with a non-success status.
        Status { message: String } => "enrichment service rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "enrichment response decode failed: {message}",
        /// The service answered but had no estimate for the name.
        NoEstimate { lookup: String } => "no {lookup} estimate for this name",
    }
}

/// Port for the age, gender, and nationality lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    /// Estimated age for a first name.
    async fn age(&self, name: &str) -> Result<u8, EnrichmentSourceError>;

    /// Estimated gender for a first name.
    async fn gender(&self, name: &str) -> Result<String, EnrichmentSourceError>;

    /// Most probable country code for a first name.
    ///
    /// # Examples
    ///
    /// ```
    /// use people::domain::ports::{EnrichmentSource, FixtureEnrichmentSource};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let country = FixtureEnrichmentSource.nationality("Alice").await?;
    /// assert_eq!(country, "US");
    /// # Ok::<(), people::domain::ports::EnrichmentSourceError>(())
    /// # }).unwrap();
    /// ```
    async fn nationality(&self, name: &str) -> Result<String, EnrichmentSourceError>;
}

/// Fixture returning fixed estimates for every name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEnrichmentSource;

#[async_trait]
impl EnrichmentSource for FixtureEnrichmentSource {
    async fn age(&self, _name: &str) -> Result<u8, EnrichmentSourceError> {
        Ok(30)
    }

    async fn gender(&self, _name: &str) -> Result<String, EnrichmentSourceError> {
        Ok("female".to_owned())
    }

    async fn nationality(&self, _name: &str) -> Result<String, EnrichmentSourceError> {
        Ok("US".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_returns_fixed_estimates() {
        let source = FixtureEnrichmentSource;
        assert_eq!(source.age("Alice").await, Ok(30));
        assert_eq!(source.gender("Alice").await.as_deref(), Ok("female"));
        assert_eq!(source.nationality("Alice").await.as_deref(), Ok("US"));
    }

    #[test]
    fn no_estimate_names_the_lookup() {
        let error = EnrichmentSourceError::no_estimate("nationality");
        assert_eq!(error.to_string(), "no nationality estimate for this name");
    }
}

//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered CLI flags over `PEOPLE_*` environment variables over an
//! optional configuration file. Every connection setting is required; only the
//! enrichment timeout and pool size have defaults.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::enrichment::EnrichmentEndpoints;
use crate::outbound::persistence::PoolConfig;

/// Problems found while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// An enrichment URL is not an absolute URL.
    #[error("{field} is not a valid absolute URL: {message}")]
    InvalidUrl { field: &'static str, message: String },
    /// The listen address could not be resolved.
    #[error("cannot resolve listen address {address}: {message}")]
    BindAddress { address: String, message: String },
    /// The database fields do not form a valid connection URL.
    #[error("invalid database connection settings: {message}")]
    DatabaseUrl { message: String },
}

/// Settings for the people service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEOPLE")]
pub struct AppSettings {
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Database URL scheme, normally `postgres`.
    pub db_driver: String,
    /// Database role name.
    pub db_user: String,
    /// Database role password.
    pub db_password: String,
    /// Database host name.
    pub db_host: String,
    /// Database port.
    pub db_port: u16,
    /// Database name.
    pub db_name: String,
    /// Base URL of the age estimation service.
    pub age_url: String,
    /// Base URL of the gender estimation service.
    pub gender_url: String,
    /// Base URL of the nationality estimation service.
    pub nationality_url: String,
    /// Per-request timeout for enrichment lookups, in seconds.
    #[ortho_config(default = 10)]
    pub enrichment_timeout_secs: u64,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_max_size: u32,
    /// How long to wait for a pooled connection, in seconds.
    #[ortho_config(default = 30)]
    pub db_connect_timeout_secs: u64,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_driver", &self.db_driver)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("age_url", &self.age_url)
            .field("gender_url", &self.gender_url)
            .field("nationality_url", &self.nationality_url)
            .field("enrichment_timeout_secs", &self.enrichment_timeout_secs)
            .field("db_pool_max_size", &self.db_pool_max_size)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .finish()
    }
}

impl AppSettings {
    /// Assemble `<driver>://<user>:<password>@<host>:<port>/<name>`.
    ///
    /// Credentials and the database name are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DatabaseUrl`] when the driver or host do not
    /// form a URL that can carry credentials.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let invalid = |message: &str| SettingsError::DatabaseUrl {
            message: message.to_owned(),
        };
        let mut url = Url::parse(&format!(
            "{}://{}:{}/",
            self.db_driver, self.db_host, self.db_port
        ))
        .map_err(|err| invalid(&err.to_string()))?;
        url.set_username(&self.db_user)
            .map_err(|()| invalid("URL cannot carry a user name"))?;
        url.set_password(Some(&self.db_password))
            .map_err(|()| invalid("URL cannot carry a password"))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot carry a database name"))?
            .pop_if_empty()
            .push(&self.db_name);
        Ok(url.into())
    }

    /// Pool settings derived from the database fields.
    ///
    /// # Errors
    ///
    /// Propagates [`SettingsError::DatabaseUrl`] from [`Self::database_url`].
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_pool_max_size)
            .with_connection_timeout(Duration::from_secs(self.db_connect_timeout_secs)))
    }

    /// Resolve `host:port` into the first matching socket address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when the host does not resolve.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let address = format!("{}:{}", self.host, self.port);
        let bind_error = |message: String| SettingsError::BindAddress {
            address: address.clone(),
            message,
        };
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|err| bind_error(err.to_string()))?
            .next()
            .ok_or_else(|| bind_error("no addresses found".to_owned()))
    }

    /// Timeout applied to every enrichment request.
    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }

    /// Parse the three enrichment base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] naming the first URL that is not
    /// absolute.
    pub fn enrichment_endpoints(&self) -> Result<EnrichmentEndpoints, SettingsError> {
        Ok(EnrichmentEndpoints {
            age: parse_url("age_url", &self.age_url)?,
            gender: parse_url("gender_url", &self.gender_url)?,
            nationality: parse_url("nationality_url", &self.nationality_url)?,
        })
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::InvalidUrl {
        field,
        message: err.to_string(),
    })
}

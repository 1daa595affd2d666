//! Reqwest-backed enrichment source adapter.
//!
//! This adapter owns transport details only: building the `?name=` query,
//! timeout and HTTP error mapping, and JSON decoding of the three estimate
//! payloads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{AgeDto, GenderDto, NationalityDto};
use crate::domain::ports::{EnrichmentSource, EnrichmentSourceError};

/// Base URLs of the three estimation services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentEndpoints {
    /// Age estimation service.
    pub age: Url,
    /// Gender estimation service.
    pub gender: Url,
    /// Nationality estimation service.
    pub nationality: Url,
}

/// Enrichment adapter that issues HTTP GET requests through one shared client.
#[derive(Debug, Clone)]
pub struct HttpEnrichmentSource {
    client: Client,
    endpoints: EnrichmentEndpoints,
}

impl HttpEnrichmentSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: EnrichmentEndpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    async fn fetch<T>(&self, endpoint: &Url, name: &str) -> Result<T, EnrichmentSourceError>
    where
        T: DeserializeOwned,
    {
        let url = lookup_url(endpoint, name);
        debug!(url = %url, "requesting enrichment estimate");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        decode(body.as_ref())
    }
}

#[async_trait]
impl EnrichmentSource for HttpEnrichmentSource {
    async fn age(&self, name: &str) -> Result<u8, EnrichmentSourceError> {
        let dto: AgeDto = self.fetch(&self.endpoints.age, name).await?;
        dto.age
            .ok_or_else(|| EnrichmentSourceError::no_estimate("age"))
    }

    async fn gender(&self, name: &str) -> Result<String, EnrichmentSourceError> {
        let dto: GenderDto = self.fetch(&self.endpoints.gender, name).await?;
        dto.gender
            .ok_or_else(|| EnrichmentSourceError::no_estimate("gender"))
    }

    async fn nationality(&self, name: &str) -> Result<String, EnrichmentSourceError> {
        let dto: NationalityDto = self.fetch(&self.endpoints.nationality, name).await?;
        dto.most_probable()
            .ok_or_else(|| EnrichmentSourceError::no_estimate("nationality"))
    }
}

/// Append the URL-encoded `name` query parameter to a service base URL.
fn lookup_url(endpoint: &Url, name: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("name", name);
    url
}

fn decode<T>(body: &[u8]) -> Result<T, EnrichmentSourceError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        EnrichmentSourceError::decode(format!(
            "invalid enrichment JSON payload: {error}; body: {}",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> EnrichmentSourceError {
    if error.is_timeout() {
        EnrichmentSourceError::timeout(error.to_string())
    } else {
        EnrichmentSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EnrichmentSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            EnrichmentSourceError::timeout(message)
        }
        _ => EnrichmentSourceError::status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() <= PREVIEW_CHAR_LIMIT {
        return compact;
    }
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    format!("{preview}...")
}

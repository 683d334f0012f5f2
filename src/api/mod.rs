pub mod types;

pub use types::{Contributor, Issue, Label, Repository};

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

pub const REPOSITORIES_RESOURCE: &str = "/repo";
pub const CONTRIBUTORS_RESOURCE: &str = "/contrib";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed response from {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the board gets its snapshot from.
/// Implementations must be Send + Sync so both lists can be fetched concurrently.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable name of this source, used in logs
    fn name(&self) -> &str;

    async fn repositories(&self) -> Result<Vec<Repository>, ApiError>;

    async fn contributors(&self) -> Result<Vec<Contributor>, ApiError>;
}

/// Response bodies memoized by resource path for the lifetime of one run.
///
/// No expiry. If two fetches of the same resource race, the last one to
/// finish wins, which is fine for read-only data.
#[derive(Debug, Default)]
pub struct FetchCache {
    bodies: Mutex<HashMap<String, String>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, resource: &str) -> Option<String> {
        self.bodies
            .lock()
            .ok()
            .and_then(|bodies| bodies.get(resource).cloned())
    }

    pub fn insert(&self, resource: &str, body: String) {
        if let Ok(mut bodies) = self.bodies.lock() {
            bodies.insert(resource.to_string(), body);
        }
    }
}

/// Fetches the snapshot from the backend over HTTP.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
    cache: FetchCache,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            cache: FetchCache::new(),
        })
    }

    /// Absolute URL of a resource under the base URL.
    pub fn resource_url(&self, resource: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(resource)
            .map_err(|_| ApiError::InvalidUrl(format!("{}{}", self.base_url, resource)))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T, ApiError> {
        let body = match self.cache.get(resource) {
            Some(body) => {
                debug!("serving response from fetch cache");
                body
            }
            None => {
                let url = self.resource_url(resource)?;
                debug!(%url, "fetching from API");
                let body = self
                    .client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                debug!(bytes = body.len(), "received response");
                self.cache.insert(resource, body.clone());
                body
            }
        };

        decode(resource, &body)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn repositories(&self) -> Result<Vec<Repository>, ApiError> {
        self.fetch(REPOSITORIES_RESOURCE).await
    }

    async fn contributors(&self) -> Result<Vec<Contributor>, ApiError> {
        self.fetch(CONTRIBUTORS_RESOURCE).await
    }
}

/// Built-in sample snapshot, so the board can run without a backend.
pub struct FixtureSource;

impl FixtureSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn repositories(&self) -> Result<Vec<Repository>, ApiError> {
        decode(
            REPOSITORIES_RESOURCE,
            include_str!("../../tests/fixtures/repositories.json"),
        )
    }

    async fn contributors(&self) -> Result<Vec<Contributor>, ApiError> {
        decode(
            CONTRIBUTORS_RESOURCE,
            include_str!("../../tests/fixtures/contributors.json"),
        )
    }
}

fn decode<T: DeserializeOwned>(resource: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        resource: resource.to_string(),
        source,
    })
}

/// Drop automated accounts, recognised by `bot_marker` in their name.
pub fn exclude_bots(contributors: Vec<Contributor>, bot_marker: &str) -> Vec<Contributor> {
    contributors
        .into_iter()
        .filter(|contributor| !contributor.full_name.contains(bot_marker))
        .collect()
}

/// Fetch repositories and contributors concurrently. Bots are removed from
/// the contributor list before it is returned.
#[instrument(skip(source), fields(source = source.name()))]
pub async fn fetch_snapshot(
    source: &dyn DataSource,
    bot_marker: &str,
) -> Result<(Vec<Repository>, Vec<Contributor>), ApiError> {
    let (repositories, contributors) = tokio::join!(source.repositories(), source.contributors());
    let repositories = repositories?;
    let contributors = exclude_bots(contributors?, bot_marker);
    debug!(
        repositories = repositories.len(),
        contributors = contributors.len(),
        "fetched snapshot"
    );
    Ok((repositories, contributors))
}

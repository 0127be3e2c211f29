//! Country list retrieval, sort/filter derivation and the browser state machine.

use async_trait::async_trait;
use reqwest::Client;
use shared::{CountryRecord, FetchError};
use tracing::{debug, info, warn};

pub mod browser;
pub mod config;
pub mod presenter;
pub mod view_state;

pub use browser::{BrowserError, BrowserPhase, CountryBrowser};
pub use config::{load_settings, Settings, DEFAULT_COUNTRIES_URL};
pub use presenter::{present, BorderHighlight, BrowserView, CardClickHook, CardView, LoadedView};
pub use view_state::{Catalog, ParseActionError, ViewAction, ViewState};

/// Where the country collection comes from. Called once per browser session.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, FetchError>;
}

/// Issues a single unauthenticated `GET` against a REST Countries style endpoint.
///
/// No timeout, retry or pagination is applied: a hung endpoint keeps the
/// caller waiting.
#[derive(Debug, Clone)]
pub struct CountryClient {
    http: Client,
    countries_url: String,
}

impl CountryClient {
    pub fn new(countries_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), countries_url)
    }

    pub fn with_http_client(http: Client, countries_url: impl Into<String>) -> Self {
        Self {
            http,
            countries_url: countries_url.into(),
        }
    }

    pub fn countries_url(&self) -> &str {
        &self.countries_url
    }
}

#[async_trait]
impl CountrySource for CountryClient {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        info!(url = %self.countries_url, "fetching country list");
        let response = self
            .http
            .get(&self.countries_url)
            .send()
            .await
            .map_err(|err| {
                FetchError::transport(format!("failed to reach {}: {err}", self.countries_url))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "country endpoint returned error status");
            return Err(FetchError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::transport(format!("failed to read response body: {err}")))?;
        let countries: Vec<CountryRecord> = serde_json::from_slice(&body)?;
        debug!(count = countries.len(), "decoded country list");
        Ok(countries)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

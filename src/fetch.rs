use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};
use crate::model::StatType;

/// A raw origin page, before normalization.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub html: String,
    pub url: String,
    pub fetched_at: DateTime<Utc>,
}

/// Origin-specific query descriptor for a single page fetch.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum SourceQuery {
    /// A team's roster page with the given stat table variant.
    Roster { team: String, stat_type: StatType },
}

impl SourceQuery {
    /// Build the origin URL for this query under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        match self {
            SourceQuery::Roster { team, stat_type } => {
                format!("{base_url}/team/{team}/roster?stats={stat_type}")
            }
        }
    }
}

/// Capability interface for retrieving raw pages from the origin site.
///
/// The query service depends only on this trait; the shipped implementation
/// is plain HTTP, and a headless-browser-backed variant can be swapped in
/// behind the same contract.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve the page for `query`. Exactly one origin session per call.
    async fn fetch(&self, query: &SourceQuery) -> ScrapeResult<RawPage>;

    /// Lightweight reachability probe of the origin, bounded by a short
    /// timeout. Used by the health endpoint.
    async fn probe(&self) -> bool;
}

/// HTTP-backed fetcher over a configured [`reqwest::Client`].
pub struct HttpFetcher {
    http: reqwest::Client,
    probe_http: reqwest::Client,
    base_url: String,
    retries: u32,
    retry_backoff: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from configuration. Fails only if the underlying
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("statline/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        let probe_http = reqwest::Client::builder()
            .user_agent(concat!("statline/", env!("CARGO_PKG_VERSION")))
            .timeout(config.probe_timeout)
            .build()?;

        Ok(Self {
            http,
            probe_http,
            base_url: config.source_base_url.trim_end_matches('/').to_string(),
            retries: config.fetch_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    async fn fetch_once(&self, url: &str) -> ScrapeResult<String> {
        debug!(url, "fetching page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| ScrapeError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &SourceQuery) -> ScrapeResult<RawPage> {
        let url = query.url(&self.base_url);

        let mut attempt = 0;
        let html = loop {
            match self.fetch_once(&url).await {
                Ok(html) => break html,
                // 4xx responses are not retried.
                Err(ScrapeError::UnexpectedStatus { status, .. }) if status.is_client_error() => {
                    return Err(ScrapeError::UnexpectedStatus {
                        url: url.clone(),
                        status,
                    });
                }
                Err(err) if attempt < self.retries => {
                    let delay = self.retry_backoff * 2u32.pow(attempt);
                    warn!(%err, attempt, delay_ms = delay.as_millis() as u64, "fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        Ok(RawPage {
            html,
            url,
            fetched_at: Utc::now(),
        })
    }

    async fn probe(&self) -> bool {
        match self.probe_http.head(&self.base_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(%err, "origin probe failed");
                false
            }
        }
    }
}

use ::scraper::error::SelectorErrorKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// All errors that can occur while fetching or parsing an origin page.
///
/// These never reach API callers directly; the query service translates
/// them into a [`ServiceError`].
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for ScrapeError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        ScrapeError::Selector(err.to_string())
    }
}

/// Caller-facing error taxonomy for the query service and HTTP surface.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Malformed or missing request parameters. Never retried.
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested entity does not exist in any reachable dataset.
    #[error("not found: {0}")]
    NotFound(String),

    /// The origin fetch failed or timed out and no stale data was available.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The concurrent-fetch queue is full. Callers should retry with backoff.
    #[error("too many concurrent fetches, retry later")]
    Overloaded,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

use std::env;
use std::time::Duration;

/// Server configuration, loaded from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the origin stats site.
    pub source_base_url: String,
    /// Cache TTL for normalized result sets.
    pub cache_ttl: Duration,
    /// Timeout for a single origin request.
    pub request_timeout: Duration,
    /// Timeout for the lightweight health probe.
    pub probe_timeout: Duration,
    /// Maximum number of origin fetches in flight at once.
    pub max_concurrent_fetches: usize,
    /// Additional fetches allowed to queue for a permit before
    /// requests are rejected as overloaded.
    pub fetch_queue_depth: usize,
    /// Retry attempts after a failed origin request.
    pub fetch_retries: u32,
    /// Base delay of the retry backoff schedule; doubles per attempt.
    pub retry_backoff: Duration,
    /// Interval between cache sweep runs.
    pub sweep_interval: Duration,
    /// HTTP server port.
    pub server_port: u16,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SOURCE_BASE_URL` - origin site base URL (default: `https://www.mlb.com`)
    /// - `CACHE_TTL_SECS` - cache TTL in seconds (default: 300)
    /// - `REQUEST_TIMEOUT_SECS` - origin request timeout (default: 10)
    /// - `PROBE_TIMEOUT_SECS` - health probe timeout (default: 2)
    /// - `MAX_CONCURRENT_FETCHES` - fetch pool size (default: 4)
    /// - `FETCH_QUEUE_DEPTH` - queued fetches before overload (default: 32)
    /// - `FETCH_RETRIES` - retry attempts per fetch (default: 2)
    /// - `RETRY_BACKOFF_MS` - base retry backoff in ms (default: 250)
    /// - `SWEEP_INTERVAL_SECS` - sweep frequency (default: 300)
    /// - `SERVER_PORT` - HTTP port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            source_base_url: env::var("SOURCE_BASE_URL")
                .unwrap_or_else(|_| "https://www.mlb.com".to_string()),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", 300)),
            request_timeout: Duration::from_secs(env_parse("REQUEST_TIMEOUT_SECS", 10)),
            probe_timeout: Duration::from_secs(env_parse("PROBE_TIMEOUT_SECS", 2)),
            max_concurrent_fetches: env_parse("MAX_CONCURRENT_FETCHES", 4),
            fetch_queue_depth: env_parse("FETCH_QUEUE_DEPTH", 32),
            fetch_retries: env_parse("FETCH_RETRIES", 2),
            retry_backoff: Duration::from_millis(env_parse("RETRY_BACKOFF_MS", 250)),
            sweep_interval: Duration::from_secs(env_parse("SWEEP_INTERVAL_SECS", 300)),
            server_port: env_parse("SERVER_PORT", 3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_base_url: "https://www.mlb.com".to_string(),
            cache_ttl: Duration::from_secs(300),
            request_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(2),
            max_concurrent_fetches: 4,
            fetch_queue_depth: 32,
            fetch_retries: 2,
            retry_backoff: Duration::from_millis(250),
            sweep_interval: Duration::from_secs(300),
            server_port: 3000,
        }
    }
}

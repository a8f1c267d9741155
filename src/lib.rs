pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{Result, ScrapeError, ScrapeResult, ServiceError};
pub use fetch::{Fetch, HttpFetcher, RawPage, SourceQuery};
pub use service::{HealthStatus, QueryOptions, QueryOutcome, RosterService};
pub use tasks::spawn_sweep_task;

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod scraper;
pub mod service;
pub mod tasks;

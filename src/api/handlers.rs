use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::CacheStatsSnapshot;
use crate::error::{Result, ServiceError};
use crate::model::{Player, StatType};
use crate::service::{HealthStatus, QueryOptions, RosterService};

const DEFAULT_LIMIT: usize = 50;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RosterService>,
}

impl AppState {
    pub fn new(service: Arc<RosterService>) -> Self {
        Self { service }
    }
}

/// Query string accepted by `GET /players`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayersQuery {
    pub team: Option<String>,
    pub position: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "statType")]
    pub stat_type: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PlayersQuery {
    fn into_options(self) -> Result<QueryOptions> {
        let stat_type = match self.stat_type.as_deref() {
            None => StatType::default(),
            Some(raw) => raw.parse().map_err(|_| {
                ServiceError::InvalidArgument(format!("Unrecognized statType: {raw}"))
            })?,
        };

        Ok(QueryOptions {
            team: self.team,
            position: self.position,
            search: self.search,
            stat_type,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Response body for `GET /players`.
#[derive(Debug, Clone, Serialize)]
pub struct PlayersResponse {
    pub players: Vec<Player>,
    /// Matches before pagination.
    pub total: usize,
    pub count: usize,
    /// True when served from an expired cache entry or a partial aggregate
    /// because the origin was unreachable.
    pub stale: bool,
}

/// Response body for `GET /players/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub player: Player,
    pub stale: bool,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
}

/// Response body for `DELETE /cache`.
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
}

/// Handler for `GET /players`.
pub async fn players_handler(
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<PlayersResponse>> {
    let outcome = state.service.query(query.into_options()?).await?;

    Ok(Json(PlayersResponse {
        total: outcome.total,
        count: outcome.players.len(),
        stale: outcome.stale,
        players: outcome.players,
    }))
}

/// Handler for `GET /players/:id`.
pub async fn player_stats_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerResponse>> {
    let (player, stale) = state.service.player_stats(&player_id).await?;
    Ok(Json(PlayerResponse { player, stale }))
}

/// Handler for `GET /health`.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.service.check_health().await;
    Json(HealthResponse {
        status,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Handler for `GET /stats`.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsSnapshot> {
    Json(state.service.cache_stats())
}

/// Handler for `DELETE /cache`.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    state.service.clear_cache();
    info!("cache cleared by request");
    Json(ClearCacheResponse {
        message: "Cache cleared".to_string(),
    })
}

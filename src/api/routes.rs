use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    clear_cache_handler, health_handler, player_stats_handler, players_handler, stats_handler,
    AppState,
};

/// Build the router consumed by the three dashboard frontends.
///
/// # Endpoints
/// - `GET /players` - filtered, paginated player query
/// - `GET /players/:id` - single player stats
/// - `GET /health` - origin reachability and serving mode
/// - `GET /stats` - cache counters
/// - `DELETE /cache` - explicit cache invalidation
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/players", get(players_handler))
        .route("/players/:id", get(player_stats_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, Semaphore};
use tracing::{debug, instrument, warn};

use crate::cache::{CacheStatsSnapshot, TtlCache};
use crate::config::Config;
use crate::error::{Result, ScrapeError, ServiceError};
use crate::fetch::{Fetch, SourceQuery};
use crate::model::{canonical_team_code, Player, Position, StatType, TEAM_CODES};
use crate::scraper::parse_roster;

/// A normalized result set, shared between cache, in-flight waiters and
/// responses without copying.
pub type Roster = Arc<Vec<Player>>;

/// Outcome delivered to every waiter of a single-flight fetch.
type FlightResult = std::result::Result<Roster, Arc<ScrapeError>>;

enum FlightFailure {
    Overloaded,
    Scrape(Arc<ScrapeError>),
}

/// A loaded result set plus whether it came from a stale cache entry or a
/// partial aggregation.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub players: Roster,
    pub stale: bool,
}

/// Validated query options for the players endpoint.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub team: Option<String>,
    pub position: Option<String>,
    pub search: Option<String>,
    pub stat_type: StatType,
    pub limit: usize,
    pub offset: usize,
}

/// A filtered, paginated response payload.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub players: Vec<Player>,
    /// Total matches before pagination.
    pub total: usize,
    pub stale: bool,
}

/// Health of the service as reported to monitoring.
#[derive(Debug, Clone, Copy, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    /// Cache operable and the origin probe succeeded.
    Healthy,
    /// Origin unreachable; serving cached/stale data only.
    Degraded,
    /// The backing store is unusable. Unreachable while the cache is
    /// in-process; kept for the monitoring contract.
    Unhealthy,
}

impl Serialize for HealthStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The query service: composes cache → fetch → parse → cache-fill, then
/// filters, searches and paginates the normalized dataset.
///
/// Concurrent cache misses for one logical key share a single detached
/// fetch task (per-key single-flight); distinct keys fetch concurrently,
/// bounded by a semaphore, with a bounded wait queue beyond which requests
/// are rejected as overloaded.
pub struct RosterService {
    fetcher: Arc<dyn Fetch>,
    cache: Arc<TtlCache<Roster>>,
    inflight: Arc<Mutex<HashMap<String, broadcast::Sender<FlightResult>>>>,
    fetch_permits: Arc<Semaphore>,
    queue_slots: Arc<Semaphore>,
    max_concurrent_fetches: usize,
}

impl RosterService {
    pub fn new(fetcher: Arc<dyn Fetch>, config: &Config) -> Self {
        Self {
            fetcher,
            cache: Arc::new(TtlCache::new(config.cache_ttl)),
            inflight: Arc::new(Mutex::new(HashMap::new())),
            fetch_permits: Arc::new(Semaphore::new(config.max_concurrent_fetches)),
            queue_slots: Arc::new(Semaphore::new(
                config.max_concurrent_fetches + config.fetch_queue_depth,
            )),
            max_concurrent_fetches: config.max_concurrent_fetches,
        }
    }

    /// The cache instance, shared with the background sweep task.
    pub fn cache(&self) -> Arc<TtlCache<Roster>> {
        Arc::clone(&self.cache)
    }

    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.cache.stats()
    }

    /// Explicit invalidation: drop every cached result set.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Dispatch entry used by the HTTP layer. Exactly one of team, position
    /// or search must be supplied; pagination is applied after filtering.
    #[instrument(skip(self))]
    pub async fn query(&self, options: QueryOptions) -> Result<QueryOutcome> {
        let filters = [
            options.team.is_some(),
            options.position.is_some(),
            options.search.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        if filters == 0 {
            return Err(ServiceError::InvalidArgument(
                "At least one filter parameter is required".to_string(),
            ));
        }
        if filters > 1 {
            return Err(ServiceError::InvalidArgument(
                "Only one of team, position or search may be supplied".to_string(),
            ));
        }

        let loaded = if let Some(team) = &options.team {
            self.players_by_team(team, options.stat_type).await?
        } else if let Some(position) = &options.position {
            self.players_by_position(position, options.stat_type).await?
        } else {
            let search = options.search.as_deref().unwrap_or_default();
            self.search_players(search, options.stat_type).await?
        };

        let total = loaded.players.len();
        let players = paginate(&loaded.players, options.limit, options.offset);
        Ok(QueryOutcome {
            players,
            total,
            stale: loaded.stale,
        })
    }

    /// Roster for a single team, cache-or-fetch under `team:<CODE>:<stats>`.
    #[instrument(skip(self))]
    pub async fn players_by_team(&self, team: &str, stat_type: StatType) -> Result<Loaded> {
        let team = canonical_team_code(team)?;
        self.load_team(&team, stat_type).await
    }

    /// All players at a position, computed over the aggregated dataset and
    /// cached under `position:<pos>:<stats>`.
    #[instrument(skip(self))]
    pub async fn players_by_position(&self, position: &str, stat_type: StatType) -> Result<Loaded> {
        let position: Position = position.trim().parse().map_err(|_| {
            ServiceError::InvalidArgument(format!("Unrecognized position: {}", position.trim()))
        })?;

        let key = format!("position:{position}:{stat_type}");
        if let Some(players) = self.cache.get(&key) {
            return Ok(Loaded {
                players,
                stale: false,
            });
        }

        let (all, degraded, complete) = self.aggregate(stat_type).await?;
        let matched: Roster = Arc::new(
            all.into_iter()
                .filter(|p| p.position == position)
                .collect::<Vec<_>>(),
        );
        if complete {
            self.cache.set(key, Arc::clone(&matched));
        }
        Ok(Loaded {
            players: matched,
            stale: degraded,
        })
    }

    /// Case-insensitive substring search over display names in the full
    /// aggregated dataset, cached under `search:<term>:<stats>`.
    #[instrument(skip(self))]
    pub async fn search_players(&self, term: &str, stat_type: StatType) -> Result<Loaded> {
        let normalized = term.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "Search term cannot be empty".to_string(),
            ));
        }

        let key = format!("search:{normalized}:{stat_type}");
        if let Some(players) = self.cache.get(&key) {
            return Ok(Loaded {
                players,
                stale: false,
            });
        }

        let (all, degraded, complete) = self.aggregate(stat_type).await?;
        let matched: Roster = Arc::new(
            all.into_iter()
                .filter(|p| p.name.to_lowercase().contains(&normalized))
                .collect::<Vec<_>>(),
        );
        if complete {
            self.cache.set(key, Arc::clone(&matched));
        }
        Ok(Loaded {
            players: matched,
            stale: degraded,
        })
    }

    /// Look up a single player by identifier across all team datasets.
    #[instrument(skip(self))]
    pub async fn player_stats(&self, player_id: &str) -> Result<(Player, bool)> {
        let (all, degraded, _complete) = self.aggregate(StatType::default()).await?;
        all.into_iter()
            .find(|p| p.id == player_id)
            .map(|p| (p, degraded))
            .ok_or_else(|| ServiceError::NotFound(format!("No player with id {player_id}")))
    }

    /// Origin reachability as seen from this process. The cache is
    /// in-process memory, so only the probe can degrade the status.
    pub async fn check_health(&self) -> HealthStatus {
        if self.fetcher.probe().await {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }

    /// Load every team roster through the cache + single-flight machinery.
    ///
    /// Teams that fail and have no stale entry are skipped with a warning;
    /// the aggregate is then marked degraded and must not be cached under
    /// derived keys. Fails outright only when no team loads at all.
    async fn aggregate(&self, stat_type: StatType) -> Result<(Vec<Player>, bool, bool)> {
        let mut tasks = Vec::with_capacity(TEAM_CODES.len());
        for code in TEAM_CODES {
            tasks.push(async move { (code, self.load_team(code, stat_type).await) });
        }
        let results: Vec<(&'static str, Result<Loaded>)> = stream::iter(tasks)
            .buffer_unordered(self.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut players = Vec::new();
        let mut degraded = false;
        let mut failed = 0usize;
        let mut first_error = None;

        for (code, result) in results {
            match result {
                Ok(loaded) => {
                    degraded |= loaded.stale;
                    players.extend(loaded.players.iter().cloned());
                }
                Err(err) => {
                    warn!(team = code, %err, "skipping team in aggregate");
                    failed += 1;
                    first_error.get_or_insert(err);
                }
            }
        }

        if failed == TEAM_CODES.len() {
            // Nothing loaded anywhere; surface the underlying failure.
            return Err(first_error.unwrap_or(ServiceError::SourceUnavailable(
                "no team data available".to_string(),
            )));
        }

        let complete = failed == 0 && !degraded;
        Ok((players, degraded || failed > 0, complete))
    }

    async fn load_team(&self, team: &str, stat_type: StatType) -> Result<Loaded> {
        let key = format!("team:{team}:{stat_type}");
        if let Some(players) = self.cache.get(&key) {
            return Ok(Loaded {
                players,
                stale: false,
            });
        }

        match self.fetch_shared(&key, team, stat_type).await {
            Ok(players) => Ok(Loaded {
                players,
                stale: false,
            }),
            Err(FlightFailure::Overloaded) => Err(ServiceError::Overloaded),
            Err(FlightFailure::Scrape(err)) => {
                // Origin failed; serve the expired entry if one is still
                // around, flagged as stale.
                if let Some((players, _expired)) = self.cache.get_stale(&key) {
                    warn!(%key, %err, "origin fetch failed, serving stale cache entry");
                    Ok(Loaded {
                        players,
                        stale: true,
                    })
                } else {
                    warn!(%key, %err, "origin fetch failed with no cached fallback");
                    Err(ServiceError::SourceUnavailable(format!(
                        "could not retrieve roster for team {team}"
                    )))
                }
            }
        }
    }

    /// Join or start the single in-flight fetch for `key`.
    ///
    /// The fetch runs in a detached task: a caller that goes away does not
    /// cancel work already serving other waiters, and the cache is filled
    /// for subsequent callers either way.
    async fn fetch_shared(
        &self,
        key: &str,
        team: &str,
        stat_type: StatType,
    ) -> std::result::Result<Roster, FlightFailure> {
        let mut rx = {
            let mut inflight = self.inflight.lock().expect("inflight lock poisoned");

            if let Some(tx) = inflight.get(key) {
                tx.subscribe()
            } else {
                // The flight may have completed between the cache miss and
                // taking the lock; its result would already be cached.
                if let Some(players) = self.cache.get(key) {
                    return Ok(players);
                }

                let Ok(slot) = Arc::clone(&self.queue_slots).try_acquire_owned() else {
                    return Err(FlightFailure::Overloaded);
                };

                let (tx, rx) = broadcast::channel(1);
                inflight.insert(key.to_string(), tx.clone());
                self.spawn_flight(key.to_string(), team.to_string(), stat_type, tx, slot);
                rx
            }
        };

        match rx.recv().await {
            Ok(Ok(players)) => Ok(players),
            Ok(Err(err)) => Err(FlightFailure::Scrape(err)),
            Err(err) => {
                // Sender dropped without a result; treat as a failed fetch.
                warn!(%key, %err, "in-flight fetch channel closed unexpectedly");
                Err(FlightFailure::Scrape(Arc::new(ScrapeError::ElementNotFound {
                    context: "in-flight fetch aborted",
                })))
            }
        }
    }

    fn spawn_flight(
        &self,
        key: String,
        team: String,
        stat_type: StatType,
        tx: broadcast::Sender<FlightResult>,
        slot: tokio::sync::OwnedSemaphorePermit,
    ) {
        let fetcher = Arc::clone(&self.fetcher);
        let cache = Arc::clone(&self.cache);
        let inflight = Arc::clone(&self.inflight);
        let permits = Arc::clone(&self.fetch_permits);

        tokio::spawn(async move {
            let result: FlightResult = async {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .expect("fetch semaphore closed");
                let query = SourceQuery::Roster {
                    team: team.clone(),
                    stat_type,
                };
                let page = fetcher.fetch(&query).await.map_err(Arc::new)?;
                let players = parse_roster(&page, &team, stat_type).map_err(Arc::new)?;
                let roster: Roster = Arc::new(players);
                cache.set(key.clone(), Arc::clone(&roster));
                debug!(%key, count = roster.len(), "cached roster");
                Ok(roster)
            }
            .await;

            drop(slot);

            // Fill order matters: the cache write above happens before the
            // entry leaves the in-flight map, so late callers that miss the
            // broadcast find the result in the cache.
            let mut inflight = inflight.lock().expect("inflight lock poisoned");
            inflight.remove(&key);
            let _ = tx.send(result);
        });
    }
}

/// Slice the post-filter result set. An offset beyond the end or a limit of
/// zero yields an empty sequence, never an error.
fn paginate(players: &[Player], limit: usize, offset: usize) -> Vec<Player> {
    players.iter().skip(offset).take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::error::{ScrapeError, ScrapeResult};
    use crate::fetch::RawPage;

    /// Scripted fetcher: serves generated roster pages, counts calls, and
    /// can be switched into failure mode or slowed down.
    struct StubFetcher {
        rosters: HashMap<String, Vec<(&'static str, &'static str, &'static str)>>,
        calls: AtomicUsize,
        failing: AtomicBool,
        delay: Duration,
        probe_ok: bool,
    }

    impl StubFetcher {
        fn new(rosters: HashMap<String, Vec<(&'static str, &'static str, &'static str)>>) -> Self {
            Self {
                rosters,
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
                delay: Duration::ZERO,
                probe_ok: true,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    fn roster_html(players: &[(&str, &str, &str)]) -> String {
        let rows: String = players
            .iter()
            .map(|(id, name, pos)| {
                format!(
                    r#"<tr>
                        <td class="player-info"><a href="/player/{id}/x">{name}</a></td>
                        <td class="player-pos">{pos}</td>
                        <td class="stat" data-stat="HR">10</td>
                    </tr>"#
                )
            })
            .collect();
        format!(r#"<table class="roster-table"><tbody>{rows}</tbody></table>"#)
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self, query: &SourceQuery) -> ScrapeResult<RawPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(ScrapeError::ElementNotFound {
                    context: "stub failure",
                });
            }

            let SourceQuery::Roster { team, .. } = query;
            let players = self.rosters.get(team).cloned().unwrap_or_default();
            Ok(RawPage {
                html: roster_html(&players),
                url: format!("stub://{team}"),
                fetched_at: Utc::now(),
            })
        }

        async fn probe(&self) -> bool {
            self.probe_ok
        }
    }

    fn default_rosters() -> HashMap<String, Vec<(&'static str, &'static str, &'static str)>> {
        HashMap::from([
            (
                "NYY".to_string(),
                vec![
                    ("592450", "Aaron Judge", "RF"),
                    ("543037", "Gerrit Cole", "SP"),
                    ("609280", "Anthony Volpe", "SS"),
                ],
            ),
            (
                "BOS".to_string(),
                vec![("646240", "Rafael Devers", "3B"), ("807799", "Marcelo Mayer", "SS")],
            ),
        ])
    }

    fn service_with(fetcher: StubFetcher, config: &Config) -> (Arc<RosterService>, Arc<StubFetcher>) {
        let fetcher = Arc::new(fetcher);
        let service = Arc::new(RosterService::new(
            Arc::clone(&fetcher) as Arc<dyn Fetch>,
            config,
        ));
        (service, fetcher)
    }

    fn options(team: Option<&str>) -> QueryOptions {
        QueryOptions {
            team: team.map(str::to_string),
            position: None,
            search: None,
            stat_type: StatType::Hitting,
            limit: 50,
            offset: 0,
        }
    }

    #[tokio::test]
    async fn test_players_by_team_filters_to_team() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let loaded = service.players_by_team("nyy", StatType::Hitting).await.unwrap();
        assert_eq!(loaded.players.len(), 3);
        assert!(loaded.players.iter().all(|p| p.team == "NYY"));
        assert!(!loaded.stale);
    }

    #[tokio::test]
    async fn test_team_roster_is_cached() {
        let (service, fetcher) =
            service_with(StubFetcher::new(default_rosters()), &Config::default());

        service.players_by_team("NYY", StatType::Hitting).await.unwrap();
        service.players_by_team("NYY", StatType::Hitting).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_team_code_rejected() {
        let (service, fetcher) =
            service_with(StubFetcher::new(default_rosters()), &Config::default());

        let err = service.players_by_team("XYZ", StatType::Hitting).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_requires_a_filter() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let err = service.query(options(None)).await.unwrap_err();
        let ServiceError::InvalidArgument(message) = err else {
            panic!("expected InvalidArgument");
        };
        assert_eq!(message, "At least one filter parameter is required");
    }

    #[tokio::test]
    async fn test_query_rejects_multiple_filters() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let mut opts = options(Some("NYY"));
        opts.search = Some("judge".to_string());
        let err = service.query(opts).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_pagination_edges() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let mut opts = options(Some("NYY"));
        opts.limit = 2;
        let outcome = service.query(opts).await.unwrap();
        assert_eq!(outcome.players.len(), 2);
        assert_eq!(outcome.total, 3);

        let mut opts = options(Some("NYY"));
        opts.offset = 10;
        let outcome = service.query(opts).await.unwrap();
        assert!(outcome.players.is_empty());
        assert_eq!(outcome.total, 3);

        let mut opts = options(Some("NYY"));
        opts.limit = 0;
        let outcome = service.query(opts).await.unwrap();
        assert!(outcome.players.is_empty());
    }

    #[tokio::test]
    async fn test_single_flight_shares_one_fetch() {
        let (service, fetcher) = service_with(
            StubFetcher::new(default_rosters()).with_delay(Duration::from_millis(50)),
            &Config::default(),
        );

        let mut handles = Vec::new();
        for _ in 0..10 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.players_by_team("NYY", StatType::Hitting).await
            }));
        }

        let mut sizes = Vec::new();
        for handle in handles {
            let loaded = handle.await.unwrap().unwrap();
            sizes.push(loaded.players.len());
        }

        assert!(sizes.iter().all(|&n| n == 3));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_fallback_on_source_failure() {
        let config = Config {
            cache_ttl: Duration::from_millis(30),
            ..Config::default()
        };
        let (service, fetcher) = service_with(StubFetcher::new(default_rosters()), &config);

        let fresh = service.players_by_team("NYY", StatType::Hitting).await.unwrap();
        assert!(!fresh.stale);

        tokio::time::sleep(Duration::from_millis(50)).await;
        fetcher.set_failing(true);

        let stale = service.players_by_team("NYY", StatType::Hitting).await.unwrap();
        assert!(stale.stale);
        assert_eq!(stale.players.len(), fresh.players.len());
    }

    #[tokio::test]
    async fn test_source_failure_without_cache_surfaces() {
        let (service, fetcher) =
            service_with(StubFetcher::new(default_rosters()), &Config::default());
        fetcher.set_failing(true);

        let err = service.players_by_team("NYY", StatType::Hitting).await.unwrap_err();
        assert!(matches!(err, ServiceError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_overload_rejected_beyond_queue_depth() {
        let config = Config {
            max_concurrent_fetches: 1,
            fetch_queue_depth: 0,
            ..Config::default()
        };
        let (service, _) = service_with(
            StubFetcher::new(default_rosters()).with_delay(Duration::from_millis(300)),
            &config,
        );

        let slow = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.players_by_team("NYY", StatType::Hitting).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = service.players_by_team("BOS", StatType::Hitting).await.unwrap_err();
        assert!(matches!(err, ServiceError::Overloaded));

        assert!(slow.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_search_matches_substring_case_insensitive() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let loaded = service.search_players("JUDGE", StatType::Hitting).await.unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(loaded.players[0].name, "Aaron Judge");
    }

    #[tokio::test]
    async fn test_search_is_cached_after_first_aggregate() {
        let (service, fetcher) =
            service_with(StubFetcher::new(default_rosters()), &Config::default());

        service.search_players("mayer", StatType::Hitting).await.unwrap();
        let calls_after_first = fetcher.calls();
        assert_eq!(calls_after_first, TEAM_CODES.len());

        let loaded = service.search_players("mayer", StatType::Hitting).await.unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(fetcher.calls(), calls_after_first);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_term() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let err = service.search_players("   ", StatType::Hitting).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_players_by_position() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let loaded = service.players_by_position("ss", StatType::Hitting).await.unwrap();
        assert_eq!(loaded.players.len(), 2);
        assert!(loaded
            .players
            .iter()
            .all(|p| p.position == Position::Shortstop));

        let err = service.players_by_position("QB", StatType::Hitting).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_player_stats_lookup() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());

        let (player, stale) = service.player_stats("646240").await.unwrap();
        assert_eq!(player.name, "Rafael Devers");
        assert!(!stale);

        let err = service.player_stats("000000").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_check_health_degraded_when_probe_fails() {
        let mut stub = StubFetcher::new(default_rosters());
        stub.probe_ok = false;
        let (service, _) = service_with(stub, &Config::default());

        assert_eq!(service.check_health().await, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn test_check_health_healthy() {
        let (service, _) = service_with(StubFetcher::new(default_rosters()), &Config::default());
        assert_eq!(service.check_health().await, HealthStatus::Healthy);
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::service::Roster;

/// Spawn the periodic cache sweep.
///
/// Runs until aborted; the returned handle is used for shutdown. The sweep
/// takes the cache lock only briefly per pass, so in-flight reads and
/// writes are never blocked for a full sweep.
pub fn spawn_sweep_task(cache: Arc<TtlCache<Roster>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep();
            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found no expired entries");
            }
        }
    })
}

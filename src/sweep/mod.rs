//! Periodic retention sweep

use std::sync::Arc;
use std::time::Duration;

use crate::engine::GameEngine;

/// Run the retention sweep forever at the given period
///
/// Spawn this on the runtime next to the engine; each tick evicts
/// entries older than the configured retention TTL through the same
/// per-entity locks the request paths use.
pub async fn run(engine: Arc<GameEngine>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let stats = engine.sweep_once();
        tracing::debug!(
            puzzles = stats.puzzles_removed,
            sessions = stats.sessions_removed,
            "retention sweep pass"
        );
    }
}

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Worker/server health counters, served on `/health`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthStats {
    pub uptime_secs: u64,

    /// Refresh ticks attempted so far (including failed ones).
    pub iterations: u64,

    /// As-of time of the last successful refresh, `YYYY-MM-DD HH:MM:SS`.
    pub last_as_of: Option<String>,

    /// Plot rows in the last successful refresh.
    pub plot_rows: usize,

    /// Snapshot rows dropped for lack of a catalog entry in the last
    /// successful refresh.
    pub dropped_unmatched: usize,

    /// Message of the most recent failed tick, cleared on success.
    pub last_error: Option<String>,
}

pub type SharedHealthStats = Arc<RwLock<HealthStats>>;

pub fn new_shared_health_stats() -> SharedHealthStats {
    Arc::new(RwLock::new(HealthStats::default()))
}

use crate::constants::SNAPSHOT_INTERVAL_SECS;
use crate::error::Result;
use crate::models::StockCatalog;
use crate::render::render_treemap;
use crate::services::{build_plot_rows, FinMindClient, SharedHealthStats, SharedLatestView};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Periodic refresh loop: fetch → pipeline → render → publish.
///
/// Ticks fire every `SNAPSHOT_INTERVAL_SECS`. The body runs to completion
/// before the next tick is taken and missed ticks are skipped, never queued,
/// so at most one refresh is in flight and the loop self-throttles when the
/// network or renderer is slow. A failed tick is logged and leaves the
/// previously published view in place.
pub async fn run(
    client: FinMindClient,
    catalog: StockCatalog,
    latest: SharedLatestView,
    health: SharedHealthStats,
) {
    info!(
        interval_secs = SNAPSHOT_INTERVAL_SECS,
        catalog_size = catalog.len(),
        "Starting snapshot worker"
    );

    let mut ticker = interval(Duration::from_secs(SNAPSHOT_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut iteration = 0u64;

    loop {
        ticker.tick().await;
        iteration += 1;
        let tick_start = std::time::Instant::now();

        match refresh_once(&client, &catalog, &latest).await {
            Ok(outcome) => {
                if outcome.dropped_unmatched > 0 {
                    warn!(
                        iteration,
                        dropped = outcome.dropped_unmatched,
                        "Snapshot rows without a catalog entry were dropped"
                    );
                }
                info!(
                    iteration,
                    rows = outcome.rows,
                    as_of = %outcome.as_of,
                    duration_secs = tick_start.elapsed().as_secs_f64(),
                    "Refresh completed"
                );

                let mut stats = health.write().await;
                stats.iterations = iteration;
                stats.plot_rows = outcome.rows;
                stats.dropped_unmatched = outcome.dropped_unmatched;
                stats.last_as_of = Some(outcome.as_of);
                stats.last_error = None;
            }
            Err(e) => {
                error!(iteration, error = %e, "Refresh failed; previous view stays published");

                let mut stats = health.write().await;
                stats.iterations = iteration;
                stats.last_error = Some(e.to_string());
            }
        }
    }
}

struct RefreshOutcome {
    rows: usize,
    dropped_unmatched: usize,
    as_of: String,
}

/// One refresh tick. Any error aborts this tick only.
async fn refresh_once(
    client: &FinMindClient,
    catalog: &StockCatalog,
    latest: &SharedLatestView,
) -> Result<RefreshOutcome> {
    let snapshot = client.tick_snapshot().await?;
    let table = build_plot_rows(&snapshot, catalog)?;
    let html = render_treemap(&table);
    latest.publish(html).await;

    Ok(RefreshOutcome {
        rows: table.rows.len(),
        dropped_unmatched: table.dropped_unmatched,
        as_of: table.as_of.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

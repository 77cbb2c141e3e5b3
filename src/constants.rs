//! Service-wide constants: FinMind endpoints, filtering rules, refresh cadence
//! and chart geometry.

/// Base URL for the FinMind v4 API.
pub const FINMIND_API_BASE: &str = "https://api.finmindtrade.com/api/v4";

/// Status code FinMind reports in its response envelope on success.
pub const FINMIND_SUCCESS_STATUS: i64 = 200;

/// Environment variable holding the FinMind API token.
pub const API_TOKEN_ENV: &str = "FINMIND_API_TOKEN";

/// Industry categories that denote market aggregates rather than tradeable
/// stocks. Rows in these categories are excluded from per-stock analysis.
pub const RESERVED_CATEGORIES: &[&str] = &["Index", "大盤"];

/// Number of stocks kept per industry, ranked by trading value.
pub const TOP_STOCKS_PER_INDUSTRY: usize = 5;

/// Seconds between snapshot refreshes.
pub const SNAPSHOT_INTERVAL_SECS: u64 = 5;

/// Client-side page reload delay, in seconds.
pub const PAGE_REFRESH_SECS: u32 = 1;

/// Timeout for outbound FinMind requests. Bounds a refresh tick so a stalled
/// fetch cannot hang past its own period.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Treemap canvas size in pixels.
pub const CHART_WIDTH: f64 = 1350.0;
pub const CHART_HEIGHT: f64 = 900.0;

/// Default HTTP listen port for `finmap serve`.
pub const DEFAULT_PORT: u16 = 5000;

/// Placeholder page body served before the first successful refresh.
pub const INITIALIZING_PLACEHOLDER: &str = "初始化~~~";

/// Returns true for categories that must never appear in plot rows.
pub fn is_reserved_category(category: &str) -> bool {
    RESERVED_CATEGORIES.contains(&category)
}

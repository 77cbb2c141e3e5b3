pub mod finmind;
pub mod health;
pub mod latest;
pub mod pipeline;

pub use finmind::FinMindClient;
pub use health::{new_shared_health_stats, HealthStats, SharedHealthStats};
pub use latest::{LatestView, SharedLatestView};
pub use pipeline::build_plot_rows;

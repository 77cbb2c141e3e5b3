mod plot_row;
mod snapshot;
mod stock_info;

pub use plot_row::{PlotRow, PlotTable};
pub use snapshot::TickSnapshot;
pub use stock_info::{StockCatalog, StockInfo};

/// Break-even estimate.
pub mod break_even;
/// Multi-turbine comparison aggregator.
pub mod compare;
pub mod error;
/// Summary rows and comparison table.
pub mod kpi;
/// Single-turbine cash-flow calculator.
pub mod projection;
pub mod types;

pub use break_even::BreakEven;
pub use compare::{Comparison, compare};
pub use error::{ProjectionError, SeriesError};
pub use kpi::{ComparisonTable, SummaryRow};
pub use projection::{CashflowProjection, ProjectionEngine, project};
pub use types::{CumulativeProfitMode, PowerSeries, TurbineFinancials};

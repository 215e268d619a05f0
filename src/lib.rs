//! Wind turbine energy-to-cash-flow projections.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
/// Cost, revenue, profit and break-even projections.
pub mod finance;
pub mod io;
pub mod power;
pub mod reporting;

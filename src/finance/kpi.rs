//! Per-turbine summary rows and the fixed-width comparison table.

use std::fmt;

use serde::Serialize;

use super::break_even::BreakEven;
use super::projection::CashflowProjection;

/// Headline figures for one turbine in a comparison.
///
/// Derived post-hoc from a [`CashflowProjection`] so the table can never
/// disagree with the step data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Turbine label.
    pub turbine: String,
    /// Construction cost.
    pub construction_cost: f64,
    /// `construction_cost * maintenance_rate`.
    pub annual_maintenance_cost: f64,
    /// Total energy over the horizon (MWh).
    pub total_energy_mwh: f64,
    /// Revenue summed over all steps.
    pub total_revenue: f64,
    /// Total revenue minus accrued cost at the final step.
    pub total_profit: f64,
    /// Break-even estimate.
    pub break_even: BreakEven,
}

impl SummaryRow {
    pub fn from_projection(p: &CashflowProjection) -> Self {
        let f = p.financials();
        Self {
            turbine: f.turbine_type.clone(),
            construction_cost: f.construction_cost,
            annual_maintenance_cost: f.annual_maintenance_cost(),
            total_energy_mwh: p.total_energy_mwh(),
            total_revenue: p.total_revenue(),
            total_profit: p.total_profit(),
            break_even: p.break_even(),
        }
    }
}

/// Console rendering of summary rows, one line per turbine.
///
/// Columns are centred like the historical comparison report; break-even
/// shows `n/a` when it is not reached.
pub struct ComparisonTable<'a>(pub &'a [SummaryRow]);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:^11} {:^10} {:^11} {:^12} {:^12} {:^10} {:^7}",
            "Turbine", "Const.($)", "Maint.($)", "Energy(MWh)", "Revenue($)", "Profit($)", "BE(Yr)"
        )?;
        for row in self.0 {
            let be = match row.break_even {
                BreakEven::Reached { years } => format!("{years:.2}"),
                BreakEven::NotReached { .. } => "n/a".to_string(),
            };
            write!(
                f,
                "\n{:^11} {:^10.0} {:^11.0} {:^12.0} {:^12.0} {:^10.0} {:^7}",
                row.turbine,
                row.construction_cost,
                row.annual_maintenance_cost.trunc(),
                row.total_energy_mwh,
                row.total_revenue,
                row.total_profit,
                be
            )?;
        }
        Ok(())
    }
}

//! Break-even estimate from annualized net cash flow.

use std::fmt;

use serde::Serialize;

/// Outcome of the break-even estimate for one turbine.
///
/// The estimate divides the construction cost by the steady-state annual
/// net cash flow (annualized revenue minus annual maintenance). It is an
/// approximation, not a discounted payback period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEven {
    /// Construction cost is recovered after `years`.
    Reached { years: f64 },
    /// Annualized net cash flow is zero or negative.
    NotReached { annual_net_cash_flow: f64 },
}

impl BreakEven {
    /// Estimates break-even time.
    ///
    /// # Arguments
    ///
    /// * `construction_cost` - One-off construction cost
    /// * `maintenance_rate` - Annual maintenance as a fraction of construction cost
    /// * `total_revenue` - Revenue summed over the whole series
    /// * `time_span_years` - Length of the series in years
    ///
    /// # Returns
    ///
    /// `Reached` when the annualized net cash flow is positive and the
    /// resulting year count is finite, `NotReached` otherwise.
    pub fn estimate(
        construction_cost: f64,
        maintenance_rate: f64,
        total_revenue: f64,
        time_span_years: f64,
    ) -> Self {
        let annual_revenue = if time_span_years > 0.0 {
            total_revenue / time_span_years
        } else {
            0.0
        };
        let annual_net_cash_flow = annual_revenue - construction_cost * maintenance_rate;

        if annual_net_cash_flow <= 0.0 || !annual_net_cash_flow.is_finite() {
            return Self::NotReached {
                annual_net_cash_flow,
            };
        }

        let years = construction_cost / annual_net_cash_flow;
        if years.is_finite() {
            Self::Reached { years }
        } else {
            Self::NotReached {
                annual_net_cash_flow,
            }
        }
    }

    /// Break-even years, if reached.
    pub fn years(&self) -> Option<f64> {
        match self {
            Self::Reached { years } => Some(*years),
            Self::NotReached { .. } => None,
        }
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached { years } => write!(f, "{years:.2} years"),
            Self::NotReached { .. } => f.write_str("not reached within model assumptions"),
        }
    }
}

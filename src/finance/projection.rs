//! Single-turbine cash-flow projection.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::break_even::BreakEven;
use super::error::ProjectionError;
use super::types::{
    CumulativeProfitMode, HOURS_PER_YEAR, PowerSeries, TurbineFinancials, WATTS_PER_KW,
    WH_PER_MWH,
};

/// Per-step and aggregate cash flows for one turbine.
///
/// All step sequences have the same length as the input series and keep
/// its order. Built only by [`ProjectionEngine`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowProjection {
    financials: TurbineFinancials,
    mode: CumulativeProfitMode,
    timestamps: Vec<NaiveDateTime>,
    power_w: Vec<f64>,
    cost: Vec<f64>,
    revenue: Vec<f64>,
    profit: Vec<f64>,
    cumulative_revenue: Vec<f64>,
    cumulative_profit: Vec<f64>,
    total_energy_wh: f64,
    total_revenue: f64,
    total_cost: f64,
    total_profit: f64,
    time_span_years: f64,
    break_even: BreakEven,
}

impl CashflowProjection {
    /// Financial parameters the projection was computed with.
    pub fn financials(&self) -> &TurbineFinancials {
        &self.financials
    }

    /// Turbine label.
    pub fn turbine(&self) -> &str {
        &self.financials.turbine_type
    }

    /// Cumulative-profit formula used.
    pub fn mode(&self) -> CumulativeProfitMode {
        self.mode
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.power_w.len()
    }

    /// Always `false`: empty series are rejected before projection.
    pub fn is_empty(&self) -> bool {
        self.power_w.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Power per step (W).
    pub fn power_w(&self) -> &[f64] {
        &self.power_w
    }

    /// Construction cost plus maintenance accrued through each step.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    pub fn revenue(&self) -> &[f64] {
        &self.revenue
    }

    /// `revenue[i] - cost[i]`.
    pub fn profit(&self) -> &[f64] {
        &self.profit
    }

    pub fn cumulative_revenue(&self) -> &[f64] {
        &self.cumulative_revenue
    }

    pub fn cumulative_profit(&self) -> &[f64] {
        &self.cumulative_profit
    }

    /// Sum of the power column (Wh over hourly steps).
    pub fn total_energy_wh(&self) -> f64 {
        self.total_energy_wh
    }

    pub fn total_energy_mwh(&self) -> f64 {
        self.total_energy_wh / WH_PER_MWH
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Accrued cost at the final step (not the sum of the cost column).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub fn time_span_years(&self) -> f64 {
        self.time_span_years
    }

    pub fn break_even(&self) -> BreakEven {
        self.break_even
    }

    /// Break-even time in years.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::DegenerateBreakEven`] when the annualized
    /// net cash flow is not positive.
    pub fn break_even_years(&self) -> Result<f64, ProjectionError> {
        match self.break_even {
            BreakEven::Reached { years } => Ok(years),
            BreakEven::NotReached {
                annual_net_cash_flow,
            } => Err(ProjectionError::DegenerateBreakEven {
                turbine: self.financials.turbine_type.clone(),
                annual_net_cash_flow,
            }),
        }
    }
}

/// Stateless projection engine parameterized by the cumulative-profit formula.
///
/// Every call is a pure function of its arguments; the engine keeps no
/// state between calls, so one instance can serve any number of projections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    mode: CumulativeProfitMode,
}

impl ProjectionEngine {
    pub fn new(mode: CumulativeProfitMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CumulativeProfitMode {
        self.mode
    }

    /// Projects cost, revenue, and profit over a power series.
    ///
    /// # Arguments
    ///
    /// * `series` - Hourly power output (W), at least one step
    /// * `financials` - Turbine economic parameters
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidInput`] if the series is empty or the
    /// financial parameters are out of range.
    pub fn project(
        &self,
        series: &PowerSeries,
        financials: &TurbineFinancials,
    ) -> Result<CashflowProjection, ProjectionError> {
        validate_inputs(series, financials, None)?;
        Ok(self.project_unchecked(series, financials))
    }

    /// Runs the step arithmetic. Inputs must already be validated.
    pub(crate) fn project_unchecked(
        &self,
        series: &PowerSeries,
        financials: &TurbineFinancials,
    ) -> CashflowProjection {
        let n = series.len();
        let construction_cost = financials.construction_cost;
        let hourly_maintenance = financials.maintenance_rate / HOURS_PER_YEAR;

        let mut cost = Vec::with_capacity(n);
        let mut revenue = Vec::with_capacity(n);
        let mut profit = Vec::with_capacity(n);
        let mut cumulative_revenue: Vec<f64> = Vec::with_capacity(n);
        let mut cumulative_profit = Vec::with_capacity(n);

        for (i, &watts) in series.watts().iter().enumerate() {
            let step_cost =
                construction_cost + (i + 1) as f64 * hourly_maintenance * construction_cost;
            let step_revenue = financials.revenue_per_kwh * watts / WATTS_PER_KW;
            let prev_cum_revenue = if i == 0 { 0.0 } else { cumulative_revenue[i - 1] };
            let cum_revenue = step_revenue + prev_cum_revenue;

            let cum_profit = match self.mode {
                CumulativeProfitMode::Literal => step_revenue + prev_cum_revenue - step_cost,
                CumulativeProfitMode::Corrected => cum_revenue - step_cost,
            };

            cost.push(step_cost);
            revenue.push(step_revenue);
            profit.push(step_revenue - step_cost);
            cumulative_revenue.push(cum_revenue);
            cumulative_profit.push(cum_profit);
        }

        let time_span_years = n as f64 / HOURS_PER_YEAR;
        let total_energy_wh = series.total_energy_wh();
        let total_revenue: f64 = revenue.iter().sum();
        let total_cost = cost.last().copied().unwrap_or(construction_cost);
        let total_profit = total_revenue - total_cost;
        let break_even = BreakEven::estimate(
            construction_cost,
            financials.maintenance_rate,
            total_revenue,
            time_span_years,
        );

        debug!(
            turbine = %financials.turbine_type,
            steps = n,
            total_revenue,
            total_cost,
            ?break_even,
            "projected cash flows"
        );

        CashflowProjection {
            financials: financials.clone(),
            mode: self.mode,
            timestamps: series.timestamps().to_vec(),
            power_w: series.watts().to_vec(),
            cost,
            revenue,
            profit,
            cumulative_revenue,
            cumulative_profit,
            total_energy_wh,
            total_revenue,
            total_cost,
            total_profit,
            time_span_years,
            break_even,
        }
    }
}

/// Validates one turbine's inputs, tagging errors with its comparison index.
pub(crate) fn validate_inputs(
    series: &PowerSeries,
    financials: &TurbineFinancials,
    index: Option<usize>,
) -> Result<(), ProjectionError> {
    if series.is_empty() {
        return Err(ProjectionError::InvalidInput {
            turbine: financials.turbine_type.clone(),
            index,
            reason: "power series is empty".to_string(),
        });
    }
    financials.validate(index)
}

/// Projects with the default (literal) cumulative-profit formula.
///
/// # Errors
///
/// See [`ProjectionEngine::project`].
pub fn project(
    series: &PowerSeries,
    financials: &TurbineFinancials,
) -> Result<CashflowProjection, ProjectionError> {
    ProjectionEngine::default().project(series, financials)
}

//! Multi-turbine comparison over a shared weather horizon.

use serde::Serialize;
use tracing::info;

use super::error::ProjectionError;
use super::kpi::SummaryRow;
use super::projection::{CashflowProjection, ProjectionEngine, validate_inputs};
use super::types::{PowerSeries, TurbineFinancials};

/// Result of comparing several turbines under one revenue rate.
///
/// `projections` and `summary` are indexed by turbine in input order.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Revenue per kWh applied to every turbine.
    pub revenue_per_kwh: f64,
    /// Full per-step projection for each turbine.
    pub projections: Vec<CashflowProjection>,
    /// One summary row per turbine.
    pub summary: Vec<SummaryRow>,
}

impl Comparison {
    /// Number of turbines compared.
    pub fn len(&self) -> usize {
        self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    /// Length of the shared horizon in years.
    pub fn time_span_years(&self) -> f64 {
        self.projections
            .first()
            .map_or(0.0, CashflowProjection::time_span_years)
    }
}

impl ProjectionEngine {
    /// Projects every turbine with one shared revenue rate.
    ///
    /// All inputs are validated before any projection runs, so either every
    /// turbine gets a row or the whole call fails.
    ///
    /// # Arguments
    ///
    /// * `series` - One power series per turbine, aligned to the same steps
    /// * `financials` - One parameter set per turbine; its own
    ///   `revenue_per_kwh` is replaced by `shared_revenue_per_kwh`
    /// * `shared_revenue_per_kwh` - Revenue rate applied to all turbines
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidInput`] naming the first malformed
    /// turbine: empty or misaligned series, bad financial parameters, a
    /// list-length mismatch, or no turbines at all. A negative or non-finite
    /// shared rate is reported against the comparison, not a turbine.
    pub fn compare(
        &self,
        series: &[PowerSeries],
        financials: &[TurbineFinancials],
        shared_revenue_per_kwh: f64,
    ) -> Result<Comparison, ProjectionError> {
        if financials.is_empty() {
            return Err(ProjectionError::InvalidInput {
                turbine: "comparison".to_string(),
                index: None,
                reason: "at least one turbine is required".to_string(),
            });
        }
        if series.len() != financials.len() {
            let index = series.len().min(financials.len());
            let turbine = financials
                .get(index)
                .map_or_else(|| "unnamed".to_string(), |f| f.turbine_type.clone());
            return Err(ProjectionError::InvalidInput {
                turbine,
                index: Some(index),
                reason: format!(
                    "{} power series supplied for {} turbines",
                    series.len(),
                    financials.len()
                ),
            });
        }

        if !shared_revenue_per_kwh.is_finite() || shared_revenue_per_kwh < 0.0 {
            return Err(ProjectionError::InvalidInput {
                turbine: "comparison".to_string(),
                index: None,
                reason: format!(
                    "shared revenue_per_kwh must be >= 0, got {shared_revenue_per_kwh}"
                ),
            });
        }

        let priced: Vec<TurbineFinancials> = financials
            .iter()
            .map(|f| TurbineFinancials {
                revenue_per_kwh: shared_revenue_per_kwh,
                ..f.clone()
            })
            .collect();

        let horizon = series[0].len();
        for (i, (s, f)) in series.iter().zip(&priced).enumerate() {
            validate_inputs(s, f, Some(i))?;
            if s.len() != horizon {
                return Err(ProjectionError::InvalidInput {
                    turbine: f.turbine_type.clone(),
                    index: Some(i),
                    reason: format!(
                        "power series has {} steps, expected {horizon} to match turbine #1",
                        s.len()
                    ),
                });
            }
        }

        let projections: Vec<CashflowProjection> = series
            .iter()
            .zip(&priced)
            .map(|(s, f)| self.project_unchecked(s, f))
            .collect();
        let summary = projections.iter().map(SummaryRow::from_projection).collect();

        info!(
            turbines = projections.len(),
            steps = horizon,
            revenue_per_kwh = shared_revenue_per_kwh,
            "compared turbines"
        );

        Ok(Comparison {
            revenue_per_kwh: shared_revenue_per_kwh,
            projections,
            summary,
        })
    }
}

/// Compares turbines with the default (literal) cumulative-profit formula.
///
/// # Errors
///
/// See [`ProjectionEngine::compare`].
pub fn compare(
    series: &[PowerSeries],
    financials: &[TurbineFinancials],
    shared_revenue_per_kwh: f64,
) -> Result<Comparison, ProjectionError> {
    ProjectionEngine::default().compare(series, financials, shared_revenue_per_kwh)
}

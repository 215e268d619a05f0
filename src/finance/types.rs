//! Core projection types: power series, turbine financials, and projection options.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::{ProjectionError, SeriesError};

/// Number of hourly steps in one (non-leap) year.
///
/// Both the time span of a series and the maintenance accrual rate are
/// derived from this constant, so every series is treated as hourly.
pub const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Watts per kilowatt.
pub const WATTS_PER_KW: f64 = 1_000.0;

/// Watt-hours per megawatt-hour.
pub const WH_PER_MWH: f64 = 1_000_000.0;

/// Ordered power-output series produced by an external power model.
///
/// Holds one `(timestamp, watts)` pair per hourly step. Timestamps are only
/// carried for reporting and export; the projection arithmetic uses the
/// step index alone.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use turbine_roi::finance::types::PowerSeries;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let series = PowerSeries::hourly(start, vec![0.0, 1500.0, 2500.0]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.total_energy_wh(), 4000.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PowerSeries {
    timestamps: Vec<NaiveDateTime>,
    watts: Vec<f64>,
}

impl PowerSeries {
    /// Builds a series from parallel timestamp and power vectors.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] if the vectors differ in length, timestamps
    /// are not strictly increasing, or any power value is negative or not finite.
    pub fn new(timestamps: Vec<NaiveDateTime>, watts: Vec<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != watts.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: watts.len(),
            });
        }
        if let Some(step) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SeriesError::NonIncreasingTimestamp { step: step + 1 });
        }
        if let Some((step, &value)) = watts
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SeriesError::InvalidPower { step, value });
        }
        Ok(Self { timestamps, watts })
    }

    /// Builds an hourly series starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] if any power value is negative or not finite.
    pub fn hourly(start: NaiveDateTime, watts: Vec<f64>) -> Result<Self, SeriesError> {
        let timestamps = (0..watts.len())
            .map(|i| start + Duration::hours(i as i64))
            .collect();
        Self::new(timestamps, watts)
    }

    /// Number of steps in the series.
    pub fn len(&self) -> usize {
        self.watts.len()
    }

    /// Returns `true` if the series has no steps.
    pub fn is_empty(&self) -> bool {
        self.watts.is_empty()
    }

    /// Power values in watts, in input order.
    pub fn watts(&self) -> &[f64] {
        &self.watts
    }

    /// Step timestamps, in input order.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Sum of all power values, interpreted as watt-hours over hourly steps.
    pub fn total_energy_wh(&self) -> f64 {
        self.watts.iter().sum()
    }
}

/// Economic parameters of one turbine variant.
///
/// Constructed once per analysis from configuration or API input and never
/// mutated afterwards. The engine validates it but never substitutes
/// defaults; that is the caller's job (see [`crate::config`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineFinancials {
    /// Turbine model name; doubles as the label in reports.
    pub turbine_type: String,
    /// Hub height in metres. Consumed by the power model only.
    pub hub_height_m: f64,
    /// One-off construction cost (currency units, must be > 0).
    pub construction_cost: f64,
    /// Annual maintenance as a fraction of construction cost (>= 0).
    pub maintenance_rate: f64,
    /// Revenue per kWh delivered (>= 0).
    pub revenue_per_kwh: f64,
}

impl TurbineFinancials {
    /// Annual maintenance cost: `construction_cost * maintenance_rate`.
    pub fn annual_maintenance_cost(&self) -> f64 {
        self.construction_cost * self.maintenance_rate
    }

    /// Checks the parameters the engine depends on.
    ///
    /// `index` is the turbine's position in a comparison, if any, and is
    /// carried into the error so callers can point at the offending entry.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidInput`] on a non-positive construction
    /// cost, a negative maintenance rate, or a negative revenue rate.
    pub fn validate(&self, index: Option<usize>) -> Result<(), ProjectionError> {
        let invalid = |reason: String| ProjectionError::InvalidInput {
            turbine: self.turbine_type.clone(),
            index,
            reason,
        };
        if !self.construction_cost.is_finite() || self.construction_cost <= 0.0 {
            return Err(invalid(format!(
                "construction_cost must be > 0, got {}",
                self.construction_cost
            )));
        }
        if !self.maintenance_rate.is_finite() || self.maintenance_rate < 0.0 {
            return Err(invalid(format!(
                "maintenance_rate must be >= 0, got {}",
                self.maintenance_rate
            )));
        }
        if !self.revenue_per_kwh.is_finite() || self.revenue_per_kwh < 0.0 {
            return Err(invalid(format!(
                "revenue_per_kwh must be >= 0, got {}",
                self.revenue_per_kwh
            )));
        }
        Ok(())
    }
}

/// How the cumulative profit column is built.
///
/// `Literal` reproduces the historical calculation, which subtracts the
/// current step's cost from the *previous* step's cumulative revenue plus
/// the current revenue. `Corrected` uses `cumulative_revenue[i] - cost[i]`.
/// Since `revenue[i] + cumulative_revenue[i-1]` is how `cumulative_revenue[i]`
/// is built, the two produce identical results; `Corrected` only names the
/// intended formula explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CumulativeProfitMode {
    /// Historical formula kept for parity with earlier reports.
    #[default]
    Literal,
    /// Cumulative revenue through the current step minus accrued cost.
    Corrected,
}

impl fmt::Display for CumulativeProfitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Corrected => f.write_str("corrected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    fn financials() -> TurbineFinancials {
        TurbineFinancials {
            turbine_type: "E-126/4200".to_string(),
            hub_height_m: 135.0,
            construction_cost: 10_000_000.0,
            maintenance_rate: 0.02,
            revenue_per_kwh: 0.07,
        }
    }

    #[test]
    fn hourly_series_spaces_timestamps_one_hour_apart() {
        let series = PowerSeries::hourly(start(), vec![1.0, 2.0, 3.0]).expect("valid series");
        let ts = series.timestamps();
        assert_eq!(ts[1] - ts[0], Duration::hours(1));
        assert_eq!(ts[2] - ts[1], Duration::hours(1));
    }

    #[test]
    fn series_rejects_length_mismatch() {
        let err = PowerSeries::new(vec![start()], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SeriesError::LengthMismatch { .. }));
    }

    #[test]
    fn series_rejects_repeated_timestamp() {
        let err = PowerSeries::new(vec![start(), start()], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SeriesError::NonIncreasingTimestamp { step: 1 }));
    }

    #[test]
    fn series_rejects_negative_power() {
        let err = PowerSeries::hourly(start(), vec![1.0, -2.0]).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidPower { step: 1, .. }));
    }

    #[test]
    fn series_rejects_nan_power() {
        let err = PowerSeries::hourly(start(), vec![f64::NAN]).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidPower { step: 0, .. }));
    }

    #[test]
    fn empty_series_is_constructible() {
        let series = PowerSeries::hourly(start(), Vec::new()).expect("empty is allowed");
        assert!(series.is_empty());
        assert_eq!(series.total_energy_wh(), 0.0);
    }

    #[test]
    fn annual_maintenance_is_rate_times_cost() {
        assert_eq!(financials().annual_maintenance_cost(), 200_000.0);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(financials().validate(None).is_ok());
    }

    #[test]
    fn validate_rejects_zero_construction_cost() {
        let mut f = financials();
        f.construction_cost = 0.0;
        let err = f.validate(Some(1)).unwrap_err();
        match err {
            ProjectionError::InvalidInput { index, turbine, .. } => {
                assert_eq!(index, Some(1));
                assert_eq!(turbine, "E-126/4200");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_maintenance() {
        let mut f = financials();
        f.maintenance_rate = -0.01;
        assert!(f.validate(None).is_err());
    }

    #[test]
    fn mode_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: CumulativeProfitMode,
        }
        let w: Wrapper = toml::from_str("mode = \"corrected\"").expect("should parse");
        assert_eq!(w.mode, CumulativeProfitMode::Corrected);
    }
}

//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use turbine_roi::finance::{PowerSeries, TurbineFinancials};

/// First timestamp of every fixture series (2024-01-01 00:00).
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

/// Hourly series starting at [`start`].
pub fn hourly(watts: Vec<f64>) -> PowerSeries {
    PowerSeries::hourly(start(), watts).expect("valid series")
}

/// Constant output for `steps` hours.
pub fn constant(watts: f64, steps: usize) -> PowerSeries {
    hourly(vec![watts; steps])
}

/// Turbine financials with a 135 m hub.
pub fn financials(
    name: &str,
    construction_cost: f64,
    maintenance_rate: f64,
    revenue_per_kwh: f64,
) -> TurbineFinancials {
    TurbineFinancials {
        turbine_type: name.to_string(),
        hub_height_m: 135.0,
        construction_cost,
        maintenance_rate,
        revenue_per_kwh,
    }
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

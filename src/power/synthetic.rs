//! Seeded synthetic power output for demos and tests.
//!
//! This is a stand-in for the external power model, not a physical model:
//! an AR(1) wind-speed process mapped through a generic power curve.

use chrono::NaiveDateTime;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::PowerSourceError;
use crate::finance::types::{PowerSeries, WATTS_PER_KW};

/// Wind speed below which the turbine produces nothing (m/s).
pub const CUT_IN_MS: f64 = 3.0;
/// Wind speed at which rated power is reached (m/s).
pub const RATED_MS: f64 = 12.0;
/// Wind speed above which the turbine shuts down (m/s).
pub const CUT_OUT_MS: f64 = 25.0;

/// Hourly wind-power generator with temporally correlated wind speed.
///
/// Wind speed evolves as:
/// ```text
/// v(t) = mean + alpha * (v(t-1) - mean) + sigma * epsilon(t)
/// ```
/// and is clamped at zero. Power follows a cubic ramp between cut-in and
/// rated speed, stays at rated power up to cut-out, and drops to zero above.
#[derive(Debug, Clone)]
pub struct SyntheticWind {
    /// Rated power (kW).
    pub rated_kw: f64,
    /// Long-run mean wind speed at hub height (m/s).
    pub mean_wind_ms: f64,
    /// AR(1) persistence (0.0 = uncorrelated, 1.0 = frozen).
    pub alpha: f64,
    /// Innovation standard deviation (m/s).
    pub sigma_ms: f64,
    speed_ms: f64,
    rng: StdRng,
}

impl SyntheticWind {
    /// Creates a generator starting at the mean wind speed.
    ///
    /// # Arguments
    ///
    /// * `rated_kw` - Rated power in kW
    /// * `mean_wind_ms` - Mean wind speed in m/s
    /// * `seed` - Random seed for reproducible output
    pub fn new(rated_kw: f64, mean_wind_ms: f64, seed: u64) -> Self {
        Self {
            rated_kw: rated_kw.max(0.0),
            mean_wind_ms: mean_wind_ms.max(0.0),
            alpha: 0.9,
            sigma_ms: 1.5,
            speed_ms: mean_wind_ms.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advances the wind process by one hour and returns the new speed.
    fn advance(&mut self) -> f64 {
        let eps = gaussian_noise(&mut self.rng, self.sigma_ms);
        let next = self.mean_wind_ms + self.alpha * (self.speed_ms - self.mean_wind_ms) + eps;
        self.speed_ms = next.max(0.0);
        self.speed_ms
    }

    /// Power output in watts for the next hour.
    pub fn next_watts(&mut self) -> f64 {
        let v = self.advance();
        power_curve_kw(v, self.rated_kw) * WATTS_PER_KW
    }

    /// Generates an hourly series of `hours` steps starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`PowerSourceError`] if the series cannot be built.
    pub fn series(
        &mut self,
        start: NaiveDateTime,
        hours: usize,
    ) -> Result<PowerSeries, PowerSourceError> {
        let watts = (0..hours).map(|_| self.next_watts()).collect();
        Ok(PowerSeries::hourly(start, watts)?)
    }
}

/// Generic power curve: cubic ramp from cut-in to rated speed.
pub fn power_curve_kw(speed_ms: f64, rated_kw: f64) -> f64 {
    if !(CUT_IN_MS..CUT_OUT_MS).contains(&speed_ms) {
        return 0.0;
    }
    if speed_ms >= RATED_MS {
        return rated_kw;
    }
    let frac = (speed_ms.powi(3) - CUT_IN_MS.powi(3)) / (RATED_MS.powi(3) - CUT_IN_MS.powi(3));
    rated_kw * frac
}

/// Gaussian noise via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos() * std_dev
}

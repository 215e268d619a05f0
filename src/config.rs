//! TOML-based analysis configuration and preset definitions.
//!
//! Every recognized option is listed here with its default. Values are
//! validated once, after loading, regardless of whether they came from a
//! file, a preset, or CLI overrides.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::finance::types::{CumulativeProfitMode, PowerSeries, TurbineFinancials};
use crate::power::{self, PowerSourceError, SyntheticWind};

/// Top-level analysis configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`AnalysisConfig::from_toml_file`] or use [`AnalysisConfig::demo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Site description used in reports.
    #[serde(default)]
    pub site: SiteConfig,
    /// Fallback values for missing or zero turbine parameters.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Revenue rate shared by all turbines.
    #[serde(default)]
    pub market: MarketConfig,
    /// Projection options.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Turbines to analyse, in report order.
    #[serde(default, rename = "turbine")]
    pub turbines: Vec<TurbineConfig>,
}

/// Site description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Free-text location label.
    pub location: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            location: "unspecified".to_string(),
        }
    }
}

/// Fallback values applied when a turbine parameter is missing or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Hub height (m).
    pub hub_height_m: f64,
    /// Construction cost per turbine.
    pub construction_cost: f64,
    /// Annual maintenance as a fraction of construction cost.
    pub maintenance_rate: f64,
    /// Revenue per kWh.
    pub revenue_per_kwh: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hub_height_m: 135.0,
            construction_cost: 10_000_000.0,
            maintenance_rate: 0.02,
            revenue_per_kwh: 0.07,
        }
    }
}

/// Revenue rate shared by every turbine in a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Revenue per kWh; missing or zero falls back to `defaults.revenue_per_kwh`.
    pub revenue_per_kwh: Option<f64>,
}

/// Projection options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Cumulative-profit formula: `"literal"` or `"corrected"`.
    pub cumulative_profit: CumulativeProfitMode,
}

/// One turbine entry (`[[turbine]]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurbineConfig {
    /// Turbine model name.
    pub turbine_type: String,
    /// Hub height (m).
    #[serde(default)]
    pub hub_height_m: Option<f64>,
    /// Construction cost.
    #[serde(default)]
    pub construction_cost: Option<f64>,
    /// Annual maintenance fraction.
    #[serde(default)]
    pub maintenance_rate: Option<f64>,
    /// Where this turbine's power series comes from.
    pub power: PowerSourceConfig,
}

/// Power series source for one turbine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase", deny_unknown_fields)]
pub enum PowerSourceConfig {
    /// CSV file with `timestamp,power_w` columns.
    Csv {
        /// Path to the CSV file, relative to the working directory.
        path: PathBuf,
    },
    /// Seeded synthetic wind power.
    Synthetic {
        /// Rated power (kW).
        rated_kw: f64,
        /// Mean wind speed at hub height (m/s).
        mean_wind_ms: f64,
        /// Number of hourly steps.
        hours: usize,
        /// Random seed.
        #[serde(default)]
        seed: u64,
        /// First timestamp, e.g. `"2024-01-01T00:00:00"`.
        #[serde(default = "default_start")]
        start: NaiveDateTime,
    },
}

pub(crate) fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"turbine[0].construction_cost"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// A turbine ready for projection: financials with defaults applied plus
/// its power series.
#[derive(Debug, Clone)]
pub struct ResolvedTurbine {
    pub financials: TurbineFinancials,
    pub series: PowerSeries,
}

/// Every configured turbine resolved against one shared revenue rate.
#[derive(Debug, Clone)]
pub struct ResolvedComparison {
    pub revenue_per_kwh: f64,
    pub turbines: Vec<ResolvedTurbine>,
}

/// Substitutes `default` when `value` is missing or zero.
pub(crate) fn or_default(value: Option<f64>, default: f64, field: &str) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => {
            warn!(field, default, "default value will be used");
            default
        }
    }
}

fn synthetic(
    turbine_type: &str,
    rated_kw: f64,
    mean_wind_ms: f64,
    hours: usize,
    seed: u64,
) -> TurbineConfig {
    TurbineConfig {
        turbine_type: turbine_type.to_string(),
        hub_height_m: None,
        construction_cost: None,
        maintenance_rate: None,
        power: PowerSourceConfig::Synthetic {
            rated_kw,
            mean_wind_ms,
            hours,
            seed,
            start: default_start(),
        },
    }
}

impl AnalysisConfig {
    /// One turbine, one week of hourly synthetic output.
    pub fn demo() -> Self {
        Self {
            site: SiteConfig {
                location: "Demo site".to_string(),
            },
            turbines: vec![synthetic("E-126/4200", 4200.0, 8.0, 168, 42)],
            ..Self::default()
        }
    }

    /// Two turbines over the same week, different construction costs.
    pub fn compare_demo() -> Self {
        let mut small = synthetic("V90/2000", 2000.0, 8.0, 168, 42);
        small.construction_cost = Some(3_500_000.0);
        small.hub_height_m = Some(105.0);
        let mut large = synthetic("E-126/4200", 4200.0, 8.0, 168, 42);
        large.maintenance_rate = Some(0.025);
        Self {
            site: SiteConfig {
                location: "Demo site".to_string(),
            },
            turbines: vec![small, large],
            ..Self::default()
        }
    }

    /// One turbine over two years of hourly output.
    pub fn historical_demo() -> Self {
        let mut turbine = synthetic("E-126/4200", 4200.0, 7.0, 2 * 8760, 7);
        turbine.construction_cost = Some(6_000_000.0);
        Self {
            site: SiteConfig {
                location: "Demo site".to_string(),
            },
            turbines: vec![turbine],
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "compare_demo", "historical_demo"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "compare_demo" => Ok(Self::compare_demo()),
            "historical_demo" => Ok(Self::historical_demo()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Zero values are not errors: they select the documented default.
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check_non_negative = |field: String, value: f64| {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field,
                    message: format!("must be a finite number >= 0, got {value}"),
                });
            }
        };

        let d = &self.defaults;
        check_non_negative("defaults.hub_height_m".into(), d.hub_height_m);
        check_non_negative("defaults.construction_cost".into(), d.construction_cost);
        check_non_negative("defaults.maintenance_rate".into(), d.maintenance_rate);
        check_non_negative("defaults.revenue_per_kwh".into(), d.revenue_per_kwh);
        if let Some(r) = self.market.revenue_per_kwh {
            check_non_negative("market.revenue_per_kwh".into(), r);
        }

        for (i, t) in self.turbines.iter().enumerate() {
            let opt_fields = [
                ("hub_height_m", t.hub_height_m),
                ("construction_cost", t.construction_cost),
                ("maintenance_rate", t.maintenance_rate),
            ];
            for (name, value) in opt_fields {
                if let Some(v) = value {
                    check_non_negative(format!("turbine[{i}].{name}"), v);
                }
            }
        }

        if d.construction_cost <= 0.0 {
            errors.push(ConfigError {
                field: "defaults.construction_cost".into(),
                message: "must be > 0".into(),
            });
        }

        if self.turbines.is_empty() {
            errors.push(ConfigError {
                field: "turbine".into(),
                message: "at least one [[turbine]] entry is required".into(),
            });
        }

        for (i, t) in self.turbines.iter().enumerate() {
            if t.turbine_type.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("turbine[{i}].turbine_type"),
                    message: "must not be empty".into(),
                });
            }
            match &t.power {
                PowerSourceConfig::Csv { path } => {
                    if path.as_os_str().is_empty() {
                        errors.push(ConfigError {
                            field: format!("turbine[{i}].power.path"),
                            message: "must not be empty".into(),
                        });
                    }
                }
                PowerSourceConfig::Synthetic {
                    rated_kw,
                    mean_wind_ms,
                    hours,
                    ..
                } => {
                    if !rated_kw.is_finite() || *rated_kw <= 0.0 {
                        errors.push(ConfigError {
                            field: format!("turbine[{i}].power.rated_kw"),
                            message: "must be > 0".into(),
                        });
                    }
                    if !mean_wind_ms.is_finite() || *mean_wind_ms < 0.0 {
                        errors.push(ConfigError {
                            field: format!("turbine[{i}].power.mean_wind_ms"),
                            message: "must be >= 0".into(),
                        });
                    }
                    if *hours == 0 {
                        errors.push(ConfigError {
                            field: format!("turbine[{i}].power.hours"),
                            message: "must be > 0".into(),
                        });
                    }
                }
            }
        }

        errors
    }

    /// Shared revenue rate with the default applied.
    pub fn revenue_per_kwh(&self) -> f64 {
        or_default(
            self.market.revenue_per_kwh,
            self.defaults.revenue_per_kwh,
            "market.revenue_per_kwh",
        )
    }

    /// Turbine financials with defaults substituted for missing or zero values.
    pub fn financials(&self) -> Vec<TurbineFinancials> {
        let revenue_per_kwh = self.revenue_per_kwh();
        self.turbines
            .iter()
            .enumerate()
            .map(|(i, t)| self.turbine_financials(i, t, revenue_per_kwh))
            .collect()
    }

    fn turbine_financials(
        &self,
        index: usize,
        turbine: &TurbineConfig,
        revenue_per_kwh: f64,
    ) -> TurbineFinancials {
        let d = &self.defaults;
        TurbineFinancials {
            turbine_type: turbine.turbine_type.clone(),
            hub_height_m: or_default(
                turbine.hub_height_m,
                d.hub_height_m,
                &format!("turbine[{index}].hub_height_m"),
            ),
            construction_cost: or_default(
                turbine.construction_cost,
                d.construction_cost,
                &format!("turbine[{index}].construction_cost"),
            ),
            maintenance_rate: or_default(
                turbine.maintenance_rate,
                d.maintenance_rate,
                &format!("turbine[{index}].maintenance_rate"),
            ),
            revenue_per_kwh,
        }
    }

    /// Resolves one turbine by type name, or the first turbine if `name` is
    /// `None`. Other turbines are neither defaulted nor loaded.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no turbine matches or its power series
    /// cannot be loaded.
    pub fn resolve_turbine(&self, name: Option<&str>) -> Result<ResolvedTurbine, ConfigError> {
        let index = match name {
            Some(name) => self
                .turbines
                .iter()
                .position(|t| t.turbine_type == name)
                .ok_or_else(|| ConfigError {
                    field: "turbine".to_string(),
                    message: format!("no turbine named \"{name}\" in configuration"),
                })?,
            None => 0,
        };
        let turbine = self.turbines.get(index).ok_or_else(|| ConfigError {
            field: "turbine".to_string(),
            message: "at least one [[turbine]] entry is required".to_string(),
        })?;

        let series = load_power(&turbine.power).map_err(|e| ConfigError {
            field: format!("turbine[{index}].power"),
            message: e.to_string(),
        })?;
        let financials = self.turbine_financials(index, turbine, self.revenue_per_kwh());
        Ok(ResolvedTurbine { financials, series })
    }

    /// Resolves every turbine against the shared revenue rate, which is
    /// resolved once.
    ///
    /// # Errors
    ///
    /// Returns a [`PowerSourceError`] if any power series cannot be loaded.
    pub fn resolve_comparison(&self) -> Result<ResolvedComparison, PowerSourceError> {
        let revenue_per_kwh = self.revenue_per_kwh();
        let turbines = self
            .turbines
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let series = load_power(&t.power)?;
                let financials = self.turbine_financials(i, t, revenue_per_kwh);
                Ok(ResolvedTurbine { financials, series })
            })
            .collect::<Result<Vec<_>, PowerSourceError>>()?;
        Ok(ResolvedComparison {
            revenue_per_kwh,
            turbines,
        })
    }
}

/// Loads one power series from its configured source.
///
/// # Errors
///
/// Returns a [`PowerSourceError`] if the file cannot be read or parsed.
pub fn load_power(source: &PowerSourceConfig) -> Result<PowerSeries, PowerSourceError> {
    match source {
        PowerSourceConfig::Csv { path } => power::load_csv(path),
        PowerSourceConfig::Synthetic {
            rated_kw,
            mean_wind_ms,
            hours,
            seed,
            start,
        } => SyntheticWind::new(*rated_kw, *mean_wind_ms, *seed).series(*start, *hours),
    }
}

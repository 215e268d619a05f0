use std::path::Path;

use turbine_roi::config::AnalysisConfig;
use turbine_roi::finance::{CumulativeProfitMode, ProjectionEngine};

fn load(path: &str) -> AnalysisConfig {
    let cfg = AnalysisConfig::from_toml_file(Path::new(path)).expect("scenario should parse");
    let errors = cfg.validate();
    assert!(errors.is_empty(), "{path} should be valid: {errors:?}");
    cfg
}

#[test]
fn compare_scenario_applies_defaults_and_shared_rate() {
    let cfg = load("scenarios/compare.toml");
    assert_eq!(cfg.projection.cumulative_profit, CumulativeProfitMode::Corrected);

    let financials = cfg.financials();
    assert_eq!(financials.len(), 3);
    assert!(financials.iter().all(|f| f.revenue_per_kwh == 0.07));
    // third turbine leaves cost and hub height to the defaults
    assert_eq!(financials[2].construction_cost, 10_000_000.0);
    assert_eq!(financials[2].hub_height_m, 135.0);
    assert_eq!(financials[0].hub_height_m, 105.0);
}

#[test]
fn compare_scenario_resolves_aligned_series() {
    let cfg = load("scenarios/compare.toml");
    let resolved = cfg.resolve_comparison().expect("power series should load");
    assert_eq!(resolved.revenue_per_kwh, 0.07);
    assert!(resolved.turbines.iter().all(|r| r.series.len() == 720));

    let (financials, series): (Vec<_>, Vec<_>) = resolved
        .turbines
        .into_iter()
        .map(|r| (r.financials, r.series))
        .unzip();
    let comparison = ProjectionEngine::new(cfg.projection.cumulative_profit)
        .compare(&series, &financials, resolved.revenue_per_kwh)
        .expect("comparison should succeed");
    assert_eq!(comparison.summary.len(), 3);
}

#[test]
fn historical_scenario_loads_csv_series() {
    let cfg = load("scenarios/historical.toml");
    let resolved = cfg.resolve_turbine(None).expect("CSV should load");
    assert_eq!(resolved.series.len(), 48);
    assert_eq!(resolved.financials.revenue_per_kwh, 0.085);
}

#[test]
fn misspelled_power_key_fails_to_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("typo.toml");
    std::fs::write(
        &path,
        r#"
[[turbine]]
turbine_type = "T"
power = { source = "synthetic", rated_kw = 2000, mean_wind_ms = 8, hours = 24, sede = 99 }
"#,
    )
    .expect("write config");

    let err = AnalysisConfig::from_toml_file(&path).unwrap_err();
    assert!(err.message.contains("sede"), "unexpected message: {}", err.message);
}

#[test]
fn every_preset_projects() {
    for name in AnalysisConfig::PRESETS {
        let cfg = AnalysisConfig::from_preset(name).expect("preset should load");
        assert!(cfg.validate().is_empty(), "preset {name} should validate");
        let engine = ProjectionEngine::new(cfg.projection.cumulative_profit);
        let resolved = cfg.resolve_comparison().expect("preset series should load");
        for turbine in resolved.turbines {
            let p = engine
                .project(&turbine.series, &turbine.financials)
                .expect("preset projection should succeed");
            assert_eq!(p.len(), turbine.series.len());
        }
    }
}

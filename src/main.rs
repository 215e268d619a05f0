//! turbine-roi entry point: CLI wiring and config-driven projections.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use turbine_roi::cli::{Cli, Command, ConfigSource};
use turbine_roi::config::{AnalysisConfig, ResolvedTurbine};
use turbine_roi::finance::ProjectionEngine;
use turbine_roi::io::export::export_csv;
use turbine_roi::reporting::{ComparisonReport, ProjectionReport};

/// Prints `msg` to stderr and exits with status 1.
fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads config: `--config` takes priority, then `--preset`, then `default_preset`.
fn load_config(source: &ConfigSource, default_preset: &str) -> AnalysisConfig {
    let loaded = if let Some(ref path) = source.config {
        AnalysisConfig::from_toml_file(path)
    } else {
        AnalysisConfig::from_preset(source.preset.as_deref().unwrap_or(default_preset))
    };
    let cfg = loaded.unwrap_or_else(|e| fail(e));

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn run_project(
    cfg: &AnalysisConfig,
    engine: ProjectionEngine,
    turbine: Option<&str>,
    out: Option<&Path>,
) {
    let ResolvedTurbine { financials, series } =
        cfg.resolve_turbine(turbine).unwrap_or_else(|e| fail(e));
    info!(turbine = %financials.turbine_type, steps = series.len(), "projecting");

    let projection = engine
        .project(&series, &financials)
        .unwrap_or_else(|e| fail(e));
    println!(
        "{}",
        ProjectionReport {
            location: &cfg.site.location,
            projection: &projection,
        }
    );

    if let Some(path) = out {
        if let Err(e) = export_csv(&projection, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Projection written to {}", path.display());
    }
}

fn run_compare(cfg: &AnalysisConfig, engine: ProjectionEngine, out_dir: Option<&Path>) {
    let resolved = cfg.resolve_comparison().unwrap_or_else(|e| fail(e));
    let (financials, series): (Vec<_>, Vec<_>) = resolved
        .turbines
        .into_iter()
        .map(|r| (r.financials, r.series))
        .unzip();

    let comparison = engine
        .compare(&series, &financials, resolved.revenue_per_kwh)
        .unwrap_or_else(|e| fail(e));
    println!(
        "{}",
        ComparisonReport {
            location: &cfg.site.location,
            comparison: &comparison,
        }
    );

    if let Some(dir) = out_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            fail(format!("cannot create \"{}\": {e}", dir.display()));
        }
        for (i, p) in comparison.projections.iter().enumerate() {
            let path = dir.join(csv_file_name(i, p.turbine()));
            if let Err(e) = export_csv(p, &path) {
                fail(format!("failed to write CSV: {e}"));
            }
            eprintln!("Projection written to {}", path.display());
        }
    }
}

/// File name for one turbine's export, e.g. `1_V90-2000.csv`.
fn csv_file_name(index: usize, turbine: &str) -> String {
    let slug: String = turbine
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{}_{slug}.csv", index + 1)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let default_preset = match cli.command {
        Command::Compare { .. } => "compare_demo",
        _ => "demo",
    };

    if let Command::Presets = cli.command {
        for name in AnalysisConfig::PRESETS {
            println!("{name}");
        }
        return;
    }

    let cfg = load_config(&cli.source, default_preset);
    let mode = cli
        .cumulative_profit
        .map(Into::into)
        .unwrap_or(cfg.projection.cumulative_profit);
    let engine = ProjectionEngine::new(mode);

    match cli.command {
        Command::Project { turbine, out } => {
            run_project(&cfg, engine, turbine.as_deref(), out.as_deref());
        }
        Command::Compare { out_dir } => run_compare(&cfg, engine, out_dir.as_deref()),
        Command::Presets => {}
        #[cfg(feature = "api")]
        Command::Serve { port } => {
            use std::net::SocketAddr;
            use std::sync::Arc;

            let state = Arc::new(turbine_roi::api::AppState { config: cfg });
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let rt = tokio::runtime::Runtime::new()
                .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
            if let Err(e) = rt.block_on(turbine_roi::api::serve(state, addr)) {
                fail(e);
            }
        }
    }
}

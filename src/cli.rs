//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::finance::types::CumulativeProfitMode;

/// Wind turbine energy-to-cash-flow projections.
#[derive(Debug, Parser)]
#[command(name = "turbine-roi", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Override the cumulative-profit formula from the config.
    #[arg(long, value_enum, global = true)]
    pub cumulative_profit: Option<ProfitModeArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the analysis configuration comes from.
///
/// If neither is given, the `demo` preset is used.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ConfigSource {
    /// Load configuration from a TOML file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (see `presets`).
    #[arg(long, global = true)]
    pub preset: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project cash flows for one turbine.
    Project {
        /// Turbine type to analyse; defaults to the first configured turbine.
        #[arg(long)]
        turbine: Option<String>,
        /// Export per-step projection data to CSV.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compare every configured turbine under one revenue rate.
    Compare {
        /// Export one projection CSV per turbine into this directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List built-in presets.
    Presets,
    /// Serve projections over HTTP.
    #[cfg(feature = "api")]
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

/// CLI spelling of [`CumulativeProfitMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfitModeArg {
    Literal,
    Corrected,
}

impl From<ProfitModeArg> for CumulativeProfitMode {
    fn from(arg: ProfitModeArg) -> Self {
        match arg {
            ProfitModeArg::Literal => Self::Literal,
            ProfitModeArg::Corrected => Self::Corrected,
        }
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::RiskLevel;

#[derive(Parser, Debug)]
#[command(name = "signal-sim", about = "Adaptive traffic signal simulator")]
pub struct Args {
    /// Output format for command results.
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: FormatArg,
    /// History log file used by save/history.
    #[arg(long, default_value = "history.jsonl", global = true)]
    pub store: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the signal rules for one set of counts.
    Calculate {
        #[arg(long, allow_negative_numbers = true)]
        pedestrians: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        vehicles: Option<i64>,
        #[arg(long)]
        peak_hour: bool,
        /// Scenario file (TOML or JSON) supplying the inputs instead of flags.
        #[arg(long, conflicts_with_all = ["pedestrians", "vehicles", "peak_hour"])]
        config: Option<PathBuf>,
        /// Append the computed run to the history log.
        #[arg(long)]
        save: bool,
    },
    /// Record a completed run in the history log.
    Save {
        #[arg(long, allow_negative_numbers = true)]
        pedestrians: i64,
        #[arg(long, allow_negative_numbers = true)]
        vehicles: i64,
        #[arg(long)]
        peak_hour: bool,
        #[arg(long, allow_negative_numbers = true)]
        green_time: i64,
        #[arg(long, value_enum)]
        risk: RiskArg,
        #[arg(long)]
        explanation: String,
    },
    /// List every recorded run in insertion order.
    History,
    /// Sample curve of green time against pedestrian count.
    Graph,
    /// Estimate counts from the mock density feed, then evaluate them.
    Estimate {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        peak_hour: bool,
        /// Number of estimate/evaluate cycles to run.
        #[arg(long, default_value_t = 1)]
        cycles: usize,
        /// Append each evaluated cycle to the history log.
        #[arg(long)]
        save: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RiskArg {
    Low,
    Moderate,
    High,
}

impl From<RiskArg> for RiskLevel {
    fn from(value: RiskArg) -> Self {
        match value {
            RiskArg::Low => RiskLevel::Low,
            RiskArg::Moderate => RiskLevel::Moderate,
            RiskArg::High => RiskLevel::High,
        }
    }
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|err| match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string()),
    })
}

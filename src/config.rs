use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::{BaseLocation, DEFAULT_ASSETS};

#[derive(Debug, Parser)]
#[command(name = "proddash", version, about = "Score daily productivity metrics from CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the metrics file, score every row and report.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Directory or http(s) URL the asset path is resolved against.
    #[arg(long, default_value = ".")]
    pub base: String,
    /// Asset path relative to --base. Known asset names are tried when omitted.
    #[arg(long)]
    pub asset: Option<String>,
    /// Write scored.csv, summary.json and report.txt here instead of printing.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub base: BaseLocation,
    pub assets: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub format: ReportFormat,
    pub verbose: bool,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let assets = match args.asset {
            Some(asset) => vec![asset],
            None => DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
        };
        Self {
            base: BaseLocation::parse(&args.base),
            assets,
            out_dir: args.out,
            format: args.format,
            verbose: args.verbose,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;

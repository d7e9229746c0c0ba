//! StructLab CLI — run market-structure analysis over a local candle file.
//!
//! Commands:
//! - `analyze` — load candles from CSV or kline JSON and print the analysis as JSON
//! - `config` — print the default analysis configuration as TOML
//!
//! Logs go to stderr (filter with `RUST_LOG`); stdout carries only the JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use structlab_core::data::{read_candles_csv, read_klines_file, validate_window};
use structlab_core::{AnalysisConfig, Candle, MarketAnalyzer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "structlab",
    about = "StructLab CLI — wave, volume-profile and smart-money structure analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a candle window and print the result as JSON.
    Analyze {
        /// Candle file (CSV with a timestamp,open,high,low,close,volume header, or kline JSON).
        input: PathBuf,

        /// Input file format.
        #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
        format: InputFormat,

        /// Which analysis to run.
        #[arg(long, value_enum, default_value_t = Method::All)]
        method: Method,

        /// Path to a TOML analysis config. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Skip the input window validation.
        #[arg(long, default_value_t = false)]
        skip_validation: bool,
    },
    /// Print the default analysis configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Csv,
    Klines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Waves,
    Volume,
    Smc,
    All,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            method,
            config,
            pretty,
            skip_validation,
        } => {
            let output = run_analyze(&input, format, method, config.as_deref(), skip_validation)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{rendered}");
            Ok(())
        }
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_candles(input: &Path, format: InputFormat) -> Result<Vec<Candle>> {
    let candles = match format {
        InputFormat::Csv => read_candles_csv(input),
        InputFormat::Klines => read_klines_file(input),
    }
    .with_context(|| format!("reading candles from {}", input.display()))?;

    if candles.is_empty() {
        bail!("{} contains no candles", input.display());
    }
    Ok(candles)
}

fn run_analyze(
    input: &Path,
    format: InputFormat,
    method: Method,
    config_path: Option<&Path>,
    skip_validation: bool,
) -> Result<serde_json::Value> {
    let config = load_config(config_path)?;
    let candles = load_candles(input, format)?;
    if !skip_validation {
        validate_window(&candles).context("input window failed validation")?;
    }

    let first = candles.first().and_then(Candle::datetime);
    let last = candles.last().and_then(Candle::datetime);
    info!(
        candles = candles.len(),
        from = ?first.map(|d| d.to_rfc3339()),
        to = ?last.map(|d| d.to_rfc3339()),
        ?method,
        "analyzing window"
    );

    let analyzer = MarketAnalyzer::new(config)?;
    let value = match method {
        Method::Waves => serde_json::to_value(analyzer.analyze_waves(&candles))?,
        Method::Volume => serde_json::to_value(analyzer.analyze_volume(&candles))?,
        Method::Smc => serde_json::to_value(analyzer.analyze_smart_money(&candles))?,
        Method::All => serde_json::to_value(analyzer.analyze(&candles))?,
    };
    Ok(value)
}

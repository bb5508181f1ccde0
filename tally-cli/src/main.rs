use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_core::{time::to_rfc3339_utc, DayClock, Event, SeriesConfig};
use tally_ingest::{parse_event_records, parse_points_payload, parse_snapshot_csv_path};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod state;

use output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "tally", version = VERSION, about = "Daily balance series from sparse snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resample a balance history file into one value per day
    Series(SeriesArgs),

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Default)]
struct SeriesArgs {
    /// History file: .json (points payload or record array) or .csv
    #[arg(long)]
    input: PathBuf,

    /// Trailing window length in days (overrides config)
    #[arg(long, conflicts_with = "full_history")]
    days: Option<u32>,

    /// One point per day that has events, no gap filling
    #[arg(long)]
    full_history: bool,

    /// Window ends on the day containing this instant: RFC 3339, or naive
    /// "YYYY-MM-DD HH:MM:SS" read in the --tz zone (default: now)
    #[arg(long)]
    anchor: Option<String>,

    /// IANA zone for day boundaries (default: config, else UTC)
    #[arg(long)]
    tz: Option<String>,

    /// Output format (default: config, else table)
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Read settings from this file instead of ~/.tally/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    // stdout carries results; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Series(args) => run_series(&args)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn run_series(args: &SeriesArgs) -> Result<()> {
    let cfg = match &args.config {
        Some(p) => config::load_config_from(p)?,
        None => config::load_config()?,
    };

    let mut series_cfg = cfg.series.clone();
    apply_overrides(&mut series_cfg, args)?;
    let format = args.output.unwrap_or(cfg.output.format);

    let clock = DayClock::from_name(&series_cfg.timezone)?;
    let events = load_events(&args.input, &clock)?;
    info!(
        events = events.len(),
        input = %args.input.display(),
        "loaded balance history"
    );

    let now = Utc::now();
    let series = series_cfg
        .run(&events, now)
        .with_context(|| format!("building series from {}", args.input.display()))?;
    info!(
        days = series.len(),
        anchor = %to_rfc3339_utc(series_cfg.anchor_end.unwrap_or(now)),
        "series ready"
    );

    print!("{}", output::render(&series, format)?);
    Ok(())
}

fn apply_overrides(cfg: &mut SeriesConfig, args: &SeriesArgs) -> Result<()> {
    if args.full_history {
        cfg.full_history = true;
    } else if let Some(days) = args.days {
        cfg.window_days = days;
        cfg.full_history = false;
    }

    // zone first: a naive --anchor is local to it
    if let Some(tz) = &args.tz {
        cfg.timezone = tz.clone();
    }
    cfg.validate()?;

    if let Some(raw) = &args.anchor {
        let clock = DayClock::from_name(&cfg.timezone)?;
        let anchor = clock
            .parse_instant(raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid --anchor '{raw}'"))?;
        cfg.anchor_end = Some(anchor);
    }
    Ok(())
}

fn load_events(path: &Path, clock: &DayClock) -> Result<Vec<Event>> {
    if !path.exists() {
        bail!("history file not found: {} (pass --input <path>)", path.display());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let events = if text.trim_start().starts_with('[') {
                parse_event_records(&text, clock)
            } else {
                parse_points_payload(&text, clock)
            };
            events.with_context(|| format!("parsing {}", path.display()))
        }
        Some("csv") => parse_snapshot_csv_path(path, clock),
        _ => bail!(
            "unsupported history file {} (expected .json or .csv)",
            path.display()
        ),
    }
}

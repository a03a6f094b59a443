use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use founder_core::{
    build_dashboard, calculate_momentum, generate_alerts, get_one_thing, prioritize_tasks,
    time::parse_instant, DashboardInput, Metric,
};
use founder_ingest::{load_snapshot, parse_metrics_csv};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod config;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "founder",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FOUNDER_BUILD_SHA"), ")"),
    about = "Founder productivity engine CLI"
)]
struct Cli {
    /// Config file (default: ~/.founder/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Everything the home screen shows: next actions, one thing, alerts, momentum
    Dashboard(SnapshotArgs),

    /// Rank open tasks by priority score
    Prioritize {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Limit number of tasks printed
        #[arg(long)]
        limit: Option<usize>,

        /// Show per-factor score breakdown
        #[arg(long)]
        explain: bool,
    },

    /// The single recommended next action
    OneThing(SnapshotArgs),

    /// This week's momentum score
    Momentum(SnapshotArgs),

    /// Attention alerts
    Alerts(SnapshotArgs),

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// JSON export document
    #[arg(long)]
    snapshot: PathBuf,

    /// Extra metrics CSV (date,type,value)
    #[arg(long)]
    metrics_csv: Option<PathBuf>,

    /// Evaluate as of this instant: RFC 3339, or "YYYY-MM-DD HH:MM" in the configured timezone
    #[arg(long)]
    now: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config_path = config::resolve_config_path(cli.config.as_deref())?;

    if let Command::Config { command } = &cli.command {
        return run_config_command(command, &config_path);
    }

    let cfg = config::load_config(&config_path)?;

    match cli.command {
        Command::Dashboard(args) => {
            let (input, now) = prepare(&args, &cfg)?;
            let d = build_dashboard(&input, now, &cfg.dashboard_config());
            emit(args.json, &d, || report::render_dashboard(&d, now))?;
        }

        Command::Prioritize {
            snapshot: args,
            limit,
            explain,
        } => {
            let (input, now) = prepare(&args, &cfg)?;
            let mut ranked = prioritize_tasks(&input.tasks, now);
            if let Some(n) = limit {
                ranked.truncate(n);
            }
            emit(args.json, &ranked, || {
                report::render_ranking(&ranked, explain.then_some(now))
            })?;
        }

        Command::OneThing(args) => {
            let (input, now) = prepare(&args, &cfg)?;
            let ranked = prioritize_tasks(&input.tasks, now);
            let one = get_one_thing(&ranked);
            emit(args.json, &one, || match one {
                Some(t) => report::render_ranking(std::slice::from_ref(t), None),
                None => "(no open tasks)\n".to_string(),
            })?;
        }

        Command::Momentum(args) => {
            let (input, now) = prepare(&args, &cfg)?;
            let m = calculate_momentum(&input.metrics, now, &cfg.momentum);
            emit(args.json, &m, || report::render_momentum(&m))?;
        }

        Command::Alerts(args) => {
            let (input, now) = prepare(&args, &cfg)?;
            let alerts = generate_alerts(&input.tasks, &input.habit_logs, &input.metrics, now);
            emit(args.json, &alerts, || report::render_alerts(&alerts))?;
        }

        Command::Config { .. } => {}
    }

    Ok(())
}

fn run_config_command(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(path)?,
        ConfigCommand::Show => {
            let cfg = config::load_config(path)?;
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
        }
        ConfigCommand::Path => println!("{}", path.display()),
    }
    Ok(())
}

/// Load the snapshot (plus optional CSV) and resolve "now" once for the whole run.
fn prepare(args: &SnapshotArgs, cfg: &Config) -> Result<(DashboardInput, DateTime<Utc>)> {
    let now = resolve_now(args.now.as_deref(), &cfg.general.timezone)?;

    let mut snapshot = load_snapshot(&args.snapshot)?;
    if let Some(csv) = &args.metrics_csv {
        let extra = load_metrics_csv(csv)?;
        snapshot.extend_metrics(extra);
    }

    let input = snapshot.dashboard_input(now);
    tracing::info!(
        tasks = input.tasks.len(),
        metrics = input.metrics.len(),
        now = %now,
        "snapshot loaded"
    );
    Ok((input, now))
}

fn load_metrics_csv(path: &Path) -> Result<Vec<Metric>> {
    parse_metrics_csv(path).with_context(|| format!("loading metrics from {}", path.display()))
}

fn resolve_now(arg: Option<&str>, tz: &str) -> Result<DateTime<Utc>> {
    match arg {
        Some(s) => parse_instant(s, tz).with_context(|| format!("invalid --now value '{s}'")),
        None => Ok(Utc::now()),
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value).context("serialize output")?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FOUNDER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hud_core::{HudConfig, StatusSnapshot, StatusStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod replay;

use replay::ReplaySource;

#[derive(Parser)]
#[command(version, about = "Apply player status payloads to the HUD status store")]
struct Cli {
    /// Optional TOML config (feed + telemetry sections).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one or more JSON payloads in order and print the final status.
    Apply(ApplyArgs),
    /// Replay a JSON-lines feed, printing the status after every line.
    Replay(ReplayArgs),
    /// Print the status a fresh store starts with.
    Defaults,
}

#[derive(Args)]
struct ApplyArgs {
    #[arg(long = "payload", required = true)]
    payloads: Vec<String>,
}

#[derive(Args)]
struct ReplayArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    /// Warn and skip lines that fail to decode instead of aborting.
    #[arg(long)]
    skip_invalid: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Apply(args) => handle_apply(args),
        Commands::Replay(args) => handle_replay(args, &config),
        Commands::Defaults => print_snapshot(&StatusStore::new().snapshot()),
    }
}

fn load_config(path: Option<&Path>) -> Result<HudConfig> {
    let config = match path {
        Some(path) => HudConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => HudConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn init_tracing(config: &HudConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn handle_apply(args: ApplyArgs) -> Result<()> {
    let snapshot = replay::apply_payloads(&args.payloads)?;
    print_snapshot(&snapshot)
}

fn handle_replay(args: ReplayArgs, config: &HudConfig) -> Result<()> {
    let ReplaySource {
        input,
        skip_invalid,
    } = ReplaySource::resolve(args.input, args.skip_invalid, config)?;
    let data = fs::read_to_string(&input)
        .with_context(|| format!("failed to read feed {}", input.display()))?;

    let mut store = StatusStore::new();
    store.subscribe(|snapshot| match serde_json::to_string(snapshot) {
        Ok(line) => println!("{line}"),
        Err(err) => warn!(target: "hud_cli", %err, "failed to encode snapshot"),
    });

    let counts = replay::replay_lines(&mut store, &data, skip_invalid)
        .with_context(|| format!("failed to replay {}", input.display()))?;

    info!(
        target: "hud_cli",
        applied = counts.applied,
        skipped = counts.skipped,
        final_status = %store.snapshot(),
        "replay finished"
    );
    Ok(())
}

fn print_snapshot(snapshot: &StatusSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

//! tether-validate - Replay marker events against a tracker config.
//!
//! Loads a tracker TOML config, preloads the content pool with placeholder
//! content, replays a JSON-lines file of tracking batches and admin commands,
//! and prints the visible set after every step.
//!
//! Usage: tether-validate --config tracker.toml --events replay.jsonl [--strict-single] [--json]

mod replay;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tether_core::{
    BatchHandler, ContentDescriptor, ContentFactory, ContentObject, InstantiationError,
    LocalTransform, Pose, VisibilityManager,
};
use tether_types::TrackerConfig;
use tracing_subscriber::filter::EnvFilter;

use crate::replay::{ReplayLine, ReplayStep, parse_replay};

#[derive(Parser)]
#[command(version, about = "Replay marker tracking events against a tracker config")]
struct Cli {
    /// Tracker config (TOML). Defaults to the user config location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines replay file
    #[arg(short, long)]
    events: PathBuf,

    /// Fail if single-visible mode ever has more than one instance visible
    #[arg(long)]
    strict_single: bool,

    /// Print a JSON snapshot of every instance after each step
    #[arg(long)]
    json: bool,
}

/// Placeholder content: logs what a renderer would be asked to do
struct ReplayContent {
    id: String,
}

impl ContentObject for ReplayContent {
    fn set_enabled(&mut self, enabled: bool) {
        tracing::debug!(id = %self.id, enabled, "set_enabled");
    }

    fn set_local_transform(&mut self, transform: &LocalTransform) {
        tracing::trace!(id = %self.id, ?transform, "set_local_transform");
    }

    fn anchor_moved(&mut self, pose: &Pose) {
        tracing::trace!(id = %self.id, ?pose, "anchor_moved");
    }
}

struct ReplayFactory;

impl ContentFactory for ReplayFactory {
    fn instantiate(
        &mut self,
        descriptor: &ContentDescriptor,
    ) -> Result<Box<dyn ContentObject>, InstantiationError> {
        Ok(Box::new(ReplayContent {
            id: descriptor.id.clone(),
        }))
    }
}

/// Initialize logging, writing to TETHER_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("TETHER_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tracker_config(path: Option<&Path>) -> Result<TrackerConfig, String> {
    match path {
        Some(path) => tether_core::load_config(path).map_err(|e| e.to_string()),
        None => {
            let path = tether_core::config::default_config_path()
                .ok_or("no config path given and no user config directory available")?;
            tether_core::load_config_or_default(&path).map_err(|e| e.to_string())
        }
    }
}

fn describe(step: &ReplayStep) -> String {
    match &step.entry {
        ReplayLine::Batch(b) => format!(
            "batch +{} ~{} -{}",
            b.added.len(),
            b.updated.len(),
            b.removed.len()
        ),
        ReplayLine::Command(c) => format!("{c:?}"),
    }
}

fn print_state(step: &ReplayStep, manager: &VisibilityManager, json: bool) -> Result<(), String> {
    if json {
        let snapshot = serde_json::to_string(&manager.snapshot()).map_err(|e| e.to_string())?;
        println!("[{}] {}", step.line, snapshot);
        return Ok(());
    }
    let visible = manager.visible_ids();
    println!(
        "[{}] {:<28} visible: {:<20} current: {}",
        step.line,
        describe(step),
        if visible.is_empty() {
            "-".to_string()
        } else {
            visible.join(",")
        },
        manager.currently_visible().unwrap_or("-")
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<bool, String> {
    let config = load_tracker_config(cli.config.as_deref())?;
    let contents = std::fs::read_to_string(&cli.events)
        .map_err(|e| format!("failed to read {}: {}", cli.events.display(), e))?;
    let steps = parse_replay(&contents)?;

    let mut manager = VisibilityManager::from_config(&config, &mut ReplayFactory);
    println!(
        "Loaded {}/{} content entries (single_visible={}, hide_on_tracking_lost={})",
        manager.count(),
        config.content.len(),
        config.single_visible,
        config.hide_on_tracking_lost
    );

    let mut ok = true;
    for step in &steps {
        match &step.entry {
            ReplayLine::Batch(batch) => manager.handle_batch(batch),
            ReplayLine::Command(command) => manager.apply(command),
        }
        print_state(step, &manager, cli.json)?;

        if cli.strict_single && config.single_visible && manager.visible_count() > 1 {
            tracing::error!(
                line = step.line,
                visible = ?manager.visible_ids(),
                "More than one instance visible in single-visible mode"
            );
            ok = false;
        }
    }

    println!("Replayed {} steps", steps.len());
    Ok(ok)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Replay failed");
            ExitCode::FAILURE
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays action scripts against a wrapping map.

mod config;
mod report;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wrapper_core::{parse_actions, Action};
use wrapper_world::{self as world, query, RobotLoadout, State};

use crate::{config::CliConfig, report::Summary};

/// Command-line arguments for the wrapping simulator.
#[derive(Debug, Parser)]
#[command(name = "wrapper", about = "Replays robot action scripts on a wrapping map")]
struct CliArgs {
    /// Map description file (`outer#start#obstacles#boosters`).
    #[arg(long, value_name = "FILE")]
    map: PathBuf,

    /// File containing the action script to replay.
    #[arg(long, value_name = "FILE", conflicts_with = "script")]
    actions: Option<PathBuf>,

    /// Action script given inline, e.g. `WWDDEB(1,2)`.
    #[arg(long, value_name = "TEXT")]
    script: Option<String>,

    /// TOML file with a `[loadout]` table overriding the robot's body.
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Prints the final grid, top row first.
    #[arg(long)]
    render: bool,

    /// Emits the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Entry point for the wrapping simulator command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let loadout = match &args.config {
        Some(path) => CliConfig::from_path(path)?.loadout,
        None => RobotLoadout::default(),
    };

    let description = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read map at {}", args.map.display()))?;
    let mut state = State::parse_with_loadout(&description, &loadout)
        .with_context(|| format!("invalid map at {}", args.map.display()))?;
    info!(
        rows = query::grid(&state).rows(),
        cols = query::grid(&state).cols(),
        "map loaded"
    );

    let actions = load_actions(&args)?;
    replay(&mut state, &actions)?;

    let summary = Summary::capture(&state, actions.len());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
        );
    } else {
        print!("{summary}");
    }
    if args.render {
        print!("{}", query::grid(&state));
    }
    Ok(())
}

fn load_actions(args: &CliArgs) -> Result<Vec<Action>> {
    let script = match (&args.actions, &args.script) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read actions at {}", path.display()))?,
        (None, Some(script)) => script.clone(),
        (None, None) => String::new(),
    };
    parse_actions(&script).context("failed to parse action script")
}

fn replay(state: &mut State, actions: &[Action]) -> Result<()> {
    let mut events = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        world::apply(state, *action, &mut events)
            .with_context(|| format!("action #{} `{action}` was rejected", index + 1))?;
        for event in events.drain(..) {
            debug!(?event, "event");
        }
    }
    Ok(())
}

//! bathy-replay: run a dive headlessly from a config and a command script.
//!
//! Usage:
//!   bathy-replay --config dive.json --script script.json
//!   bathy-replay --config dive.json --script script.json --ticks 1800 --snapshots
//!
//! The script is a JSON array of `{ "tick": n, "command": { "type": ... } }`.
//! Commands are queued just before tick `n` runs. Events (and, optionally,
//! full snapshots) are written to stdout as JSON lines.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use bathy_core::commands::PlayerCommand;
use bathy_core::config::DiveConfig;
use bathy_core::enums::{DiveResult, GamePhase};
use bathy_core::events::SimEvent;
use bathy_sim::DiveEngine;

#[derive(Parser)]
#[command(name = "bathy-replay")]
#[command(about = "Replay a scripted dive and print its events")]
struct Args {
    /// Dive config (JSON)
    #[arg(long)]
    config: PathBuf,

    /// Command script (JSON array of {tick, command})
    #[arg(long)]
    script: PathBuf,

    /// Number of ticks to run (stops early at the debrief)
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// Also print the full snapshot after every tick
    #[arg(long)]
    snapshots: bool,
}

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    tick: u64,
    command: PlayerCommand,
}

#[derive(Serialize)]
struct EventLine<'a> {
    tick: u64,
    event: &'a SimEvent,
}

#[derive(Serialize)]
struct Summary {
    ticks: u64,
    phase: GamePhase,
    result: Option<DiveResult>,
    captured: usize,
    fail_count: u32,
    hull: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_text = fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    let config = DiveConfig::from_json(&config_text)
        .with_context(|| format!("loading config {}", args.config.display()))?;

    let script_text = fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let mut script: Vec<ScriptEntry> = serde_json::from_str(&script_text)
        .with_context(|| format!("parsing script {}", args.script.display()))?;
    script.sort_by_key(|entry| entry.tick);

    let mut engine = DiveEngine::new(config).context("building dive")?;
    info!(
        "replaying {} commands over up to {} ticks",
        script.len(),
        args.ticks
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut pending = script.into_iter().peekable();
    let mut ran = 0;

    for tick in 0..args.ticks {
        while let Some(entry) = pending.next_if(|entry| entry.tick <= tick) {
            engine.queue_command(entry.command);
        }

        let snapshot = engine.tick();
        ran = tick + 1;

        for event in &snapshot.events {
            serde_json::to_writer(&mut out, &EventLine { tick, event })?;
            writeln!(out)?;
        }
        if args.snapshots {
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        }

        if snapshot.phase == GamePhase::Debrief && pending.peek().is_none() {
            break;
        }
    }

    let summary = Summary {
        ticks: ran,
        phase: engine.phase(),
        result: engine.result(),
        captured: engine.mission().captured_count(),
        fail_count: engine.mission().fail_count(),
        hull: engine.hull().health(),
    };
    serde_json::to_writer(&mut out, &summary)?;
    writeln!(out)?;
    out.flush()?;

    info!("dive finished: {:?}", engine.result());
    Ok(())
}

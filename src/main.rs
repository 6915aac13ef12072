//! Replay runner (default binary).
//!
//! Feeds a JSON script of command names through the rules engine, printing one JSON line
//! per locked piece, then the final result and the final state. The same script and seed
//! always print the same bytes.
//!
//! Usage: `blockfall-replay [--config FILE] [--seed N] [--name NAME] SCRIPT`

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use blockfall::core::{FinalResult, GameConfig, GameState, LockReport};
use blockfall::engine::RulesEngine;
use blockfall::types::Command;

const DEFAULT_SEED: u32 = 1;
const DEFAULT_NAME: &str = "replay";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<String>,
    seed: Option<u32>,
    name: Option<String>,
    script: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut script = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a file path")?);
            }
            "--seed" => {
                let raw = args.next().context("--seed needs a number")?;
                parsed.seed = Some(raw.parse().with_context(|| format!("bad seed {raw:?}"))?);
            }
            "--name" => {
                parsed.name = Some(args.next().context("--name needs a value")?);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ if script.is_some() => bail!("only one script may be given"),
            _ => script = Some(arg),
        }
    }

    parsed.script = script.context("usage: blockfall-replay [--config FILE] [--seed N] [--name NAME] SCRIPT")?;
    Ok(parsed)
}

fn load_config(path: &str) -> Result<GameConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))
}

fn parse_script(raw: &str) -> Result<Vec<Command>> {
    let names: Vec<String> = serde_json::from_str(raw).context("script must be a JSON array of command names")?;
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Command::from_str(name).with_context(|| format!("unknown command {name:?} at index {i}"))
        })
        .collect()
}

#[derive(Serialize)]
struct LockLine<'a> {
    step: usize,
    command: Command,
    lock: &'a LockReport,
}

#[derive(Serialize)]
struct Summary<'a> {
    result: FinalResult,
    state: &'a GameState,
}

/// Run `script` from a fresh game, calling `on_lock` for every lock. Stops at game over.
fn replay(
    engine: &RulesEngine,
    seed: u32,
    script: &[Command],
    mut on_lock: impl FnMut(usize, Command, &LockReport) -> Result<()>,
) -> Result<Arc<GameState>> {
    let mut state = engine.new_game(seed);
    for (step, &command) in script.iter().enumerate() {
        if state.game_over() {
            break;
        }
        let transition = engine.apply(&state, command);
        if let Some(lock) = &transition.lock {
            on_lock(step, command, lock)?;
        }
        state = transition.state;
    }
    Ok(state)
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or(DEFAULT_SEED);
    let engine = RulesEngine::new(config).context("invalid game configuration")?;

    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script))?;
    let script = parse_script(&raw)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let state = replay(&engine, seed, &script, |step, command, lock| {
        let line = serde_json::to_string(&LockLine { step, command, lock })?;
        writeln!(out, "{line}")?;
        Ok(())
    })?;

    let summary = Summary {
        result: state.final_result(args.name.as_deref().unwrap_or(DEFAULT_NAME)),
        state: &state,
    };
    writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    Ok(())
}

//! Headless STEELFRONT battle runner.
//!
//! ```bash
//! # Reference battle, two minutes, seed 42
//! cargo run -p steelfront-app
//!
//! # Custom scenario with a command script and upgrades, real-time pacing
//! cargo run -p steelfront-app -- --scenario battle.json --script drive.json \
//!     --research damage1,armor1 --realtime
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, `LOG_FORMAT=json`). With `--json` the
//! final snapshot is printed to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use steelfront_core::error::Result;
use steelfront_core::modifiers::Modifiers;
use steelfront_sim::engine::SimConfig;
use steelfront_sim::scenario::{reference_battle, Scenario};

use steelfront_app::game_loop::{spawn_game_loop, LoopOptions, LoopOutcome};
use steelfront_app::script::CommandScript;

#[derive(Parser)]
#[command(name = "steelfront")]
#[command(about = "Headless armored-combat battle runner")]
#[command(version)]
struct Cli {
    /// RNG seed; the same seed and commands replay the same battle
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Maximum run length in seconds of ticks
    #[arg(long, default_value = "120")]
    seconds: f64,

    /// Scenario JSON file (defaults to the reference battle)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Timed command script JSON file
    #[arg(long)]
    script: Option<PathBuf>,

    /// Unlocked research ids, comma separated (e.g. damage1,speed1)
    #[arg(long, value_delimiter = ',')]
    research: Vec<String>,

    /// Pace ticks at 60Hz wall-clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Print the reference scenario as JSON and exit
    #[arg(long)]
    print_scenario: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "battle failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.print_scenario {
        println!("{}", serde_json::to_string_pretty(&reference_battle())?);
        return Ok(());
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let script = match &cli.script {
        Some(path) => CommandScript::load(path)?,
        None => CommandScript::default(),
    };
    let modifiers = Modifiers::from_research(cli.research.as_slice());

    info!(
        seed = cli.seed,
        scenario = %scenario.name,
        research = ?cli.research,
        scripted = script.len(),
        "starting battle"
    );

    let config = SimConfig {
        seed: cli.seed,
        modifiers,
        scenario,
    };
    let options = LoopOptions {
        realtime: cli.realtime,
        script,
        ..LoopOptions::for_duration(cli.seconds)
    };

    let (handle, join) = spawn_game_loop(config, options)?;
    let outcome = match join.join() {
        Ok(result) => result?,
        Err(_) => return Err(std::io::Error::other("game loop thread panicked").into()),
    };
    drop(handle);

    report(&outcome);
    if cli.json {
        if let Some(snapshot) = &outcome.snapshot {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
    }
    Ok(())
}

fn report(outcome: &LoopOutcome) {
    let Some(snapshot) = &outcome.snapshot else {
        info!(reason = ?outcome.reason, "battle ended before the first tick");
        return;
    };
    let score = &snapshot.score;
    info!(
        reason = ?outcome.reason,
        phase = ?snapshot.phase,
        ticks = outcome.ticks,
        elapsed = score.elapsed_secs,
        enemies_destroyed = score.enemies_destroyed,
        enemies_total = score.enemies_total,
        allies_alive = score.allies_alive,
        objectives = score.objectives_captured,
        objectives_total = score.objectives_total,
        silver = score.silver,
        research = score.research,
        "battle summary"
    );
}

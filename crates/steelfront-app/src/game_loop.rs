//! Game loop thread: runs the battle engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel or a timed script. The latest snapshot
//! is stored in shared state for polling, and the final one is returned
//! when the loop ends.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use steelfront_core::constants::TICK_RATE;
use steelfront_core::error::Result;
use steelfront_core::state::BattleSnapshot;
use steelfront_sim::engine::{BattleEngine, SimConfig};

use crate::script::CommandScript;
use crate::state::{GameLoopCommand, LoopHandle, SharedSnapshot};

/// Simulated seconds per tick.
pub const TICK_SECS: f64 = 1.0 / TICK_RATE as f64;

/// Wall-clock duration of one tick in real-time mode.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop paces itself and when it stops.
#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Sleep between ticks to hold 60Hz; otherwise run as fast as possible.
    pub realtime: bool,
    /// Upper bound on ticks, paused ticks included.
    pub max_ticks: u64,
    pub script: CommandScript,
}

impl LoopOptions {
    /// Options for a run of `seconds` of wall-equivalent ticks.
    pub fn for_duration(seconds: f64) -> Self {
        Self {
            realtime: false,
            max_ticks: (seconds.max(0.0) * TICK_RATE as f64).ceil() as u64,
            script: CommandScript::default(),
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    BattleOver,
    TickLimit,
    Shutdown,
}

/// What the loop thread hands back when it exits.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub reason: StopReason,
    pub ticks: u64,
    pub snapshot: Option<BattleSnapshot>,
}

/// Spawns the game loop in a new thread.
///
/// Engine construction errors surface through the join handle.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
) -> Result<(LoopHandle, JoinHandle<Result<LoopOutcome>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let join = std::thread::Builder::new()
        .name("steelfront-game-loop".into())
        .spawn(move || -> Result<LoopOutcome> {
            let engine = BattleEngine::new(config)?;
            Ok(run_game_loop(engine, cmd_rx, options, &shared))
        })?;

    Ok((
        LoopHandle {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        join,
    ))
}

/// The game loop. Runs until the battle ends, the tick limit is reached,
/// or a Shutdown command or channel disconnect arrives.
pub fn run_game_loop(
    mut engine: BattleEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    mut options: LoopOptions,
    latest_snapshot: &Mutex<Option<BattleSnapshot>>,
) -> LoopOutcome {
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    let mut last: Option<BattleSnapshot> = None;
    let mut channel_open = true;

    let reason = loop {
        if ticks >= options.max_ticks {
            break StopReason::TickLimit;
        }

        // 1. Drain all pending commands
        while channel_open {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    info!(ticks, "game loop shutdown requested");
                    return LoopOutcome {
                        reason: StopReason::Shutdown,
                        ticks,
                        snapshot: last,
                    };
                }
                Err(mpsc::TryRecvError::Empty) => break,
                // Scripted runs drop their sender early; keep ticking.
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    channel_open = false;
                }
            }
        }

        // 2. Release scripted commands that have come due
        engine.queue_commands(options.script.due(engine.time().elapsed_secs));

        // 3. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(TICK_SECS);
        ticks += 1;
        let over = snapshot.phase.is_over();

        // 4. Store latest snapshot for polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot.clone()),
            Err(_) => warn!("snapshot lock poisoned"),
        }
        last = Some(snapshot);

        if over {
            break StopReason::BattleOver;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral.
                next_tick_time = now;
            }
        }
    };

    LoopOutcome {
        reason,
        ticks,
        snapshot: last,
    }
}

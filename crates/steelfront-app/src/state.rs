//! State shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use steelfront_core::commands::PlayerCommand;
use steelfront_core::state::BattleSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the battle engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<BattleSnapshot>>>;

/// Handle to a running game loop.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
}

impl LoopHandle {
    /// Forward a player command. Returns false once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Ask the loop to stop after its current tick.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<BattleSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}

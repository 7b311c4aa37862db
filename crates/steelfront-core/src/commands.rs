//! Player commands delivered to the engine.
//!
//! Commands are queued and applied at the start of the next tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Throttle in [−1, 1]; clamped on apply.
    SetThrottle { value: f64 },
    /// Steering in [−1, 1]; clamped on apply.
    SetSteering { value: f64 },
    /// Point the turret at a world position.
    AimAt { x: f64, y: f64 },
    /// Desired gun elevation (radians); clamped to the gun's limits.
    SetElevation { radians: f64 },
    Fire,
    SelectShell { index: usize },
    /// Start a reload if one is not already running.
    Reload,
    /// Begin capturing the nearest flag in range.
    CaptureFlag,
    Pause,
    Resume,
    TogglePause,
}

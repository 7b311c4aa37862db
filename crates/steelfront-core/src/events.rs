//! Presentation events emitted during a tick.
//!
//! Events are drained into the snapshot each tick; the simulation never
//! reads them back.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    MuzzleFlash {
        position: Position,
        angle: f64,
        owner: Role,
    },
    Explosion {
        position: Position,
        size: f64,
    },
    Hit {
        position: Position,
        target: Role,
        outcome: HitOutcome,
        label: String,
    },
    ModuleDamaged {
        target: Role,
        module: ModuleKind,
        health: f64,
    },
    CrewInjured {
        target: Role,
        crew: CrewRole,
        health: f64,
    },
    AmmoDetonation {
        position: Position,
        target: Role,
    },
    /// A flag started, stopped or became contested during capture.
    CaptureStateChanged {
        id: u32,
        capturing: bool,
        contested: bool,
    },
    ObjectiveCaptured {
        id: u32,
    },
    EntityDestroyed {
        name: String,
        role: Role,
        position: Position,
    },
    GameOver,
    Victory,
}

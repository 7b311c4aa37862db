//! Simulation engine for STEELFRONT.
//!
//! Owns the hecs ECS world, runs the combat systems each tick,
//! and produces BattleSnapshots for the presentation layer.

pub mod damage;
pub mod engine;
pub mod scenario;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{BattleEngine, SimConfig};
pub use scenario::Scenario;
pub use steelfront_core as core;

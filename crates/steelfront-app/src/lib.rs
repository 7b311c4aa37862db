//! STEELFRONT headless driver.
//!
//! Runs the battle engine on its own thread at a fixed tick rate, feeds it
//! player commands from a channel or a timed script, and publishes the
//! latest snapshot for polling.

pub mod game_loop;
pub mod script;
pub mod state;

pub use steelfront_core as core;

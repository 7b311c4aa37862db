//! Unit AI for STEELFRONT.
//!
//! Implements the patrol/engage state machine, behavior-driven movement
//! policies and fire gating for non-player vehicles.

pub mod fsm;
pub mod profiles;

pub use steelfront_core as core;

#[cfg(test)]
mod tests;

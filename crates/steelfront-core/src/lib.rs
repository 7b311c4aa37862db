//! Core types and definitions for the STEELFRONT combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, vehicle catalogs, commands, events,
//! snapshots and constants. It has no dependency on the ECS or any RNG.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod modifiers;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

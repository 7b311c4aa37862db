//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components.

pub mod awareness;
pub mod ballistics;
pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod objectives;
pub mod player_gun;
pub mod snapshot;
pub mod unit_ai;

//! Battle engine: the core of the simulation.
//!
//! `BattleEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `BattleSnapshot`s. Headless and
//! deterministic for a given seed and command sequence.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use steelfront_core::commands::PlayerCommand;
use steelfront_core::components::{DriverIntent, Gun, Mobility, PlayerTank};
use steelfront_core::enums::GamePhase;
use steelfront_core::error::Result;
use steelfront_core::events::SimEvent;
use steelfront_core::modifiers::Modifiers;
use steelfront_core::state::BattleSnapshot;
use steelfront_core::types::{Position, SimTime};
use steelfront_terrain::TerrainMap;

use crate::scenario::Scenario;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::awareness::Proximity;
use crate::world_setup;

/// Configuration for starting a new battle.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Upgrade multipliers for the player vehicle.
    pub modifiers: Modifiers,
    pub scenario: Scenario,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            modifiers: Modifiers::default(),
            scenario: Scenario::default(),
        }
    }
}

/// The battle engine. Owns the ECS world and all sim state.
pub struct BattleEngine {
    world: World,
    terrain: TerrainMap,
    time: SimTime,
    phase: GamePhase,
    modifiers: Modifiers,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    score: ScoreState,
    proximity: Proximity,
}

impl BattleEngine {
    /// Create a battle from the given config. Fails on an unusable scenario
    /// or player vehicle.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.scenario.validate()?;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let score = world_setup::setup_battle(&mut world, &config.scenario, &mut rng)?;

        Ok(Self {
            world,
            terrain: config.scenario.map,
            time: SimTime::default(),
            phase: GamePhase::default(),
            modifiers: config.modifiers,
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score,
            proximity: Proximity::default(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the battle by `dt` seconds and return the resulting snapshot.
    ///
    /// Commands are always applied. Systems run only while the battle is
    /// active and `dt` is positive.
    pub fn tick(&mut self, dt: f64) -> BattleSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_outcome();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            events,
            &self.score,
            &self.modifiers,
            self.proximity,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetThrottle { value } => {
                self.with_intent(|intent| intent.throttle = value.clamp(-1.0, 1.0));
            }
            PlayerCommand::SetSteering { value } => {
                self.with_intent(|intent| intent.steering = value.clamp(-1.0, 1.0));
            }
            PlayerCommand::AimAt { x, y } => {
                self.with_intent(|intent| intent.aim_point = Some(Position::new(x, y)));
            }
            PlayerCommand::SetElevation { radians } => {
                for (_entity, (_player, mobility, intent)) in
                    self.world.query_mut::<(&PlayerTank, &Mobility, &mut DriverIntent)>()
                {
                    intent.elevation = radians.clamp(mobility.elevation_min, mobility.elevation_max);
                }
            }
            PlayerCommand::Fire => {
                if self.phase == GamePhase::Active {
                    self.with_intent(|intent| intent.fire = true);
                }
            }
            PlayerCommand::SelectShell { index } => {
                for (_entity, (_player, gun)) in self.world.query_mut::<(&PlayerTank, &mut Gun)>() {
                    if index < gun.shells.len() {
                        gun.selected_shell = index;
                    }
                }
            }
            PlayerCommand::Reload => {
                for (_entity, (_player, gun)) in self.world.query_mut::<(&PlayerTank, &mut Gun)>() {
                    systems::player_gun::start_reload(gun);
                }
            }
            PlayerCommand::CaptureFlag => {
                if self.phase == GamePhase::Active {
                    systems::objectives::begin_capture(&mut self.world, &mut self.events);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Active => self.phase = GamePhase::Paused,
                GamePhase::Paused => self.phase = GamePhase::Active,
                GamePhase::Victory | GamePhase::Defeat => {}
            },
        }
    }

    fn with_intent(&mut self, apply: impl Fn(&mut DriverIntent)) {
        for (_entity, (_player, intent)) in self.world.query_mut::<(&PlayerTank, &mut DriverIntent)>() {
            apply(intent);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Player movement, turret and elevation
        systems::movement::run(&mut self.world, &self.terrain, &self.modifiers, dt);
        // 2. Player gun (reload, latched fire)
        systems::player_gun::run(
            &mut self.world,
            &self.terrain,
            &self.modifiers,
            &mut self.events,
            dt,
        );
        // 3. Unit AI (FSM, movement, AI fire)
        systems::unit_ai::run(&mut self.world, &self.terrain, &mut self.rng, &mut self.events, dt);
        // 4. Ballistics (advance, range expiry, ground impact)
        systems::ballistics::run(
            &mut self.world,
            &self.terrain,
            &mut self.events,
            &mut self.despawn_buffer,
            dt,
        );
        // 5. Collision & damage
        systems::collision::run(
            &mut self.world,
            &mut self.rng,
            &self.modifiers,
            &mut self.events,
            &mut self.score,
            &mut self.despawn_buffer,
        );
        // 6. Objective capture
        systems::objectives::run(&mut self.world, &mut self.events, &mut self.score, dt);
        // 7. Proximity awareness
        self.proximity = systems::awareness::run(&mut self.world);
        // 8. Cleanup (deferred wreck removal)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, dt);
    }

    /// Latch the battle outcome. Defeat takes precedence over victory.
    fn check_outcome(&mut self) {
        if self.score.player_destroyed {
            self.phase = GamePhase::Defeat;
            info!(elapsed = self.time.elapsed_secs, "battle lost");
        } else if self.score.all_objectives_captured() {
            self.phase = GamePhase::Victory;
            self.events.push(SimEvent::Victory);
            info!(
                elapsed = self.time.elapsed_secs,
                silver = self.score.silver,
                research = self.score.research,
                "battle won"
            );
        }
    }
}

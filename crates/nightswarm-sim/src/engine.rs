//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued
//! commands, runs all systems in a fixed order, and produces
//! `WorldSnapshot`s. Completely headless, enabling deterministic
//! testing without any display or input collaborator.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nightswarm_core::commands::SessionCommand;
use nightswarm_core::components::{Health, Monster, Player};
use nightswarm_core::constants::SPAWN_INTERVAL_TICKS;
use nightswarm_core::enums::GamePhase;
use nightswarm_core::events::GameEvent;
use nightswarm_core::records::{GemRecord, PlayerRecord, SaveData};
use nightswarm_core::state::{PlayerView, WorldSnapshot};
use nightswarm_core::types::{CooldownGate, Position, SimTime};

use crate::systems;
use crate::weapons::BulletSpawn;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Whether the monster spawner runs. Disabled in tests that need
    /// full control over the monster population.
    pub spawning: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawning: true,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state; it is
/// the only component that inserts into or removes from the entity
/// collections.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    spawning: bool,
    spawn_gate: CooldownGate,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    bullet_buffer: Vec<BulletSpawn>,
    events: Vec<GameEvent>,
    move_intent: (i8, i8),
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawning: config.spawning,
            spawn_gate: CooldownGate::new(SPAWN_INTERVAL_TICKS),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            bullet_buffer: Vec::new(),
            events: Vec::new(),
            move_intent: (0, 0),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. The tick is atomic from the outside: all mutations
    /// land before the snapshot is built.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();

            // Player death is the terminal condition. The current tick
            // finishes normally; the phase change stops the next one.
            if self.player_dead() {
                self.events.push(GameEvent::PlayerDied);
                self.phase = GamePhase::GameOver;
                log::info!("Player died at tick {}", self.time.tick);
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events)
    }

    /// Get the current session phase.
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

    /// Current player status (Display collaborator entry point).
    pub fn player_view(&self) -> PlayerView {
        systems::snapshot::build_player_view(&self.world)
    }

    /// Positions of all live monsters.
    pub fn monster_positions(&self) -> Vec<Position> {
        self.world
            .query::<(&Monster, &Position)>()
            .iter()
            .map(|(_entity, (_monster, pos))| *pos)
            .collect()
    }

    /// Spawn a monster at the given coordinate (Spawner collaborator
    /// entry point; the internal spawner uses it too).
    pub fn add_monster(&mut self, x: f64, y: f64) -> hecs::Entity {
        world_setup::spawn_monster(&mut self.world, x, y)
    }

    /// Remove a monster (or any entity) from the world.
    pub fn remove_monster(&mut self, entity: hecs::Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    /// Append a bullet to the world's bullet collection.
    pub fn add_bullet(&mut self, spawn: BulletSpawn) -> hecs::Entity {
        world_setup::spawn_bullet(&mut self.world, spawn, self.time.tick)
    }

    /// Build the persisted record of the current player, if a session
    /// has one.
    pub fn player_record(&self) -> Option<PlayerRecord> {
        world_setup::player_record(&self.world)
    }

    /// Build the full save data for the current session.
    pub fn save_data(&self) -> Option<SaveData> {
        Some(SaveData {
            player: world_setup::player_record(&self.world)?,
            gems: world_setup::gem_records(&self.world),
        })
    }

    /// Get a mutable reference to the ECS world (tests only).
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

    /// Handle a single command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::NewSession => {
                self.start_session(&PlayerRecord::default(), &[]);
            }
            SessionCommand::LoadSession { player, gems } => {
                self.start_session(&player, &gems);
            }
            SessionCommand::Move { dx, dy } => {
                self.move_intent = (dx.clamp(-1, 1), dy.clamp(-1, 1));
            }
            SessionCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            SessionCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Reset the world and start a session from persisted records.
    fn start_session(&mut self, record: &PlayerRecord, gems: &[GemRecord]) {
        self.world = World::new();
        self.time = SimTime::default();
        self.spawn_gate = CooldownGate::new(SPAWN_INTERVAL_TICKS);
        self.events.clear();
        self.move_intent = (0, 0);
        world_setup::spawn_player_from_record(&mut self.world, record);
        for gem in gems {
            world_setup::spawn_gem_from_record(&mut self.world, gem);
        }
        self.phase = GamePhase::Active;
        log::info!(
            "Session started (level {}, weapon {})",
            record.level,
            record.weapon_type
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.tick;

        // 1. Spawner (own cadence via its cooldown gate)
        if self.spawning {
            systems::spawner::run(&mut self.world, &mut self.rng, &mut self.spawn_gate, now);
        }
        // 2. Monster AI + pairwise avoidance
        systems::ai::run(&mut self.world);
        // 3. Player update (movement intent, autoheal, autonomous fire)
        systems::player::run(&mut self.world, self.move_intent, now, &mut self.bullet_buffer);
        self.move_intent = (0, 0);
        // 4. Insert fired bullets (only the engine mutates collections)
        for spawn in self.bullet_buffer.drain(..) {
            world_setup::spawn_bullet(&mut self.world, spawn, now);
        }
        // 5. Bullet movement
        systems::movement::run(&mut self.world);
        // 6. Combat resolution (bullet hits, monster attacks, pickups)
        systems::combat::run(&mut self.world, &mut self.rng, now, &mut self.events);
        // 7. Progression (XP rollover, perks) + boost expiry
        systems::progression::run(&mut self.world, now, &mut self.events);
        // 8. Cleanup sweep (deaths, spent bullets, collected gems)
        systems::cleanup::run(
            &mut self.world,
            &mut self.rng,
            now,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }

    /// True once the player's health has reached zero.
    fn player_dead(&self) -> bool {
        let mut query = self.world.query::<(&Player, &Health)>();
        query
            .iter()
            .next()
            .is_some_and(|(_entity, (_player, health))| health.current == 0)
    }
}

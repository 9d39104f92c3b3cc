//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the hostile registry,
//! processes player commands, runs all systems and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use salvo_core::commands::PlayerCommand;
use salvo_core::components::{Active, Hostile};
use salvo_core::config::{PatternConfig, SimConfig};
use salvo_core::constants::DT;
use salvo_core::events::FeedbackEvent;
use salvo_core::state::SimSnapshot;
use salvo_core::types::{Position, SimTime, Viewer};
use salvo_guidance::selector::SelectionScratch;

use crate::projectile::FireStats;
use crate::registry::EntityRegistry;
use crate::systems;
use crate::systems::homing::HomingScratch;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    registry: EntityRegistry,
    lock_set: Vec<Entity>,
    viewer: Option<Viewer>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    selection_scratch: SelectionScratch<Entity>,
    homing_scratch: HomingScratch,
    events: Vec<FeedbackEvent>,
    stats: FireStats,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            registry: EntityRegistry::new(),
            lock_set: Vec::new(),
            viewer: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            selection_scratch: SelectionScratch::new(),
            homing_scratch: HomingScratch::new(),
            events: Vec::new(),
            stats: FireStats::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.process_commands();
        self.run_systems(dt);
        self.time.advance(dt);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.viewer.as_ref(),
            &self.lock_set,
            events,
            &self.stats,
        )
    }

    /// Advance by one fixed step of `DT`.
    pub fn tick_fixed(&mut self) -> SimSnapshot {
        self.tick(DT)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Current lock set, best score first.
    pub fn lock_set(&self) -> &[Entity] {
        &self.lock_set
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    pub fn stats(&self) -> &FireStats {
        &self.stats
    }

    // --- Entity lifecycle ---

    /// Spawn and register a hostile. `anchor_offset` places its lock point.
    pub fn spawn_hostile(&mut self, position: Vec3, anchor_offset: Vec3) -> Entity {
        world_setup::spawn_hostile(&mut self.world, &mut self.registry, position, anchor_offset)
    }

    /// Spawn a seeded random field of hostiles around `center`.
    pub fn spawn_hostile_field(
        &mut self,
        count: usize,
        center: Vec3,
        half_extent: Vec3,
    ) -> Vec<Entity> {
        world_setup::spawn_hostile_field(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            count,
            center,
            half_extent,
        )
    }

    /// Unregister and despawn a hostile, releasing its lock.
    /// Projectiles homing on it fall back to straight flight.
    /// Returns `false` for stale handles and non-hostile entities.
    pub fn despawn_hostile(&mut self, entity: Entity) -> bool {
        if self.world.get::<&Hostile>(entity).is_err() {
            return false;
        }
        self.deactivate(entity);
        self.world.despawn(entity).is_ok()
    }

    /// Activate or deactivate a hostile. Inactive hostiles are unregistered
    /// and cannot be locked.
    pub fn set_hostile_active(&mut self, entity: Entity, active: bool) {
        match self.world.get::<&mut Active>(entity) {
            Ok(mut flag) => flag.0 = active,
            Err(_) => return,
        }
        if active {
            self.registry.register(entity);
        } else {
            self.deactivate(entity);
        }
    }

    /// Move a hostile. Movement itself is driven from outside the core.
    pub fn move_hostile(&mut self, entity: Entity, position: Vec3) -> bool {
        match self.world.get::<&mut Position>(entity) {
            Ok(mut pos) => {
                pos.0 = position;
                true
            }
            Err(_) => false,
        }
    }

    fn deactivate(&mut self, entity: Entity) {
        self.registry.unregister(entity);
        systems::lock_on::release(&mut self.world, &mut self.lock_set, entity, &mut self.events);
    }

    /// Process all queued commands in order.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetViewer { viewer } => {
                self.viewer = Some(viewer);
            }
            PlayerCommand::ClearViewer => {
                self.viewer = None;
            }
            PlayerCommand::AcquireLocks => {
                self.registry.retain_live(&self.world);
                systems::lock_on::run(
                    &mut self.world,
                    &self.registry,
                    self.viewer.as_ref(),
                    &self.config.selection,
                    &mut self.lock_set,
                    &mut self.selection_scratch,
                    &mut self.events,
                );
            }
            PlayerCommand::CommitFire => {
                systems::fire_control::fire(
                    &mut self.world,
                    self.viewer.as_ref(),
                    &self.lock_set,
                    &self.config.pattern,
                    &self.config.projectile,
                    &mut self.events,
                    &mut self.stats,
                );
                systems::lock_on::release_all(&mut self.world, &mut self.lock_set, &mut self.events);
            }
            PlayerCommand::ClearLocks => {
                systems::lock_on::release_all(&mut self.world, &mut self.lock_set, &mut self.events);
            }
            PlayerCommand::SetMaxLocks { max_locks } => {
                self.config.selection.max_locks = max_locks.max(0) as u32;
            }
            PlayerCommand::SetPattern {
                shots,
                muzzle_radius,
                forward_offset,
            } => {
                self.config.pattern = PatternConfig::clamped(shots, muzzle_radius, forward_offset);
            }
            PlayerCommand::SetProjectileParams {
                speed,
                turn_rate_deg_per_sec,
                lifetime_secs,
            } => {
                let projectile = self.config.projectile;
                self.config.projectile =
                    projectile.retuned(speed, turn_rate_deg_per_sec, lifetime_secs);
            }
        }
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Homing (steer, move, expire, hit)
        systems::homing::run(
            &mut self.world,
            dt,
            self.config.reaction_duration_secs,
            &mut self.homing_scratch,
            &mut self.events,
            &mut self.stats,
        );
        // 2. Hit reaction timers
        systems::reaction::run(&mut self.world, dt);
        // 3. Cleanup (expired and hit projectiles)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}

//! Public API for the simulation.
//!
//! This module provides the main interface for the rendering, HUD, and
//! input collaborators to interact with the simulation.
//!
//! ## Fixed Timestep
//!
//! The simulation uses a fixed timestep internally (default 60 Hz). When
//! `step(dt)` is called, time accumulates and fixed updates run as needed,
//! so behavior is deterministic regardless of the caller's frame rate.
//!
//! ## Input
//!
//! Intents arrive between ticks through the entry points below and are
//! latched: held axes persist until cleared, jump/fire fire at most once
//! and are reset at the end of every tick. Latching means a press and
//! release that both land between two fixed updates are lost; that is the
//! intended trade-off, not a bug.

use crate::components::*;
use crate::config::SimConfig;
use crate::input::{InputState, MoveAxis};
use crate::rng::SimRng;
use crate::systems::*;
use crate::world::Snapshot;
use bevy_ecs::prelude::*;
use glam::Vec3;

/// The main simulation world container.
///
/// Holds the ECS world and schedule, providing a clean API for:
/// - Feeding input intents
/// - Stepping the simulation forward
/// - Extracting state snapshots for rendering and the HUD
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    tick: u64,
    time: f32,
    /// Accumulated time for the fixed timestep.
    time_accumulator: f32,
}

impl SimWorld {
    /// Create a new simulation world with the reference tuning.
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create a new simulation world with custom configuration.
    pub fn with_config(config: SimConfig) -> Self {
        let mut world = World::new();

        world.insert_resource(DeltaTime(config.fixed_timestep));
        world.insert_resource(SimTime(0.0));
        world.insert_resource(InputState::default());
        world.insert_resource(SimRng::new(config.rng_seed));
        world.insert_resource(IdCounter::default());
        world.insert_resource(EnemySpawnTimer::default());

        world.spawn(PlayerBundle::new(config.player_start));
        world.insert_resource(config);

        // One explicit chain: the enemy-before-projectile ordering is a
        // behavioral contract (see systems module docs).
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                locomotion_system,
                enemy_spawn_system,
                enemy_pursuit_system,
                enemy_contact_system,
                fire_system,
                projectile_advance_system,
                projectile_expiry_system,
                particle_update_system,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            tick: 0,
            time: 0.0,
            time_accumulator: 0.0,
        }
    }

    /// Step the simulation forward by `dt` seconds.
    ///
    /// Accumulates time and runs as many fixed updates as fit. Input
    /// latched before this call is visible to the first fixed update.
    pub fn step(&mut self, dt: f32) {
        let fixed_dt = self
            .world
            .get_resource::<SimConfig>()
            .map(|c| c.fixed_timestep)
            .unwrap_or(1.0 / 60.0);

        self.time_accumulator += dt;
        while self.time_accumulator >= fixed_dt {
            self.fixed_update(fixed_dt);
            self.time_accumulator -= fixed_dt;
        }
    }

    /// Run a single fixed timestep update.
    fn fixed_update(&mut self, dt: f32) {
        if let Some(mut dt_res) = self.world.get_resource_mut::<DeltaTime>() {
            dt_res.0 = dt;
        }

        self.schedule.run(&mut self.world);

        // The driver owns the edge-intent lifecycle: anything a system did
        // not consume this tick is dropped, never replayed later.
        if let Some(mut input) = self.world.get_resource_mut::<InputState>() {
            input.reset_edges();
        }

        self.tick += 1;
        self.time += dt;
        if let Some(mut time_res) = self.world.get_resource_mut::<SimTime>() {
            time_res.0 = self.time;
        }
    }

    // ------------------------------------------------------------------
    // Input collaborator entry points
    // ------------------------------------------------------------------

    /// Set a held movement axis to a signed magnitude.
    pub fn set_move_axis(&mut self, axis: MoveAxis, value: f32) {
        self.world.resource_mut::<InputState>().set_axis(axis, value);
    }

    /// Release a held movement axis.
    pub fn clear_move_axis(&mut self, axis: MoveAxis) {
        self.world.resource_mut::<InputState>().clear_axis(axis);
    }

    /// Latch a jump intent for the next tick.
    pub fn trigger_jump(&mut self) {
        self.world.resource_mut::<InputState>().trigger_jump();
    }

    /// Latch a fire intent for the next tick.
    pub fn trigger_fire(&mut self) {
        self.world.resource_mut::<InputState>().trigger_fire();
    }

    /// Update the look direction supplied by the camera collaborator.
    /// Expected to be unit length.
    pub fn set_look_direction(&mut self, direction: Vec3) {
        self.world.resource_mut::<InputState>().look_dir = direction;
    }

    /// Start or stop a play session (pointer lock acquired or released).
    pub fn set_session_active(&mut self, active: bool) {
        self.world.resource_mut::<InputState>().session_active = active;
    }

    // ------------------------------------------------------------------
    // External spawn entry points
    // ------------------------------------------------------------------

    /// Spawn an enemy at an explicit position, bypassing the timed spawner.
    /// Returns the enemy id.
    pub fn spawn_enemy(&mut self, position: Vec3) -> u32 {
        let now = self.time;
        let id = self.world.resource_mut::<IdCounter>().next_enemy();
        self.world.spawn(EnemyBundle::new(id, position, now));
        id.0
    }

    // ------------------------------------------------------------------
    // Rendering / HUD collaborator accessors
    // ------------------------------------------------------------------

    /// Get a snapshot of the current simulation state.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick, self.time)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the snapshot encoded as the flat frame buffer (see [`crate::bridge`]).
    pub fn frame_buffer(&mut self) -> Vec<f32> {
        crate::bridge::encode_frame(&self.snapshot())
    }

    /// Current player health for the HUD.
    pub fn player_health(&mut self) -> i32 {
        let mut query = self.world.query_filtered::<&Health, With<Player>>();
        query
            .get_single(&self.world)
            .map(|h| h.current)
            .unwrap_or(0)
    }

    /// Current player position.
    pub fn player_position(&mut self) -> Vec3 {
        let mut query = self.world.query_filtered::<&Position, With<Player>>();
        query
            .get_single(&self.world)
            .map(|p| p.0)
            .unwrap_or(Vec3::ZERO)
    }

    /// Whether a play session is active, for the HUD lock indicator.
    pub fn session_active(&self) -> bool {
        self.world
            .get_resource::<InputState>()
            .map(|input| input.session_active)
            .unwrap_or(false)
    }

    /// Number of live enemies.
    pub fn enemy_count(&mut self) -> usize {
        let mut query = self.world.query::<&EnemyId>();
        query.iter(&self.world).count()
    }

    /// Number of live projectiles.
    pub fn projectile_count(&mut self) -> usize {
        let mut query = self.world.query::<&ProjectileId>();
        query.iter(&self.world).count()
    }

    /// Number of live particles.
    pub fn particle_count(&mut self) -> usize {
        let mut query = self.world.query::<&ParticleId>();
        query.iter(&self.world).count()
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Get the elapsed simulation time.
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

//! Simulation configuration and arena geometry.
//!
//! All tunable constants live in the [`SimConfig`] resource so a single
//! struct describes a complete rule set. The defaults are the reference
//! tuning of the game.

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned arena the player and enemies are confined to.
///
/// The room is centered on the origin: X/Z span `[-half_extent, half_extent]`
/// and Y spans `[0, height]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Room {
    /// Half the side length of the square floor.
    pub half_extent: f32,
    /// Ceiling height above the floor.
    pub height: f32,
    /// Margin kept between the player and the walls when clamping.
    pub wall_margin: f32,
    /// Lowest Y the player may occupy.
    pub floor_offset: f32,
    /// Gap kept below the ceiling when clamping.
    pub ceiling_offset: f32,
    /// How far inside the walls enemies spawn.
    pub spawn_inset: f32,
}

impl Room {
    /// Clamp a position inside the walkable volume.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        let half = self.half_extent - self.wall_margin;
        Vec3::new(
            p.x.clamp(-half, half),
            p.y.clamp(self.floor_offset, self.height - self.ceiling_offset),
            p.z.clamp(-half, half),
        )
    }

    /// Point on one of the four wall edges, `spawn_inset` inside the wall.
    ///
    /// `edge` selects the wall (0..4, north/south/west/east) and `t` in
    /// [0, 1) selects the position along it. `y` is the height to spawn at.
    pub fn edge_spawn_point(&self, edge: u32, t: f32, y: f32) -> Vec3 {
        let inner = self.half_extent - self.spawn_inset;
        let along = -inner + t * (2.0 * inner);
        match edge % 4 {
            0 => Vec3::new(along, y, -inner),
            1 => Vec3::new(along, y, inner),
            2 => Vec3::new(-inner, y, along),
            _ => Vec3::new(inner, y, along),
        }
    }
}

impl Default for Room {
    fn default() -> Self {
        Self {
            half_extent: 10.0,
            height: 8.0,
            wall_margin: 0.5,
            floor_offset: 0.1,
            ceiling_offset: 0.1,
            spawn_inset: 1.0,
        }
    }
}

/// Global simulation configuration resource.
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default 60 Hz).
    pub fixed_timestep: f32,
    /// Seed for the simulation RNG.
    pub rng_seed: u32,
    /// Arena geometry.
    pub room: Room,

    // Player locomotion.
    /// Horizontal movement speed (units per second).
    pub movement_speed: f32,
    /// Exponential rate at which velocity approaches the input target.
    pub accel_rate: f32,
    /// Exponential rate at which velocity decays once input stops.
    /// Knockback decays at twice this rate.
    pub decel_rate: f32,
    /// Downward acceleration (units per second squared).
    pub gravity: f32,
    /// Upward velocity applied on jump.
    pub jump_impulse: f32,
    /// Y at which the player rests on the floor (half the player height).
    pub ground_level: f32,
    /// Where the player enters the arena.
    pub player_start: Vec3,
    /// Distance below eye level projectiles are fired from.
    pub fire_origin_drop: f32,

    // Projectiles.
    /// Projectile speed (units per second).
    pub projectile_speed: f32,
    /// Seconds before an unobstructed projectile expires.
    pub projectile_lifetime: f32,
    /// Distance from the player beyond which a projectile expires.
    pub projectile_max_distance: f32,
    /// A projectile closer than this to an enemy center counts as a hit.
    pub enemy_hit_radius: f32,

    // Enemies.
    /// Seconds between enemy spawns.
    pub enemy_spawn_interval: f32,
    /// Enemy pursuit speed (units per second).
    pub enemy_speed: f32,
    /// Side length of the cubic enemy body.
    pub enemy_size: f32,
    /// Player body radius used for contact detection.
    pub player_contact_radius: f32,
    /// Health removed per enemy contact.
    pub contact_damage: i32,
    /// Seconds after a hit during which further contact is ignored.
    pub invulnerability_window: f32,
    /// Speed imparted to the player when hit.
    pub knockback_force: f32,

    // Particles.
    /// Particles spawned per explosion burst.
    pub burst_particle_count: u32,
    /// Base particle speed (units per second).
    pub particle_speed: f32,
    /// Seconds a particle lives.
    pub particle_lifetime: f32,
    /// Smallest particle scale.
    pub particle_scale_min: f32,
    /// Largest particle scale (exclusive).
    pub particle_scale_max: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            rng_seed: 1,
            room: Room::default(),

            movement_speed: 5.0,
            accel_rate: 10.0,
            decel_rate: 8.0,
            gravity: 20.0,
            jump_impulse: 8.0,
            ground_level: 0.9,
            player_start: Vec3::new(0.0, 2.0, 5.0),
            fire_origin_drop: 0.2,

            projectile_speed: 30.0,
            projectile_lifetime: 10.0,
            projectile_max_distance: 100.0,
            enemy_hit_radius: 0.6,

            enemy_spawn_interval: 2.0,
            enemy_speed: 2.0,
            enemy_size: 1.0,
            player_contact_radius: 0.5,
            contact_damage: 20,
            invulnerability_window: 1.0,
            knockback_force: 10.0,

            burst_particle_count: 15,
            particle_speed: 4.0,
            particle_lifetime: 1.0,
            particle_scale_min: 0.1,
            particle_scale_max: 0.3,
        }
    }
}

impl SimConfig {
    /// Distance at which an enemy touches the player.
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.player_contact_radius + self.enemy_size * 0.5
    }

    /// Y at which enemies rest on the floor.
    #[inline]
    pub fn enemy_ground_level(&self) -> f32 {
        self.enemy_size * 0.5
    }
}

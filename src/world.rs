//! Snapshot types - the read-only view handed to external collaborators.
//!
//! The `Snapshot` struct provides a serializable copy of the simulation
//! state that the rendering and HUD collaborators consume. They never
//! mutate simulation state through it.

use crate::components::*;
use crate::input::InputState;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Player state for rendering and the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub health: i32,
    pub grounded: bool,
}

/// Single enemy state. `last_hit` drives the renderer's hit-flash effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub last_hit: Option<f32>,
}

/// Single projectile state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Single particle state, cosmetic data included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: [f32; 3],
    pub scale: f32,
}

/// Complete simulation state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current simulation tick.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    /// Whether a play session is active (HUD lock indicator).
    pub session_active: bool,
    /// Player state.
    pub player: PlayerSnapshot,
    /// All live enemies.
    pub enemies: Vec<EnemySnapshot>,
    /// All live projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// All live particles.
    pub particles: Vec<ParticleSnapshot>,
}

impl Snapshot {
    /// Create a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64, time: f32) -> Self {
        let session_active = world
            .get_resource::<InputState>()
            .map(|input| input.session_active)
            .unwrap_or(false);

        let mut player = PlayerSnapshot::default();
        let mut player_query =
            world.query_filtered::<(&Position, &Health, &Grounded), With<Player>>();
        if let Ok((pos, health, grounded)) = player_query.get_single(world) {
            player = PlayerSnapshot {
                x: pos.0.x,
                y: pos.0.y,
                z: pos.0.z,
                health: health.current,
                grounded: grounded.0,
            };
        }

        let mut enemies = Vec::new();
        let mut enemy_query = world.query::<(&EnemyId, &Position, &LastHit)>();
        for (id, pos, last_hit) in enemy_query.iter(world) {
            enemies.push(EnemySnapshot {
                id: id.0,
                x: pos.0.x,
                y: pos.0.y,
                z: pos.0.z,
                last_hit: last_hit.0,
            });
        }

        let mut projectiles = Vec::new();
        let mut projectile_query = world.query::<(&ProjectileId, &Position)>();
        for (id, pos) in projectile_query.iter(world) {
            projectiles.push(ProjectileSnapshot {
                id: id.0,
                x: pos.0.x,
                y: pos.0.y,
                z: pos.0.z,
            });
        }

        let mut particles = Vec::new();
        let mut particle_query = world.query::<(&ParticleId, &Position, &ParticleVisual)>();
        for (id, pos, visual) in particle_query.iter(world) {
            particles.push(ParticleSnapshot {
                id: id.0,
                x: pos.0.x,
                y: pos.0.y,
                z: pos.0.z,
                color: visual.color,
                scale: visual.scale,
            });
        }

        // ECS iteration order is not creation order once entities have been
        // removed; ids are monotonic, so sorting restores it for consumers.
        enemies.sort_by_key(|e| e.id);
        projectiles.sort_by_key(|p| p.id);
        particles.sort_by_key(|p| p.id);

        Self {
            tick,
            time,
            session_active,
            player,
            enemies,
            projectiles,
            particles,
        }
    }

    /// Serialize snapshot to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize snapshot to pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

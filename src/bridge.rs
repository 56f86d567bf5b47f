//! Renderer bridge - flat frame buffer for FFI consumers.
//!
//! Converts a [`Snapshot`] into a single contiguous `Vec<f32>` so a
//! renderer on the far side of an FFI boundary can read one allocation with
//! a fixed, documented layout instead of walking a JSON tree every frame.
//!
//! # Buffer Layout (Version 1)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ HEADER (HEADER_LEN = 8 elements)                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │ [0] tick (as f32)                                            │
//! │ [1] time (seconds)                                           │
//! │ [2] session_active (1.0 = active)                            │
//! │ [3] player_x  [4] player_y  [5] player_z                     │
//! │ [6] player_health                                            │
//! │ [7] player_grounded (1.0 = grounded)                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │ [8] enemy_count, then enemy_count × ENEMY_STRIDE:            │
//! │   [+0] id  [+1] x  [+2] y  [+3] z                            │
//! │   [+4] last_hit time (-1.0 when never hit)                   │
//! ├──────────────────────────────────────────────────────────────┤
//! │ projectile_count, then projectile_count × PROJECTILE_STRIDE: │
//! │   [+0] id  [+1] x  [+2] y  [+3] z                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │ particle_count, then particle_count × PARTICLE_STRIDE:       │
//! │   [+0] id  [+1] x  [+2] y  [+3] z                            │
//! │   [+4] r  [+5] g  [+6] b  [+7] scale                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field order and strides are stable; renderers may hard-code them.

use crate::world::Snapshot;

/// Number of f32 values in the header.
pub const HEADER_LEN: usize = 8;
/// Number of f32 values per enemy.
pub const ENEMY_STRIDE: usize = 5;
/// Number of f32 values per projectile.
pub const PROJECTILE_STRIDE: usize = 4;
/// Number of f32 values per particle.
pub const PARTICLE_STRIDE: usize = 8;

/// Sentinel for an enemy that has never been hit.
pub const NEVER_HIT: f32 = -1.0;

/// Encode a snapshot into the flat frame buffer.
pub fn encode_frame(snapshot: &Snapshot) -> Vec<f32> {
    let len = HEADER_LEN
        + 1
        + snapshot.enemies.len() * ENEMY_STRIDE
        + 1
        + snapshot.projectiles.len() * PROJECTILE_STRIDE
        + 1
        + snapshot.particles.len() * PARTICLE_STRIDE;
    let mut buffer = Vec::with_capacity(len);

    buffer.push(snapshot.tick as f32);
    buffer.push(snapshot.time);
    buffer.push(if snapshot.session_active { 1.0 } else { 0.0 });
    buffer.push(snapshot.player.x);
    buffer.push(snapshot.player.y);
    buffer.push(snapshot.player.z);
    buffer.push(snapshot.player.health as f32);
    buffer.push(if snapshot.player.grounded { 1.0 } else { 0.0 });

    buffer.push(snapshot.enemies.len() as f32);
    for enemy in &snapshot.enemies {
        buffer.push(enemy.id as f32);
        buffer.push(enemy.x);
        buffer.push(enemy.y);
        buffer.push(enemy.z);
        buffer.push(enemy.last_hit.unwrap_or(NEVER_HIT));
    }

    buffer.push(snapshot.projectiles.len() as f32);
    for projectile in &snapshot.projectiles {
        buffer.push(projectile.id as f32);
        buffer.push(projectile.x);
        buffer.push(projectile.y);
        buffer.push(projectile.z);
    }

    buffer.push(snapshot.particles.len() as f32);
    for particle in &snapshot.particles {
        buffer.push(particle.id as f32);
        buffer.push(particle.x);
        buffer.push(particle.y);
        buffer.push(particle.z);
        buffer.push(particle.color[0]);
        buffer.push(particle.color[1]);
        buffer.push(particle.color[2]);
        buffer.push(particle.scale);
    }

    debug_assert_eq!(buffer.len(), len);
    buffer
}

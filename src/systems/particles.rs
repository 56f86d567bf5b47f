//! Particle subsystem - explosion bursts and particle aging.
//!
//! Particles are purely cosmetic: they carry no references to the entities
//! that spawned them and nothing in the simulation reads them back. The
//! rendering collaborator consumes them through the snapshot.

use crate::components::*;
use crate::config::SimConfig;
use crate::rng::SimRng;
use crate::systems::locomotion::{DeltaTime, SimTime};
use bevy_ecs::prelude::*;
use glam::Vec3;
use std::f32::consts::TAU;

/// Explosion colors, red through near-white.
const EXPLOSION_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.27, 0.27],
    [1.0, 0.53, 0.0],
    [1.0, 0.80, 0.27],
    [1.0, 1.0, 0.87],
];

/// Queue an explosion burst at `origin`.
///
/// Every particle gets a uniform random azimuth, an upward bias in
/// [0.5, 1.0) scaling its vertical speed, a palette color, and a random
/// scale. The burst is issued through `commands`, so it lands in the world
/// atomically with whatever despawn triggered it.
pub fn spawn_explosion_burst(
    commands: &mut Commands,
    config: &SimConfig,
    rng: &mut SimRng,
    ids: &mut IdCounter,
    origin: Vec3,
    now: f32,
) {
    for _ in 0..config.burst_particle_count {
        let azimuth = rng.next_range(0.0, TAU);
        let upward_bias = rng.next_range(0.5, 1.0);
        let velocity =
            Vec3::new(azimuth.cos(), upward_bias, azimuth.sin()) * config.particle_speed;
        let color = rng
            .pick(&EXPLOSION_PALETTE)
            .copied()
            .unwrap_or(EXPLOSION_PALETTE[0]);
        let scale = rng.next_range(config.particle_scale_min, config.particle_scale_max);

        commands.spawn(ParticleBundle::new(
            ids.next_particle(),
            origin,
            velocity,
            color,
            scale,
            config.particle_lifetime,
            now,
        ));
    }
}

/// System that drifts particles along their velocity and prunes the ones
/// whose age exceeds their lifetime.
pub fn particle_update_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    time: Res<SimTime>,
    mut particles: Query<
        (Entity, &mut Position, &LinearVelocity, &Lifetime, &SpawnTime),
        With<ParticleId>,
    >,
) {
    for (entity, mut pos, velocity, lifetime, spawned) in particles.iter_mut() {
        pos.0 += velocity.0 * dt.0;
        if time.0 - spawned.0 > lifetime.0 {
            commands.entity(entity).despawn();
        }
    }
}

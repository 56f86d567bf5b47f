//! Projectile subsystem - firing, ballistics, and ordered expiry.
//!
//! Projectiles fly in a straight line at constant speed; gravity does not
//! apply to them. Expiry reasons are checked in a fixed priority order so a
//! projectile leaves the world for exactly one reason per tick:
//! enemy hit, then age, then distance from the player.

use crate::components::*;
use crate::config::SimConfig;
use crate::input::InputState;
use crate::math::EPSILON;
use crate::rng::SimRng;
use crate::systems::locomotion::{DeltaTime, SimTime};
use crate::systems::particles::spawn_explosion_burst;
use bevy_ecs::prelude::*;
use glam::Vec3;

/// System that consumes a latched fire intent and spawns a projectile from
/// just below the player's eye along the current look direction.
///
/// The look direction is contractually pre-normalized by the camera
/// collaborator; a degenerate vector is dropped with a warning instead of
/// being propagated into the simulation.
pub fn fire_system(
    mut commands: Commands,
    time: Res<SimTime>,
    config: Res<SimConfig>,
    mut input: ResMut<InputState>,
    mut ids: ResMut<IdCounter>,
    player: Query<&Position, With<Player>>,
) {
    if !input.session_active || !input.take_fire() {
        return;
    }
    let Ok(player_pos) = player.get_single() else {
        return;
    };

    let look = input.look_dir;
    if look.length_squared() < EPSILON * EPSILON {
        log::warn!("dropping fire intent: degenerate look direction {look:?}");
        return;
    }
    let direction = look.normalize();
    let origin = player_pos.0 - Vec3::Y * config.fire_origin_drop;

    commands.spawn(ProjectileBundle::new(
        ids.next_projectile(),
        origin,
        direction,
        time.0,
    ));
}

/// System that advances projectiles along their fixed direction.
pub fn projectile_advance_system(
    dt: Res<DeltaTime>,
    config: Res<SimConfig>,
    mut projectiles: Query<(&mut Position, &Direction), With<ProjectileId>>,
) {
    for (mut pos, direction) in projectiles.iter_mut() {
        pos.0 += direction.0 * config.projectile_speed * dt.0;
    }
}

/// System that expires projectiles, in priority order.
///
/// An enemy hit despawns the projectile and the enemy and queues an
/// explosion burst at the enemy's position; all three land in the same
/// command batch, so no observer ever sees one without the others. Each
/// projectile takes at most one enemy (first in iteration order), and an
/// enemy already claimed this tick cannot be claimed again.
pub fn projectile_expiry_system(
    mut commands: Commands,
    time: Res<SimTime>,
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdCounter>,
    projectiles: Query<(Entity, &ProjectileId, &Position, &SpawnTime)>,
    enemies: Query<(Entity, &EnemyId, &Position), Without<ProjectileId>>,
    player: Query<&Position, (With<Player>, Without<ProjectileId>)>,
) {
    let player_pos = player.get_single().ok();

    // ECS iteration order drifts as entities are removed; both collections
    // are walked in creation order (ids are monotonic) so "first match"
    // stays stable across removals.
    let mut shots: Vec<_> = projectiles.iter().collect();
    shots.sort_by_key(|(_, id, _, _)| id.0);
    let mut targets: Vec<_> = enemies.iter().collect();
    targets.sort_by_key(|(_, id, _)| id.0);

    let mut claimed: Vec<Entity> = Vec::new();

    for (entity, _, pos, spawned) in shots {
        let hit = targets.iter().find(|(enemy, _, enemy_pos)| {
            !claimed.contains(enemy) && pos.distance_to(enemy_pos) < config.enemy_hit_radius
        });
        if let Some((enemy, _, enemy_pos)) = hit {
            claimed.push(*enemy);
            commands.entity(entity).despawn();
            commands.entity(*enemy).despawn();
            spawn_explosion_burst(
                &mut commands,
                &config,
                &mut rng,
                &mut ids,
                enemy_pos.0,
                time.0,
            );
            continue;
        }

        if time.0 - spawned.0 > config.projectile_lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        if let Some(player_pos) = player_pos {
            if pos.distance_to(player_pos) > config.projectile_max_distance {
                commands.entity(entity).despawn();
            }
        }
    }
}

//! Enemy subsystem - timed spawning, pursuit, and player contact.
//!
//! Contact resolution runs before the projectile systems each tick: an
//! enemy that dies to a projectile this tick still gets its chance to
//! damage the player first.

use crate::components::*;
use crate::config::SimConfig;
use crate::math;
use crate::rng::SimRng;
use crate::systems::locomotion::{DeltaTime, SimTime};
use bevy_ecs::prelude::*;
use glam::Vec3;

/// Accumulator driving the spawn cadence, independent of the render frame
/// rate.
#[derive(Resource, Debug, Default)]
pub struct EnemySpawnTimer {
    pub accumulator: f32,
}

/// System that spawns one enemy per elapsed interval at a random point just
/// inside one of the four walls.
///
/// Spawns go through the command queue, so observers within the same tick
/// never see a half-initialized enemy.
pub fn enemy_spawn_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    time: Res<SimTime>,
    config: Res<SimConfig>,
    mut timer: ResMut<EnemySpawnTimer>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdCounter>,
) {
    timer.accumulator += dt.0;
    while timer.accumulator >= config.enemy_spawn_interval {
        timer.accumulator -= config.enemy_spawn_interval;

        let edge = rng.next_int(4);
        let along = rng.next();
        let position = config
            .room
            .edge_spawn_point(edge, along, config.enemy_ground_level());
        commands.spawn(EnemyBundle::new(ids.next_enemy(), position, time.0));
    }
}

/// System that advances every enemy straight toward the player's current
/// position. The heading is recomputed from scratch each tick; there is no
/// path prediction and no separation, so enemies may overlap.
pub fn enemy_pursuit_system(
    dt: Res<DeltaTime>,
    config: Res<SimConfig>,
    player: Query<&Position, With<Player>>,
    mut enemies: Query<&mut Position, (With<EnemyId>, Without<Player>)>,
) {
    let Ok(player_pos) = player.get_single() else {
        return;
    };

    for mut pos in enemies.iter_mut() {
        if let Some(heading) = math::direction_to(pos.0, player_pos.0) {
            pos.0 += heading * config.enemy_speed * dt.0;
        }
    }
}

/// System that applies contact damage and knockback to the player.
///
/// Damage is gated by the invulnerability window: a contact within the
/// window leaves health, knockback, and the hit timestamp untouched even if
/// the enemy keeps overlapping the player. Contact never harms the enemy;
/// only projectiles do.
pub fn enemy_contact_system(
    time: Res<SimTime>,
    config: Res<SimConfig>,
    mut player: Query<
        (&Position, &mut Health, &mut LastHit, &mut Knockback),
        With<Player>,
    >,
    enemies: Query<&Position, (With<EnemyId>, Without<Player>)>,
) {
    let Ok((player_pos, mut health, mut last_hit, mut knockback)) = player.get_single_mut()
    else {
        return;
    };

    let contact_distance = config.contact_distance();
    for enemy_pos in enemies.iter() {
        if player_pos.distance_to(enemy_pos) >= contact_distance {
            continue;
        }

        let invulnerable = last_hit
            .0
            .is_some_and(|hit| time.0 - hit <= config.invulnerability_window);
        if invulnerable {
            continue;
        }

        health.damage(config.contact_damage);
        last_hit.0 = Some(time.0);
        // Degenerate exact overlap falls back to a straight-up shove.
        let away = math::direction_to(enemy_pos.0, player_pos.0).unwrap_or(Vec3::Y);
        knockback.0 = away * config.knockback_force;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> (World, Schedule) {
        let config = SimConfig::default();
        let mut world = World::new();
        world.insert_resource(DeltaTime(config.fixed_timestep));
        world.insert_resource(SimTime(0.0));
        world.insert_resource(SimRng::new(42));
        world.insert_resource(IdCounter::default());
        world.insert_resource(EnemySpawnTimer::default());
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (enemy_spawn_system, enemy_pursuit_system, enemy_contact_system).chain(),
        );
        (world, schedule)
    }

    fn enemy_count(world: &mut World) -> usize {
        let mut query = world.query::<&EnemyId>();
        query.iter(world).count()
    }

    #[test]
    fn test_spawner_follows_interval() {
        let (mut world, mut schedule) = test_world();
        let config = *world.resource::<SimConfig>();
        let ticks_per_spawn =
            (config.enemy_spawn_interval / config.fixed_timestep).round() as usize;

        // Three intervals produce exactly three enemies. Two extra ticks of
        // margin absorb accumulator rounding at the threshold.
        for _ in 0..ticks_per_spawn * 3 + 2 {
            schedule.run(&mut world);
        }
        assert_eq!(enemy_count(&mut world), 3);
    }

    #[test]
    fn test_spawns_land_on_edge_band_at_ground_level() {
        let (mut world, mut schedule) = test_world();
        let config = *world.resource::<SimConfig>();
        let ticks_per_spawn =
            (config.enemy_spawn_interval / config.fixed_timestep).round() as usize;

        // Spawn a batch without a player present so nothing moves afterwards.
        for _ in 0..ticks_per_spawn * 8 + 2 {
            schedule.run(&mut world);
        }

        let inner = config.room.half_extent - config.room.spawn_inset;
        let mut query = world.query_filtered::<&Position, With<EnemyId>>();
        let mut count = 0;
        for pos in query.iter(&world) {
            count += 1;
            assert!((pos.0.y - config.enemy_ground_level()).abs() < 1e-5);
            assert!(pos.0.x.abs() <= inner + 1e-4);
            assert!(pos.0.z.abs() <= inner + 1e-4);
            assert!(
                (pos.0.x.abs() - inner).abs() < 1e-4 || (pos.0.z.abs() - inner).abs() < 1e-4,
                "spawn not on an edge band: {:?}",
                pos.0
            );
        }
        assert_eq!(count, 8);
    }

    #[test]
    fn test_pursuit_is_straight_line_at_constant_speed() {
        let (mut world, mut schedule) = test_world();
        let config = *world.resource::<SimConfig>();

        world.spawn(PlayerBundle::new(Vec3::new(0.0, 0.9, 0.0)));
        let start = Vec3::new(9.0, 0.5, 0.0);
        world.spawn(EnemyBundle::new(EnemyId(100), start, 0.0));

        let seconds = 2.0;
        let ticks = (seconds / config.fixed_timestep).round() as usize;
        for _ in 0..ticks {
            schedule.run(&mut world);
        }

        let mut query = world.query::<(&EnemyId, &Position)>();
        let pos = query
            .iter(&world)
            .find(|(id, _)| **id == EnemyId(100))
            .expect("seeded enemy still present")
            .1
            .0;

        // Stationary player: pursuit degenerates to linear interpolation
        // from the spawn point toward the player at enemy speed.
        let heading = (Vec3::new(0.0, 0.9, 0.0) - start).normalize();
        let expected = start + heading * config.enemy_speed * seconds;
        assert!((pos - expected).length() < 0.05, "got {pos:?}, want {expected:?}");
    }

    #[test]
    fn test_contact_damage_gated_by_invulnerability_window() {
        let (mut world, mut schedule) = test_world();
        let config = *world.resource::<SimConfig>();

        let player_pos = Vec3::new(0.0, 0.9, 0.0);
        world.spawn(PlayerBundle::new(player_pos));
        // Parked inside contact range; pursuit barely moves it between checks.
        world.spawn(EnemyBundle::new(
            EnemyId(100),
            player_pos + Vec3::new(0.3, 0.0, 0.0),
            0.0,
        ));

        let health_at = |world: &mut World| {
            let mut query = world.query_filtered::<&Health, With<Player>>();
            query.single(world).current
        };

        // First contact at t=0.
        schedule.run(&mut world);
        assert_eq!(health_at(&mut world), 100 - config.contact_damage);

        // Continuous contact at t=0.5: inside the window, no further damage.
        world.resource_mut::<SimTime>().0 = 0.5;
        schedule.run(&mut world);
        assert_eq!(health_at(&mut world), 100 - config.contact_damage);

        // t=1.2: window elapsed, second tick of damage lands.
        world.resource_mut::<SimTime>().0 = 1.2;
        schedule.run(&mut world);
        assert_eq!(health_at(&mut world), 100 - 2 * config.contact_damage);
    }

    #[test]
    fn test_contact_applies_knockback_away_from_enemy() {
        let (mut world, mut schedule) = test_world();
        let config = *world.resource::<SimConfig>();

        let player_pos = Vec3::new(0.0, 0.9, 0.0);
        world.spawn(PlayerBundle::new(player_pos));
        world.spawn(EnemyBundle::new(
            EnemyId(100),
            player_pos + Vec3::new(-0.5, 0.0, 0.0),
            0.0,
        ));

        schedule.run(&mut world);

        let mut query = world.query_filtered::<(&Knockback, &LastHit), With<Player>>();
        let (knockback, last_hit) = query.single(&world);
        assert_eq!(last_hit.0, Some(0.0));
        // Enemy is on -X, so the shove points toward +X.
        assert!(knockback.0.x > 0.0);
        assert!((knockback.0.length() - config.knockback_force).abs() < 0.2);
    }

    #[test]
    fn test_contact_never_harms_enemy() {
        let (mut world, mut schedule) = test_world();

        let player_pos = Vec3::new(0.0, 0.9, 0.0);
        world.spawn(PlayerBundle::new(player_pos));
        world.spawn(EnemyBundle::new(EnemyId(100), player_pos, 0.0));

        for _ in 0..10 {
            schedule.run(&mut world);
        }

        let mut query = world.query_filtered::<&Health, (With<EnemyId>, Without<Player>)>();
        assert_eq!(query.single(&world).current, 1);
    }
}

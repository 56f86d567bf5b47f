//! Player locomotion - integrates input intents into movement.
//!
//! Runs first in the tick so the rest of the simulation sees the player's
//! settled position for this frame.

use crate::components::*;
use crate::config::SimConfig;
use crate::input::InputState;
use crate::math::{damp, damp_vec3, horizontal_forward, right_of};
use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

/// Resource containing the delta time for the current tick.
#[derive(Resource, Default)]
pub struct DeltaTime(pub f32);

/// Resource containing the elapsed simulation time in seconds, as of the
/// start of the current tick. All entity timestamps are drawn from this.
#[derive(Resource, Default)]
pub struct SimTime(pub f32);

/// System that moves the player.
///
/// Order of operations per tick: input target -> velocity smoothing ->
/// gravity and jump -> knockback decay -> camera-relative displacement ->
/// room clamp -> ground snap. While the session is inactive the player is
/// frozen in place.
pub fn locomotion_system(
    dt: Res<DeltaTime>,
    config: Res<SimConfig>,
    mut input: ResMut<InputState>,
    mut query: Query<
        (
            &mut Position,
            &mut PlayerMotion,
            &mut VerticalVelocity,
            &mut Knockback,
            &mut Grounded,
        ),
        With<Player>,
    >,
) {
    let delta = dt.0;
    let Ok((mut pos, mut motion, mut vertical, mut knockback, mut grounded)) =
        query.get_single_mut()
    else {
        return;
    };

    if !input.session_active {
        return;
    }

    // Held intents set the target; the current velocity chases it. An axis
    // with no input decays with the (slower) deceleration rate so stopping
    // feels distinct from reversing.
    motion.target = Vec2::new(input.strafe, input.forward) * config.movement_speed;
    let target = motion.target;
    motion.current.x = if target.x == 0.0 {
        damp(motion.current.x, 0.0, config.decel_rate, delta)
    } else {
        damp(motion.current.x, target.x, config.accel_rate, delta)
    };
    motion.current.y = if target.y == 0.0 {
        damp(motion.current.y, 0.0, config.decel_rate, delta)
    } else {
        damp(motion.current.y, target.y, config.accel_rate, delta)
    };

    // Gravity accumulates without a terminal velocity; the floor clamp
    // bounds the result. A jump only takes effect while grounded, but the
    // intent is consumed either way.
    vertical.0 -= config.gravity * delta;
    if input.take_jump() && grounded.0 {
        vertical.0 = config.jump_impulse;
        grounded.0 = false;
    }

    // Knockback decays at twice the normal deceleration rate.
    knockback.0 = damp_vec3(knockback.0, Vec3::ZERO, config.decel_rate * 2.0, delta);

    // Movement bases come from the look direction projected onto the
    // horizontal plane. A vertical look direction contributes no horizontal
    // movement; gravity and knockback still apply.
    let (forward, right) = match horizontal_forward(input.look_dir) {
        Some(forward) => (forward, right_of(forward)),
        None => (Vec3::ZERO, Vec3::ZERO),
    };

    let displacement = (forward * motion.current.y + right * motion.current.x + knockback.0)
        * delta
        + Vec3::Y * vertical.0 * delta;

    pos.0 = config.room.clamp(pos.0 + displacement);

    if pos.0.y <= config.ground_level {
        pos.0.y = config.ground_level;
        vertical.0 = 0.0;
        grounded.0 = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MoveAxis;

    fn test_world() -> (World, Schedule) {
        let config = SimConfig::default();
        let mut world = World::new();
        world.insert_resource(DeltaTime(config.fixed_timestep));
        world.insert_resource(SimTime(0.0));
        let mut input = InputState::default();
        input.session_active = true;
        world.insert_resource(input);
        world.spawn(PlayerBundle::new(config.player_start));
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.add_systems(locomotion_system);
        (world, schedule)
    }

    fn player_position(world: &mut World) -> Vec3 {
        let mut query = world.query_filtered::<&Position, With<Player>>();
        query.single(world).0
    }

    #[test]
    fn test_gravity_settles_player_on_ground() {
        let (mut world, mut schedule) = test_world();

        for _ in 0..120 {
            schedule.run(&mut world);
        }

        let config = *world.resource::<SimConfig>();
        let pos = player_position(&mut world);
        assert!((pos.y - config.ground_level).abs() < 1e-5);

        let mut query = world.query_filtered::<&Grounded, With<Player>>();
        assert!(query.single(&world).0);
    }

    #[test]
    fn test_forward_movement_follows_look_direction() {
        let (mut world, mut schedule) = test_world();
        world
            .resource_mut::<InputState>()
            .set_axis(MoveAxis::Forward, 1.0);

        let start = player_position(&mut world);
        for _ in 0..60 {
            schedule.run(&mut world);
        }
        let end = player_position(&mut world);

        // Default look is -Z: the player should have moved that way only.
        assert!(end.z < start.z - 1.0);
        assert!((end.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn test_position_always_clamped_to_room() {
        let (mut world, mut schedule) = test_world();
        world
            .resource_mut::<InputState>()
            .set_axis(MoveAxis::Forward, 1.0);

        let config = *world.resource::<SimConfig>();
        let bound = config.room.half_extent - config.room.wall_margin;

        // Run long enough to slam into the far wall, checking every tick.
        for _ in 0..600 {
            schedule.run(&mut world);
            let pos = player_position(&mut world);
            assert!(pos.x.abs() <= bound + 1e-5);
            assert!(pos.z.abs() <= bound + 1e-5);
            assert!(pos.y >= config.room.floor_offset - 1e-5);
            assert!(pos.y <= config.room.height - config.room.ceiling_offset + 1e-5);
        }

        let pos = player_position(&mut world);
        assert!((pos.z.abs() - bound).abs() < 1e-4, "expected to reach the wall");
    }

    #[test]
    fn test_jump_only_while_grounded() {
        let (mut world, mut schedule) = test_world();

        // Settle on the floor first.
        for _ in 0..120 {
            schedule.run(&mut world);
        }

        world.resource_mut::<InputState>().trigger_jump();
        schedule.run(&mut world);

        let config = *world.resource::<SimConfig>();
        {
            let mut query = world.query_filtered::<(&VerticalVelocity, &Grounded), With<Player>>();
            let (vertical, grounded) = query.single(&world);
            assert!(vertical.0 > 0.0);
            assert!(!grounded.0);
        }

        // Airborne jump intent is consumed without effect.
        world.resource_mut::<InputState>().trigger_jump();
        schedule.run(&mut world);
        let mut query = world.query_filtered::<&VerticalVelocity, With<Player>>();
        let vertical = query.single(&world).0;
        assert!(vertical < config.jump_impulse, "jump must not re-trigger in the air");
    }

    #[test]
    fn test_velocity_decays_after_release() {
        let (mut world, mut schedule) = test_world();
        world
            .resource_mut::<InputState>()
            .set_axis(MoveAxis::Strafe, 1.0);
        for _ in 0..30 {
            schedule.run(&mut world);
        }
        world
            .resource_mut::<InputState>()
            .clear_axis(MoveAxis::Strafe);

        let mut previous = {
            let mut query = world.query_filtered::<&PlayerMotion, With<Player>>();
            query.single(&world).current.x
        };
        assert!(previous > 0.0);

        for _ in 0..60 {
            schedule.run(&mut world);
            let mut query = world.query_filtered::<&PlayerMotion, With<Player>>();
            let current = query.single(&world).current.x;
            assert!(current <= previous);
            previous = current;
        }
        assert!(previous < 0.05);
    }

    #[test]
    fn test_knockback_decays_independently() {
        let (mut world, mut schedule) = test_world();

        {
            let mut query = world.query_filtered::<&mut Knockback, With<Player>>();
            query.single_mut(&mut world).0 = Vec3::new(10.0, 0.0, 0.0);
        }

        let config = *world.resource::<SimConfig>();
        schedule.run(&mut world);

        let mut query = world.query_filtered::<&Knockback, With<Player>>();
        let kb = query.single(&world).0;
        let expected = 10.0 * (-config.decel_rate * 2.0 * config.fixed_timestep).exp();
        assert!((kb.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_inactive_session_freezes_player() {
        let (mut world, mut schedule) = test_world();
        world.resource_mut::<InputState>().session_active = false;
        world
            .resource_mut::<InputState>()
            .set_axis(MoveAxis::Forward, 1.0);

        let start = player_position(&mut world);
        for _ in 0..60 {
            schedule.run(&mut world);
        }
        assert_eq!(player_position(&mut world), start);
    }
}

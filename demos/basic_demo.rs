//! Basic demonstration of the arena simulation.
//!
//! Run with: cargo run --example basic_demo

use arena_sim::{MoveAxis, SimWorld};
use glam::Vec3;

fn main() {
    println!("=== Arena Sim - Simulation Demo ===\n");

    let mut sim = SimWorld::new();
    sim.set_session_active(true);
    sim.set_look_direction(Vec3::NEG_Z);

    println!("Initial state:");
    print_state(&mut sim);

    // Walk forward and take a shot down range.
    println!("\n--- Holding forward, firing at t=1s ---\n");
    sim.set_move_axis(MoveAxis::Forward, 1.0);

    let dt = 1.0 / 60.0;
    for tick in 0..600 {
        if tick == 60 {
            sim.trigger_fire();
        }
        if tick == 180 {
            sim.trigger_jump();
        }
        sim.step(dt);

        if (tick + 1) % 120 == 0 {
            println!("--- Tick {} (t={:.1}s) ---", sim.current_tick(), sim.current_time());
            print_state(&mut sim);
        }
    }

    println!("\nframe buffer: {} floats", sim.frame_buffer().len());

    // Final snapshot as JSON.
    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
}

fn print_state(sim: &mut SimWorld) {
    let snapshot = sim.snapshot();
    println!(
        "  player: pos=({:.1}, {:.1}, {:.1}) hp={} grounded={}",
        snapshot.player.x,
        snapshot.player.y,
        snapshot.player.z,
        snapshot.player.health,
        snapshot.player.grounded,
    );
    println!(
        "  enemies={} projectiles={} particles={}",
        snapshot.enemies.len(),
        snapshot.projectiles.len(),
        snapshot.particles.len(),
    );
    for enemy in &snapshot.enemies {
        println!(
            "    enemy {}: pos=({:.1}, {:.1}, {:.1})",
            enemy.id, enemy.x, enemy.y, enemy.z
        );
    }
}

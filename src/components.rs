//! ECS components for the arena simulation.
//!
//! Components are pure data containers attached to entities.
//! All game logic lives in systems that query these components.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// World-space position (Y up).
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position(pub Vec3);

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

/// Straight-line velocity, used by particles.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinearVelocity(pub Vec3);

/// Fixed travel direction of a projectile. Unit length at spawn and never
/// mutated afterwards.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Direction(pub Vec3);

// ============================================================================
// IDENTITY COMPONENTS
// ============================================================================

/// Marker for the single player entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Unique identifier for a projectile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Unique identifier for an enemy.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Unique identifier for a particle.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Monotonic id allocator for every entity class.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IdCounter {
    projectiles: u32,
    enemies: u32,
    particles: u32,
}

impl IdCounter {
    pub fn next_projectile(&mut self) -> ProjectileId {
        let id = self.projectiles;
        self.projectiles += 1;
        ProjectileId(id)
    }

    pub fn next_enemy(&mut self) -> EnemyId {
        let id = self.enemies;
        self.enemies += 1;
        EnemyId(id)
    }

    pub fn next_particle(&mut self) -> ParticleId {
        let id = self.particles;
        self.particles += 1;
        ParticleId(id)
    }
}

// ============================================================================
// PLAYER LOCOMOTION COMPONENTS
// ============================================================================

/// Smoothed horizontal movement state.
///
/// Both vectors are in semantic movement space: `x` is strafe velocity,
/// `y` is forward velocity. World-space displacement is produced each tick
/// by projecting through the camera bases.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerMotion {
    /// Velocity currently applied.
    pub current: Vec2,
    /// Velocity the held input asks for.
    pub target: Vec2,
}

/// Vertical velocity accumulated from gravity and jumps.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VerticalVelocity(pub f32);

/// Transient velocity imposed on the player when hit. Decays independently
/// of normal movement.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Knockback(pub Vec3);

/// Whether the player is resting on the floor plane.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grounded(pub bool);

// ============================================================================
// COMBAT COMPONENTS
// ============================================================================

/// Integer health, floored at zero.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Simulation time of the most recent hit.
///
/// On the player this gates the invulnerability window; on enemies it is a
/// hit-flash signal for the renderer.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LastHit(pub Option<f32>);

// ============================================================================
// LIFECYCLE COMPONENTS
// ============================================================================

/// Simulation time an entity was created at.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnTime(pub f32);

/// Seconds an entity lives after its spawn time.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Lifetime(pub f32);

/// Render hints for a particle. No gameplay meaning.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParticleVisual {
    pub color: [f32; 3],
    pub scale: f32,
}

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning the player entity.
#[derive(Bundle)]
pub struct PlayerBundle {
    pub marker: Player,
    pub position: Position,
    pub motion: PlayerMotion,
    pub vertical: VerticalVelocity,
    pub knockback: Knockback,
    pub grounded: Grounded,
    pub health: Health,
    pub last_hit: LastHit,
}

impl PlayerBundle {
    pub fn new(start: Vec3) -> Self {
        Self {
            marker: Player,
            position: Position(start),
            motion: PlayerMotion::default(),
            vertical: VerticalVelocity(0.0),
            knockback: Knockback(Vec3::ZERO),
            grounded: Grounded(true),
            health: Health::new(100),
            last_hit: LastHit(None),
        }
    }
}

/// Bundle for spawning a projectile.
#[derive(Bundle)]
pub struct ProjectileBundle {
    pub id: ProjectileId,
    pub position: Position,
    pub direction: Direction,
    pub spawned: SpawnTime,
}

impl ProjectileBundle {
    /// `direction` must already be unit length.
    pub fn new(id: ProjectileId, origin: Vec3, direction: Vec3, now: f32) -> Self {
        Self {
            id,
            position: Position(origin),
            direction: Direction(direction),
            spawned: SpawnTime(now),
        }
    }
}

/// Bundle for spawning an enemy.
#[derive(Bundle)]
pub struct EnemyBundle {
    pub id: EnemyId,
    pub position: Position,
    pub health: Health,
    pub spawned: SpawnTime,
    pub last_hit: LastHit,
}

impl EnemyBundle {
    pub fn new(id: EnemyId, position: Vec3, now: f32) -> Self {
        Self {
            id,
            position: Position(position),
            // One point of health: any projectile hit is a kill.
            health: Health::new(1),
            spawned: SpawnTime(now),
            last_hit: LastHit(None),
        }
    }
}

/// Bundle for spawning a particle.
#[derive(Bundle)]
pub struct ParticleBundle {
    pub id: ParticleId,
    pub position: Position,
    pub velocity: LinearVelocity,
    pub visual: ParticleVisual,
    pub lifetime: Lifetime,
    pub spawned: SpawnTime,
}

impl ParticleBundle {
    pub fn new(
        id: ParticleId,
        origin: Vec3,
        velocity: Vec3,
        color: [f32; 3],
        scale: f32,
        lifetime: f32,
        now: f32,
    ) -> Self {
        Self {
            id,
            position: Position(origin),
            velocity: LinearVelocity(velocity),
            visual: ParticleVisual { color, scale },
            lifetime: Lifetime(lifetime),
            spawned: SpawnTime(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_floors_at_zero() {
        let mut health = Health::new(100);
        health.damage(30);
        assert_eq!(health.current, 70);
        health.damage(500);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_id_counter_monotonic() {
        let mut ids = IdCounter::default();
        assert_eq!(ids.next_projectile(), ProjectileId(0));
        assert_eq!(ids.next_projectile(), ProjectileId(1));
        // Counters are independent per entity class.
        assert_eq!(ids.next_enemy(), EnemyId(0));
        assert_eq!(ids.next_particle(), ParticleId(0));
        assert_eq!(ids.next_enemy(), EnemyId(1));
    }

    #[test]
    fn test_enemy_bundle_one_hit_kill() {
        let bundle = EnemyBundle::new(EnemyId(0), Vec3::ZERO, 0.0);
        assert_eq!(bundle.health.current, 1);
    }
}

//! ECS systems for the arena simulation.
//!
//! Systems contain the game logic that operates on components.
//!
//! ## Tick Order
//!
//! The schedule chains every system into one explicit sequence; the order
//! is a behavioral contract, not an artifact:
//!
//! 1. `locomotion_system` - integrates player movement
//! 2. `enemy_spawn_system` - timed spawner
//! 3. `enemy_pursuit_system` - enemies advance on the player
//! 4. `enemy_contact_system` - contact damage before projectiles resolve,
//!    so an enemy killed this tick still got its hit in
//! 5. `fire_system` - consumes the latched fire intent
//! 6. `projectile_advance_system` - straight-line ballistics
//! 7. `projectile_expiry_system` - hit/age/range expiry and explosions
//! 8. `particle_update_system` - drifts and prunes cosmetic particles

pub mod enemy;
pub mod locomotion;
pub mod particles;
pub mod projectile;

pub use enemy::*;
pub use locomotion::*;
pub use particles::*;
pub use projectile::*;

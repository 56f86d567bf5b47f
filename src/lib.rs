//! Arena Sim - first-person arena shooter simulation core
//!
//! A deterministic, fixed-timestep ECS simulation of a single-room arena:
//! player locomotion, projectiles, pursuing enemies, contact damage, and
//! cosmetic particle bursts. Uses `bevy_ecs` for the entity-component-system
//! architecture. Rendering, input capture, and the HUD are external
//! collaborators that talk to [`SimWorld`] through snapshots and intents.

pub mod api;
pub mod bridge;
pub mod components;
pub mod config;
pub mod input;
pub mod math;
pub mod profiler;
pub mod rng;
pub mod systems;
pub mod world;

pub use api::SimWorld;
pub use components::*;
pub use config::{Room, SimConfig};
pub use input::{InputState, MoveAxis};
pub use rng::SimRng;
pub use systems::*;
pub use world::Snapshot;

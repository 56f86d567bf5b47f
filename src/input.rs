//! Latched input intents.
//!
//! The input collaborator records intents asynchronously between ticks;
//! the simulation consumes them at the start of the next fixed update.
//! Held axes persist until explicitly cleared, while jump and fire are
//! edge-triggered flags consumed at most once per tick. A press and
//! release landing between two ticks is lost by design.
//!
//! The core knows nothing about physical keys or buttons; it only sees
//! semantic axes and triggers.

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Semantic movement axis, decoupled from any physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAxis {
    /// Positive values move toward the look direction.
    Forward,
    /// Positive values strafe to the right.
    Strafe,
}

/// Latched input state consumed by the tick driver.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct InputState {
    /// Held forward/back axis in [-1, 1].
    pub forward: f32,
    /// Held strafe axis in [-1, 1].
    pub strafe: f32,
    /// Current look direction, supplied by the camera collaborator.
    pub look_dir: Vec3,
    /// Whether a play session is active (pointer locked). While inactive
    /// the player is frozen and fire is ignored.
    pub session_active: bool,
    jump: bool,
    fire: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: 0.0,
            strafe: 0.0,
            look_dir: Vec3::NEG_Z,
            session_active: false,
            jump: false,
            fire: false,
        }
    }
}

impl InputState {
    /// Set a held axis to a signed magnitude.
    pub fn set_axis(&mut self, axis: MoveAxis, value: f32) {
        let value = value.clamp(-1.0, 1.0);
        match axis {
            MoveAxis::Forward => self.forward = value,
            MoveAxis::Strafe => self.strafe = value,
        }
    }

    /// Release a held axis.
    pub fn clear_axis(&mut self, axis: MoveAxis) {
        self.set_axis(axis, 0.0);
    }

    /// Latch a jump intent.
    pub fn trigger_jump(&mut self) {
        self.jump = true;
    }

    /// Latch a fire intent.
    pub fn trigger_fire(&mut self) {
        self.fire = true;
    }

    /// Consume the jump intent, if any. Returns true at most once per latch.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    /// Consume the fire intent, if any.
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire)
    }

    /// Drop any unconsumed edge intents. Called by the driver at the end of
    /// every fixed update so stale triggers never leak into a later tick.
    pub fn reset_edges(&mut self) {
        self.jump = false;
        self.fire = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_latch_until_cleared() {
        let mut input = InputState::default();
        input.set_axis(MoveAxis::Forward, 1.0);
        assert_eq!(input.forward, 1.0);
        input.clear_axis(MoveAxis::Forward);
        assert_eq!(input.forward, 0.0);
    }

    #[test]
    fn test_axis_magnitude_clamped() {
        let mut input = InputState::default();
        input.set_axis(MoveAxis::Strafe, -7.5);
        assert_eq!(input.strafe, -1.0);
    }

    #[test]
    fn test_edge_intents_consumed_once() {
        let mut input = InputState::default();
        input.trigger_fire();
        assert!(input.take_fire());
        assert!(!input.take_fire());

        input.trigger_jump();
        assert!(input.take_jump());
        assert!(!input.take_jump());
    }

    #[test]
    fn test_reset_drops_unconsumed_edges() {
        let mut input = InputState::default();
        input.trigger_jump();
        input.trigger_fire();
        input.reset_edges();
        assert!(!input.take_jump());
        assert!(!input.take_fire());
    }
}

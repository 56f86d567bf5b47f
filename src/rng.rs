//! Deterministic seeded random number generator.
//!
//! Uses the xorshift32 algorithm. The simulation must produce identical
//! state for identical seeds and timed inputs, so all randomness (enemy
//! spawn placement, particle bursts) flows through this single resource
//! rather than an OS-seeded generator.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Seeded pseudo-random generator resource.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    state: u32,
}

impl SimRng {
    /// Creates a new generator. A seed of 0 is remapped to 1 to avoid the
    /// degenerate all-zero xorshift sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random float in [0, 1).
    pub fn next(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Random float in [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Random integer in [0, max).
    pub fn next_int(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Random element of a slice, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.next_int(slice.len() as u32) as usize])
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(1)
    }
}

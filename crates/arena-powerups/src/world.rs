use rand::Rng;
use serde::{Deserialize, Serialize};

use arena_core::player::Position;

use crate::config::ConfigError;

/// Source of spawn locations inside the playable area.
pub trait WorldBounds {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position;
}

/// Rectangular arena anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 2500.0,
            height: 2500.0,
        }
    }
}

impl ArenaBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: Position) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "arena bounds must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl WorldBounds for ArenaBounds {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        // Zero, negative, NaN or infinite axes collapse to 0 instead of
        // panicking in the sampler.
        let x = if self.width.is_finite() && self.width > 0.0 {
            rng.random_range(0.0..self.width)
        } else {
            0.0
        };
        let y = if self.height.is_finite() && self.height > 0.0 {
            rng.random_range(0.0..self.height)
        } else {
            0.0
        };
        Position::new(x, y)
    }
}

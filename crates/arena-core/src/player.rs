use serde::{Deserialize, Serialize};

/// Unique identifier for a player in the arena.
pub type PlayerId = u64;

/// A point on the arena floor, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`. Proximity checks compare this
    /// against a squared radius so no square root is taken.
    pub fn distance_sq(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Capability a player entity exposes to world pickups.
///
/// `E` is the effect value handed over on collection. The player is
/// responsible for storing it and for honoring its expiry.
pub trait PowerupCollector<E> {
    /// Current position of the player.
    fn position(&self) -> Position;

    /// Record an effect picked up this tick.
    fn apply_effect(&mut self, effect: E);
}

impl<E, T: PowerupCollector<E> + ?Sized> PowerupCollector<E> for &mut T {
    fn position(&self) -> Position {
        (**self).position()
    }

    fn apply_effect(&mut self, effect: E) {
        (**self).apply_effect(effect);
    }
}

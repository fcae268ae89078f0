use rand::Rng;
use serde::{Deserialize, Serialize};

use arena_core::player::{Position, PowerupCollector};
use arena_core::powerup::EffectDescriptor;
use arena_core::time::now_millis;

use crate::config::{PICKUP_RADIUS, PowerupConfig};
use crate::kind::{Magnitude, PowerupKind};
use crate::world::WorldBounds;

/// Effect a player receives from an arena power-up.
pub type PowerupEffect = EffectDescriptor<PowerupKind>;

/// A power-up lying on the arena floor, waiting for a player to walk over it.
///
/// Alive until the first player comes within the pickup radius; after that
/// it stays collected and the simulation is expected to remove it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupEntity {
    position: Position,
    kind: PowerupKind,
    magnitude: Magnitude,
    duration_ms: u64,
    pickup_radius: f32,
    alive: bool,
}

impl PowerupEntity {
    pub fn new(
        position: Position,
        kind: PowerupKind,
        magnitude: Magnitude,
        duration_ms: u64,
    ) -> Self {
        Self {
            position,
            kind,
            magnitude,
            duration_ms,
            pickup_radius: PICKUP_RADIUS,
            alive: true,
        }
    }

    pub fn with_pickup_radius(mut self, radius: f32) -> Self {
        self.pickup_radius = radius;
        self
    }

    /// Roll a new power-up using the process-wide config and thread RNG.
    pub fn generate<B: WorldBounds>(bounds: &B) -> Self {
        Self::generate_with(PowerupConfig::global(), bounds, &mut rand::rng())
    }

    /// Roll a new power-up: uniform location, uniform kind, then a magnitude
    /// and duration drawn from `config`.
    pub fn generate_with<B, R>(config: &PowerupConfig, bounds: &B, rng: &mut R) -> Self
    where
        B: WorldBounds,
        R: Rng + ?Sized,
    {
        let position = bounds.random_point(rng);
        let kind = PowerupKind::random(rng);
        let magnitude = config.magnitude_range(kind).sample(rng);
        let (lo, hi) = if config.min_duration_ms <= config.max_duration_ms {
            (config.min_duration_ms, config.max_duration_ms)
        } else {
            (config.max_duration_ms, config.min_duration_ms)
        };
        let duration_ms = rng.random_range(lo..=hi);

        tracing::debug!(
            ?kind,
            ?magnitude,
            duration_ms,
            x = position.x,
            y = position.y,
            "Generated powerup"
        );

        Self::new(position, kind, magnitude, duration_ms).with_pickup_radius(config.pickup_radius)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> PowerupKind {
        self.kind
    }

    pub fn magnitude(&self) -> Magnitude {
        self.magnitude
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn pickup_radius(&self) -> f32 {
        self.pickup_radius
    }

    /// False once a player has collected this power-up.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Strictly inside the pickup radius. A player exactly on the edge does not collect.
    pub fn is_collectable_at(&self, position: Position) -> bool {
        self.position.distance_sq(position) < self.pickup_radius * self.pickup_radius
    }

    pub fn is_collectable_by<P>(&self, player: &P) -> bool
    where
        P: PowerupCollector<PowerupEffect> + ?Sized,
    {
        self.is_collectable_at(player.position())
    }

    /// Effect to hand a player collecting this power-up at `now_ms`.
    pub fn build_effect_descriptor(&self, now_ms: u64) -> PowerupEffect {
        EffectDescriptor {
            kind: self.kind,
            magnitude: self.magnitude,
            expires_at_ms: now_ms.saturating_add(self.duration_ms),
        }
    }

    /// Per-tick pickup check. The first player in roster order within reach
    /// receives the effect and the power-up is spent; nearer players later in
    /// the roster do not take priority.
    ///
    /// Returns the roster index of the collector. Once collected, further
    /// calls do nothing.
    pub fn update<P>(&mut self, players: &mut [P], now_ms: u64) -> Option<usize>
    where
        P: PowerupCollector<PowerupEffect>,
    {
        if !self.alive {
            tracing::trace!(kind = ?self.kind, "Skipping update on collected powerup");
            return None;
        }
        let index = players.iter().position(|p| self.is_collectable_by(p))?;
        players[index].apply_effect(self.build_effect_descriptor(now_ms));
        self.alive = false;

        tracing::debug!(
            kind = ?self.kind,
            magnitude = ?self.magnitude,
            collector = index,
            now_ms,
            "Powerup collected"
        );
        Some(index)
    }

    /// [`update`](Self::update) stamped with the wall clock.
    pub fn update_now<P>(&mut self, players: &mut [P]) -> Option<usize>
    where
        P: PowerupCollector<PowerupEffect>,
    {
        self.update(players, now_millis())
    }
}

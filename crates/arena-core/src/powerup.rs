use std::fmt::Debug;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Trait for game-specific power-up kind enums.
pub trait EffectKind: Debug + Clone + Copy + PartialEq + Serialize + DeserializeOwned {
    /// Strength payload carried by an effect of this kind.
    type Magnitude: Debug + Clone + Copy + PartialEq + Serialize + DeserializeOwned;
}

/// Effect handed to a player when they collect a pickup, generic over the kind enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EffectDescriptor<K: EffectKind> {
    pub kind: K,
    pub magnitude: K::Magnitude,
    /// Absolute expiry, milliseconds since the Unix epoch.
    pub expires_at_ms: u64,
}

impl<K: EffectKind> EffectDescriptor<K> {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms <= now_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }
}

/// Effects a single player currently holds.
///
/// Expiry is enforced here, on the player side; pickups never track time
/// after they have been collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActiveEffects<K: EffectKind> {
    effects: Vec<EffectDescriptor<K>>,
}

impl<K: EffectKind> Default for ActiveEffects<K> {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
        }
    }
}

impl<K: EffectKind> ActiveEffects<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: EffectDescriptor<K>) {
        self.effects.push(effect);
    }

    /// Drop every effect that has expired at `now_ms`. Returns how many were removed.
    pub fn prune_expired(&mut self, now_ms: u64) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.is_expired(now_ms));
        let removed = before - self.effects.len();
        if removed > 0 {
            tracing::trace!(removed, now_ms, "Pruned expired effects");
        }
        removed
    }

    pub fn contains_kind(&self, kind: K) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDescriptor<K>> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

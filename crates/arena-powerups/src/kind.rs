use rand::Rng;
use serde::{Deserialize, Serialize};

use arena_core::powerup::EffectKind;

/// Arena power-up types. Serialized names match what clients already expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    HealthPack,
    Shotgun,
    RapidFire,
    SpeedBoost,
}

impl PowerupKind {
    /// Every kind a spawn can roll, each equally likely.
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::HealthPack,
        PowerupKind::Shotgun,
        PowerupKind::RapidFire,
        PowerupKind::SpeedBoost,
    ];

    /// Whether this kind carries a whole-number payload (heal points, shells)
    /// rather than a multiplier.
    pub fn uses_count(self) -> bool {
        match self {
            PowerupKind::HealthPack | PowerupKind::Shotgun => true,
            PowerupKind::RapidFire | PowerupKind::SpeedBoost => false,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl EffectKind for PowerupKind {
    type Magnitude = Magnitude;
}

/// Strength of a power-up. Heal amount or bonus shells for counted kinds,
/// fire-rate or speed multiplier for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Magnitude {
    Count(u32),
    Factor(f32),
}

impl Magnitude {
    pub fn as_f32(self) -> f32 {
        match self {
            Magnitude::Count(n) => n as f32,
            Magnitude::Factor(f) => f,
        }
    }
}

/// Sampling rule for one kind's magnitude. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MagnitudeRange {
    Count { min: u32, max: u32 },
    Factor { min: f32, max: f32 },
}

impl MagnitudeRange {
    pub fn is_count(&self) -> bool {
        matches!(self, MagnitudeRange::Count { .. })
    }

    /// Draw a uniformly distributed magnitude from this range.
    ///
    /// Swapped bounds are tolerated. Factor bounds that are non-finite or
    /// whose span overflows `f32` are rejected by `PowerupConfig::validate`
    /// and must not reach here.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Magnitude {
        match *self {
            MagnitudeRange::Count { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                Magnitude::Count(rng.random_range(lo..=hi))
            },
            MagnitudeRange::Factor { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                Magnitude::Factor(rng.random_range(lo..=hi))
            },
        }
    }

    pub fn contains(&self, magnitude: Magnitude) -> bool {
        match (*self, magnitude) {
            (MagnitudeRange::Count { min, max }, Magnitude::Count(n)) => (min..=max).contains(&n),
            (MagnitudeRange::Factor { min, max }, Magnitude::Factor(f)) => {
                (min..=max).contains(&f)
            },
            _ => false,
        }
    }
}

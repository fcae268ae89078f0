use std::sync::OnceLock;

use rand::distr::Uniform;
use serde::{Deserialize, Serialize};

use crate::kind::{MagnitudeRange, PowerupKind};

/// Center-to-center distance within which a player collects a power-up.
pub const PICKUP_RADIUS: f32 = 30.0;
/// Shortest effect lifetime a spawn can roll, in milliseconds.
pub const MIN_DURATION_MS: u64 = 5_000;
/// Longest effect lifetime a spawn can roll, in milliseconds.
pub const MAX_DURATION_MS: u64 = 20_000;

pub const HEALTHPACK_MIN_HEAL: u32 = 1;
pub const HEALTHPACK_MAX_HEAL: u32 = 4;
pub const SHOTGUN_MIN_BONUS_SHELLS: u32 = 1;
pub const SHOTGUN_MAX_BONUS_SHELLS: u32 = 2;
pub const RAPIDFIRE_MIN_MULTIPLIER: f32 = 2.0;
pub const RAPIDFIRE_MAX_MULTIPLIER: f32 = 3.5;
pub const SPEEDBOOST_MIN_BOOST: f32 = 1.2;
pub const SPEEDBOOST_MAX_BOOST: f32 = 1.8;

const CONFIG_ENV: &str = "ARENA_POWERUP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/powerups.toml";

/// Failure to turn a config file into usable settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "parse error: {m}"),
            Self::Invalid(m) => write!(f, "invalid config: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Data-driven power-up tuning, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Pickup radius in world units.
    pub pickup_radius: f32,
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    /// Heal points.
    pub healthpack: MagnitudeRange,
    /// Bonus shells.
    pub shotgun: MagnitudeRange,
    /// Fire-rate multiplier.
    pub rapidfire: MagnitudeRange,
    /// Move-speed multiplier.
    pub speedboost: MagnitudeRange,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            pickup_radius: PICKUP_RADIUS,
            min_duration_ms: MIN_DURATION_MS,
            max_duration_ms: MAX_DURATION_MS,
            healthpack: MagnitudeRange::Count {
                min: HEALTHPACK_MIN_HEAL,
                max: HEALTHPACK_MAX_HEAL,
            },
            shotgun: MagnitudeRange::Count {
                min: SHOTGUN_MIN_BONUS_SHELLS,
                max: SHOTGUN_MAX_BONUS_SHELLS,
            },
            rapidfire: MagnitudeRange::Factor {
                min: RAPIDFIRE_MIN_MULTIPLIER,
                max: RAPIDFIRE_MAX_MULTIPLIER,
            },
            speedboost: MagnitudeRange::Factor {
                min: SPEEDBOOST_MIN_BOOST,
                max: SPEEDBOOST_MAX_BOOST,
            },
        }
    }
}

impl PowerupConfig {
    /// Process-wide config, loaded on first use.
    pub fn global() -> &'static PowerupConfig {
        static GLOBAL: OnceLock<PowerupConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::load)
    }

    /// Load config from the file named by `ARENA_POWERUP_CONFIG`, or
    /// `config/powerups.toml`, falling back to defaults.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load config from a TOML file. A missing file yields defaults; an
    /// unparseable or invalid one is logged and also yields defaults.
    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Magnitude sampling rule for `kind`.
    pub fn magnitude_range(&self, kind: PowerupKind) -> &MagnitudeRange {
        match kind {
            PowerupKind::HealthPack => &self.healthpack,
            PowerupKind::Shotgun => &self.shotgun,
            PowerupKind::RapidFire => &self.rapidfire,
            PowerupKind::SpeedBoost => &self.speedboost,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pickup_radius.is_finite() || self.pickup_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pickup_radius must be positive, got {}",
                self.pickup_radius
            )));
        }
        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::Invalid(format!(
                "min_duration_ms {} exceeds max_duration_ms {}",
                self.min_duration_ms, self.max_duration_ms
            )));
        }
        for kind in PowerupKind::ALL {
            let range = self.magnitude_range(kind);
            if range.is_count() != kind.uses_count() {
                return Err(ConfigError::Invalid(format!(
                    "{kind:?} magnitude must be a {} range",
                    if kind.uses_count() { "count" } else { "factor" }
                )));
            }
            match *range {
                MagnitudeRange::Count { min, max } if min > max => {
                    return Err(ConfigError::Invalid(format!(
                        "{kind:?} magnitude min exceeds max"
                    )));
                },
                MagnitudeRange::Count { .. } => {},
                MagnitudeRange::Factor { min, max } => {
                    // Same checks the sampler applies: finite, ordered, finite span.
                    Uniform::<f32>::new_inclusive(min, max).map_err(|e| {
                        ConfigError::Invalid(format!("{kind:?} magnitude {min}..={max}: {e}"))
                    })?;
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::entity::PowerupEntity;
    use crate::world::ArenaBounds;

    #[test]
    fn defaults_are_valid() {
        let cfg = PowerupConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.pickup_radius, PICKUP_RADIUS);
        assert_eq!(cfg.min_duration_ms, 5_000);
        assert_eq!(cfg.max_duration_ms, 20_000);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = PowerupConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PowerupConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let toml = r#"
            pickup_radius = 45.0
            max_duration_ms = 30000

            [healthpack]
            type = "count"
            min = 2
            max = 6
        "#;
        let cfg = PowerupConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.pickup_radius, 45.0);
        assert_eq!(cfg.max_duration_ms, 30_000);
        assert_eq!(cfg.min_duration_ms, MIN_DURATION_MS);
        assert_eq!(cfg.healthpack, MagnitudeRange::Count { min: 2, max: 6 });
        assert_eq!(cfg.shotgun, PowerupConfig::default().shotgun);
    }

    #[test]
    fn rejects_inverted_duration() {
        let err = PowerupConfig::from_toml_str(
            "min_duration_ms = 9000\nmax_duration_ms = 1000",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn rejects_non_positive_radius() {
        let cfg = PowerupConfig {
            pickup_radius: 0.0,
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = PowerupConfig {
            pickup_radius: f32::NAN,
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_wrong_range_shape() {
        let cfg = PowerupConfig {
            rapidfire: MagnitudeRange::Count { min: 2, max: 3 },
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_magnitude() {
        let cfg = PowerupConfig {
            speedboost: MagnitudeRange::Factor { min: 1.8, max: 1.2 },
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_overflowing_factor_range() {
        let cfg = PowerupConfig {
            rapidfire: MagnitudeRange::Factor {
                min: -f32::MAX,
                max: f32::MAX,
            },
            ..PowerupConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn wide_but_representable_range_generates() {
        let cfg = PowerupConfig {
            rapidfire: MagnitudeRange::Factor {
                min: -1.0e37,
                max: 1.0e37,
            },
            speedboost: MagnitudeRange::Factor {
                min: 0.0,
                max: 1.0e38,
            },
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_ok());
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let pu = PowerupEntity::generate_with(&cfg, &ArenaBounds::default(), &mut rng);
            assert!(cfg.magnitude_range(pu.kind()).contains(pu.magnitude()));
        }
    }

    #[test]
    fn rejects_non_finite_factor() {
        let cfg = PowerupConfig {
            speedboost: MagnitudeRange::Factor {
                min: 1.2,
                max: f32::INFINITY,
            },
            ..PowerupConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = PowerupConfig::from_toml_str("pickup_radius = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
        assert!(err.to_string().starts_with("parse error"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let cfg = PowerupConfig::load_from("/nonexistent/powerups.toml");
        assert_eq!(cfg, PowerupConfig::default());
    }

    #[test]
    fn invalid_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "arena-powerups-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "min_duration_ms = 50000\nmax_duration_ms = 1").unwrap();
        let cfg = PowerupConfig::load_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg, PowerupConfig::default());
    }

    #[test]
    fn shipped_config_file_parses() {
        let content = include_str!("../../../config/powerups.toml");
        let cfg = PowerupConfig::from_toml_str(content).unwrap();
        assert_eq!(cfg, PowerupConfig::default());
    }
}

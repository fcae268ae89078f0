//! Pickup items for the arena: random generation, proximity collection, and
//! the timed effect a collecting player receives.

pub mod config;
pub mod entity;
pub mod kind;
pub mod world;

pub use config::{ConfigError, PowerupConfig};
pub use entity::{PowerupEffect, PowerupEntity};
pub use kind::{Magnitude, MagnitudeRange, PowerupKind};
pub use world::{ArenaBounds, WorldBounds};

//! Simulation configuration
//!
//! Fixed at startup: either the built-in defaults or a JSON file. Missing
//! fields fall back to the defaults, and the result is validated once before
//! the world is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Physics ===
    /// Added to vy every step
    pub gravity: f32,
    /// Restitution for walls and contacts (0 = dead, 1 = elastic)
    pub bounce: f32,
    /// Pair resolver sweeps per step
    pub relaxation_passes: u32,

    // === Spawning ===
    pub min_radius: f32,
    pub max_radius: f32,
    /// Number of orb sprite variants; each orb picks one at spawn
    pub orb_sprites: u32,
    pub max_bodies: usize,
    /// Fraction of the arena area that counts as full
    pub coverage_threshold: f32,
    /// Inclusive range the cube's spawn index is drawn from
    pub special_drop_min: u32,
    pub special_drop_max: u32,
    /// Inclusive range of delays between spawns
    pub spawn_delay_min_ms: u32,
    pub spawn_delay_max_ms: u32,

    // === Pointer ===
    /// Ticks of pointer history used for the release velocity
    pub fling_window_ticks: usize,
    pub fling_scale: f32,

    // === Loop ===
    pub frame_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            gravity: GRAVITY,
            bounce: BOUNCE,
            relaxation_passes: RELAXATION_PASSES,

            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            orb_sprites: ORB_SPRITES,
            max_bodies: MAX_BODIES,
            coverage_threshold: COVERAGE_THRESHOLD,
            special_drop_min: SPECIAL_DROP_MIN,
            special_drop_max: SPECIAL_DROP_MAX,
            spawn_delay_min_ms: SPAWN_DELAY_MIN_MS,
            spawn_delay_max_ms: SPAWN_DELAY_MAX_MS,

            fling_window_ticks: FLING_WINDOW_TICKS,
            fling_scale: FLING_SCALE,

            frame_rate: FRAME_RATE,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.min_radius > 0.0) {
            return invalid(format!("min_radius must be positive, got {}", self.min_radius));
        }
        if self.min_radius > self.max_radius {
            return invalid(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            ));
        }
        if !(self.arena_height > 0.0) || self.arena_width < 2.0 * self.max_radius {
            return invalid(format!(
                "arena {}x{} cannot hold a body of radius {}",
                self.arena_width, self.arena_height, self.max_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.bounce) {
            return invalid(format!("bounce must be in [0, 1], got {}", self.bounce));
        }
        if !(self.coverage_threshold > 0.0 && self.coverage_threshold <= 1.0) {
            return invalid(format!(
                "coverage_threshold must be in (0, 1], got {}",
                self.coverage_threshold
            ));
        }
        if self.orb_sprites == 0 {
            return invalid("orb_sprites must be at least 1".into());
        }
        if self.max_bodies == 0 {
            return invalid("max_bodies must be at least 1".into());
        }
        if self.special_drop_min == 0 || self.special_drop_min > self.special_drop_max {
            return invalid(format!(
                "special drop range [{}, {}] is empty or starts at zero",
                self.special_drop_min, self.special_drop_max
            ));
        }
        if self.spawn_delay_min_ms > self.spawn_delay_max_ms {
            return invalid(format!(
                "spawn delay range [{}, {}] is empty",
                self.spawn_delay_min_ms, self.spawn_delay_max_ms
            ));
        }
        if self.relaxation_passes == 0 {
            return invalid("relaxation_passes must be at least 1".into());
        }
        if self.fling_window_ticks == 0 {
            return invalid("fling_window_ticks must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.fling_scale) {
            return invalid(format!("fling_scale must be in [0, 1], got {}", self.fling_scale));
        }
        if self.frame_rate == 0 {
            return invalid("frame_rate must be at least 1".into());
        }
        Ok(())
    }

    /// Arena area in square world units
    #[inline]
    pub fn arena_area(&self) -> f32 {
        self.arena_width * self.arena_height
    }

    /// Mass given to the cube: that of the smallest possible orb
    #[inline]
    pub fn special_mass(&self) -> f32 {
        self.min_radius * self.min_radius
    }

    /// Side length of the cube
    #[inline]
    pub fn special_size(&self) -> f32 {
        self.min_radius * 2.0
    }

    /// Frame budget in milliseconds
    #[inline]
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.frame_rate as f32
    }
}

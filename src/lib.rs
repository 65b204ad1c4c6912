//! Orb Pool - a 2D physics sandbox
//!
//! Orbs and a single cube drop into a rectangular arena, collide, settle and
//! can be grabbed and flung with the pointer.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, spawning, pointer)
//! - `renderer`: Draw commands handed to the presentation layer
//! - `platform`: Input source and fixed-rate frame clock
//! - `settings`: Startup configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, SimConfig};

use glam::Vec2;

/// Simulation configuration constants (defaults for [`SimConfig`])
pub mod consts {
    /// Fixed simulation rate (steps per second)
    pub const FRAME_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Downward acceleration (distance per frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Restitution for walls, floor and body contacts
    pub const BOUNCE: f32 = 0.35;

    /// Orb radius range
    pub const MIN_RADIUS: f32 = 35.0;
    pub const MAX_RADIUS: f32 = 70.0;
    /// Orb sprite variants a textured presenter can pick from
    pub const ORB_SPRITES: u32 = 8;

    /// Fill limits
    pub const MAX_BODIES: usize = 50;
    pub const COVERAGE_THRESHOLD: f32 = 0.85;

    /// Spawn index range for the cube (inclusive)
    pub const SPECIAL_DROP_MIN: u32 = 35;
    pub const SPECIAL_DROP_MAX: u32 = 45;

    /// Delay between spawns (milliseconds, inclusive)
    pub const SPAWN_DELAY_MIN_MS: u32 = 0;
    pub const SPAWN_DELAY_MAX_MS: u32 = 2000;

    /// Pair resolver sweeps per step
    pub const RELAXATION_PASSES: u32 = 3;

    /// Release velocity = displacement over the window / window * scale
    pub const FLING_WINDOW_TICKS: usize = 3;
    pub const FLING_SCALE: f32 = 1.0;

    /// Spin tuning (cosmetic only)
    pub const SPIN_FACTOR: f32 = 0.5;
    pub const SPIN_MIN_VX: f32 = 0.5;
    pub const SPIN_DECAY: f32 = 0.9;
    pub const MAX_ANGULAR_VELOCITY: f32 = 0.15;
    pub const ANGULAR_REST: f32 = 0.01;

    /// Floor rest thresholds
    pub const FLOOR_REST_SPEED: f32 = 0.4;
    pub const FLOOR_FRICTION: f32 = 0.98;

    /// Contact velocity components below this snap to zero
    pub const VELOCITY_REST: f32 = 0.01;
    /// Fraction of penetration corrected per relaxation pass
    pub const OVERLAP_CORRECTION: f32 = 0.5;
    /// Separation used when two bodies share a center
    pub const DEGENERATE_DISTANCE: f32 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Inclusive point-in-circle test, no square root
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    (point - center).length_squared() <= radius * radius
}

/// Unit vector along `v`, or `None` for a zero-length input
#[inline]
pub fn unit_or_none(v: Vec2) -> Option<(Vec2, f32)> {
    let len = v.length();
    if len > 0.0 { Some((v / len, len)) } else { None }
}

//! Simulation state: bodies and the world that owns them
//!
//! Everything a step reads or writes lives here. Randomness comes only from
//! the world's seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::interaction::PointerTracker;
use super::spawn::SpawnState;
use crate::consts::*;
use crate::settings::{ConfigError, SimConfig};

/// Collision treats every shape as a circle of `effective_radius()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// The cube, drawn as a square
    Square { half_size: f32 },
}

impl Shape {
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Square { half_size } => half_size,
        }
    }
}

/// Decorative RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    /// The cube's gold
    pub const SPECIAL: Tint = Tint { r: 255, g: 200, b: 50 };

    /// Random pastel-ish colour, each channel in [80, 255]
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random_range(80..=255),
            g: rng.random_range(80..=255),
            b: rng.random_range(80..=255),
        }
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// A physical body (orb or cube)
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    /// Distance per frame
    pub vel: Vec2,
    pub shape: Shape,
    pub mass: f32,
    /// Cosmetic rotation (radians)
    pub angle: f32,
    pub angular_vel: f32,
    /// Pinned to the pointer; skips integration and contact response
    pub held: bool,
    pub tint: Tint,
    /// Orb sprite variant, fixed for the body's lifetime (0 for the cube)
    pub sprite: u32,
}

impl Body {
    /// An orb at rest; mass is radius²
    pub fn orb(id: u32, pos: Vec2, radius: f32, tint: Tint) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
            mass: radius * radius,
            angle: 0.0,
            angular_vel: 0.0,
            held: false,
            tint,
            sprite: 0,
        }
    }

    /// Same orb drawn with sprite variant `sprite`
    pub fn with_sprite(mut self, sprite: u32) -> Self {
        self.sprite = sprite;
        self
    }

    /// The cube at rest. Its mass does not follow its size.
    pub fn special(id: u32, pos: Vec2, size: f32, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Square {
                half_size: size / 2.0,
            },
            mass,
            angle: 0.0,
            angular_vel: 0.0,
            held: false,
            tint: Tint::SPECIAL,
            sprite: 0,
        }
    }

    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.shape.effective_radius()
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        matches!(self.shape, Shape::Square { .. })
    }

    /// Area of the bounding circle, used by the fill heuristic
    #[inline]
    pub fn coverage_area(&self) -> f32 {
        let r = self.effective_radius();
        std::f32::consts::PI * r * r
    }

    /// One explicit Euler step plus spin and arena boundaries
    pub fn advance(&mut self, config: &SimConfig) {
        if self.held {
            return;
        }

        self.vel.y += config.gravity;
        self.pos += self.vel;

        self.update_spin();
        self.confine(config);
    }

    /// Cosmetic spin derived from horizontal speed
    fn update_spin(&mut self) {
        if self.vel.x.abs() > SPIN_MIN_VX {
            self.angular_vel = -self.vel.x / self.effective_radius() * SPIN_FACTOR;
        } else {
            self.angular_vel *= SPIN_DECAY;
        }

        self.angular_vel = self
            .angular_vel
            .clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
        if self.angular_vel.abs() < ANGULAR_REST {
            self.angular_vel = 0.0;
        }

        self.angle += self.angular_vel;
    }

    /// Walls and floor; there is no ceiling
    fn confine(&mut self, config: &SimConfig) {
        let r = self.effective_radius();
        let bounce = config.bounce;

        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x *= -bounce;
        }
        if self.pos.x + r > config.arena_width {
            self.pos.x = config.arena_width - r;
            self.vel.x *= -bounce;
        }

        if self.pos.y + r > config.arena_height {
            self.pos.y = config.arena_height - r;
            self.vel.y *= -bounce;
            if self.vel.y.abs() < FLOOR_REST_SPEED {
                self.vel.y = 0.0;
            }
            self.vel.x *= FLOOR_FRICTION;
        }
    }
}

/// The arena and everything in it
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimConfig,
    /// Spawn order; never reordered
    pub bodies: Vec<Body>,
    pub spawn: SpawnState,
    /// Index into `bodies` of the body pinned to the pointer
    pub held: Option<usize>,
    pub pointer: PointerTracker,
    /// Steps since creation or the last reset
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an empty world with the given seed.
    ///
    /// The config is validated here; spawn ranges must be non-empty.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = SpawnState::new(&config, &mut rng);
        let pointer = PointerTracker::new(config.fling_window_ticks);
        log::info!(
            "World {}x{} created (seed {}, cube at spawn {})",
            config.arena_width,
            config.arena_height,
            seed,
            spawn.special_drop_index
        );

        Ok(Self {
            config,
            bodies: Vec::new(),
            spawn,
            held: None,
            pointer,
            time_ticks: 0,
            seed,
            rng,
            next_id: 1,
        })
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Index of the cube, if it has dropped
    pub fn special_index(&self) -> Option<usize> {
        self.bodies.iter().position(Body::is_special)
    }

    /// Fraction of the arena covered by bounding circles
    pub fn coverage(&self) -> f32 {
        let area: f32 = self.bodies.iter().map(Body::coverage_area).sum();
        area / self.config.arena_area()
    }

    /// Heuristic "visually full": coverage above threshold or body cap hit
    pub fn is_arena_full(&self) -> bool {
        self.coverage() > self.config.coverage_threshold
            || self.bodies.len() >= self.config.max_bodies
    }

    /// Throw everything away and start a new epoch.
    /// RNG state carries on so each epoch draws fresh values.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.held = None;
        self.pointer.clear();
        self.spawn = SpawnState::new(&self.config, &mut self.rng);
        self.time_ticks = 0;
        self.next_id = 1;
        log::info!(
            "World reset (cube at spawn {}, first delay {} ms)",
            self.spawn.special_drop_index,
            self.spawn.next_delay_ms
        );
    }
}

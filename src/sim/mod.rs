//! Deterministic simulation module
//!
//! All physics and world bookkeeping lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only (units are per frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod interaction;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, detect, relax, resolve_pair};
pub use interaction::{PointerTracker, drag, grab, hit_test, release};
pub use spawn::{SpawnKind, SpawnState, maybe_spawn, spawn_next};
pub use state::{Body, Shape, Tint, World};
pub use tick::{TickInput, TickReport, tick};

//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame in a fixed order: pointer input,
//! spawning, integration, contact relaxation. Presentation happens after,
//! from the finished state.

use glam::Vec2;

use super::collision::relax;
use super::interaction::{drag, grab, release};
use super::spawn::{SpawnKind, maybe_spawn};
use super::state::World;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window closed / quit key; the driver stops its loop
    pub quit: bool,
    /// Start a new epoch before this tick runs
    pub reset: bool,
    /// Live pointer position in world coordinates
    pub pointer: Vec2,
    /// Pointer button went down since the last tick
    pub pointer_pressed: bool,
    /// Pointer button went up since the last tick
    pub pointer_released: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<SpawnKind>,
    /// Contacts resolved across all relaxation passes
    pub contacts: usize,
    /// Release velocity if a body was thrown this tick
    pub flung: Option<Vec2>,
}

/// Advance the world by one fixed step. `frame_ms` feeds the spawn timer.
pub fn tick(world: &mut World, input: &TickInput, frame_ms: f32) -> TickReport {
    let mut report = TickReport::default();

    if input.reset {
        world.reset();
    }

    world.time_ticks += 1;

    // Pointer
    if input.pointer_pressed {
        grab(world, input.pointer);
    }
    if input.pointer_released {
        report.flung = release(world, input.pointer);
    } else {
        drag(world, input.pointer);
    }

    // Spawn
    report.spawned = maybe_spawn(world, frame_ms);

    // Integrate
    for body in world.bodies.iter_mut().filter(|b| !b.held) {
        body.advance(&world.config);
    }

    // Relax contacts
    report.contacts = relax(
        &mut world.bodies,
        world.config.relaxation_passes,
        world.config.bounce,
        &mut world.rng,
    );

    log::trace!(
        "tick {}: {} bodies, {} contacts",
        world.time_ticks,
        world.bodies.len(),
        report.contacts
    );

    report
}

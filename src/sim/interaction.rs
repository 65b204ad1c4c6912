//! Pointer interaction: grab, drag, release and fling
//!
//! A held body is kinematic. It sits exactly under the pointer every tick and
//! takes part in no integration or contact response until it is let go.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::World;
use crate::point_in_circle;

/// Recent pointer positions while a body is held (newest last)
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    samples: VecDeque<Vec2>,
    /// Window length in ticks; holds window + 1 samples
    window: usize,
}

impl PointerTracker {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    /// Record this tick's pointer position
    pub fn record(&mut self, pos: Vec2) {
        self.samples.push_back(pos);
        while self.samples.len() > self.window + 1 {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average per-tick displacement over the sampled window
    pub fn velocity(&self) -> Vec2 {
        match (self.samples.front(), self.samples.back()) {
            (Some(&first), Some(&last)) if self.samples.len() > 1 => {
                (last - first) / (self.samples.len() - 1) as f32
            }
            _ => Vec2::ZERO,
        }
    }
}

/// Index of the body under `pos`: the cube first, then orbs newest-first
pub fn hit_test(world: &World, pos: Vec2) -> Option<usize> {
    let hits = |i: usize| {
        let body = &world.bodies[i];
        point_in_circle(pos, body.pos, body.effective_radius())
    };

    if let Some(i) = world.special_index().filter(|&i| hits(i)) {
        return Some(i);
    }

    (0..world.bodies.len())
        .rev()
        .filter(|&i| !world.bodies[i].is_special())
        .find(|&i| hits(i))
}

/// Pointer pressed: pick up the body under it, if any
pub fn grab(world: &mut World, pos: Vec2) -> Option<usize> {
    if world.held.is_some() {
        return world.held;
    }

    let index = hit_test(world, pos)?;
    let body = &mut world.bodies[index];
    body.held = true;
    body.vel = Vec2::ZERO;
    world.held = Some(index);

    world.pointer.clear();
    log::debug!("Grabbed body {} at ({:.0}, {:.0})", body.id, pos.x, pos.y);
    Some(index)
}

/// Pin the held body to the pointer and sample the pointer
pub fn drag(world: &mut World, pos: Vec2) {
    let Some(index) = world.held else {
        return;
    };
    world.bodies[index].pos = pos;
    world.pointer.record(pos);
}

/// Pointer released: throw the held body with the recent pointer velocity
pub fn release(world: &mut World, pos: Vec2) -> Option<Vec2> {
    let index = world.held.take()?;
    world.pointer.record(pos);
    let fling = world.pointer.velocity() * world.config.fling_scale;
    world.pointer.clear();

    let body = &mut world.bodies[index];
    body.pos = pos;
    body.vel = fling;
    body.held = false;
    log::debug!(
        "Released body {} with velocity ({:.1}, {:.1})",
        body.id,
        fling.x,
        fling.y
    );
    Some(fling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::state::{Body, Tint};

    fn world() -> World {
        let mut world = World::new(SimConfig::default(), 9).unwrap();
        world
            .bodies
            .push(Body::orb(1, Vec2::new(100.0, 100.0), 40.0, Tint::SPECIAL));
        world
            .bodies
            .push(Body::orb(2, Vec2::new(130.0, 100.0), 40.0, Tint::SPECIAL));
        world
    }

    #[test]
    fn test_hit_test_prefers_newest_orb() {
        let world = world();
        // Inside both orbs
        assert_eq!(hit_test(&world, Vec2::new(115.0, 100.0)), Some(1));
        // Only inside the first
        assert_eq!(hit_test(&world, Vec2::new(65.0, 100.0)), Some(0));
        assert_eq!(hit_test(&world, Vec2::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_hit_test_prefers_cube() {
        let mut world = world();
        world
            .bodies
            .insert(0, Body::special(3, Vec2::new(115.0, 100.0), 70.0, 1225.0));
        // Cube is oldest but still wins
        assert_eq!(hit_test(&world, Vec2::new(115.0, 100.0)), Some(0));
        // Outside the cube's circle, inside orb 2 (now index 2)
        assert_eq!(hit_test(&world, Vec2::new(165.0, 100.0)), Some(2));
    }

    #[test]
    fn test_grab_zeroes_velocity_and_pins() {
        let mut world = world();
        world.bodies[0].vel = Vec2::new(3.0, -2.0);

        assert_eq!(grab(&mut world, Vec2::new(70.0, 100.0)), Some(0));
        assert!(world.bodies[0].held);
        assert_eq!(world.bodies[0].vel, Vec2::ZERO);
        assert_eq!(world.held, Some(0));

        drag(&mut world, Vec2::new(300.0, 50.0));
        assert_eq!(world.bodies[0].pos, Vec2::new(300.0, 50.0));
    }

    #[test]
    fn test_only_one_body_held() {
        let mut world = world();
        assert_eq!(grab(&mut world, Vec2::new(150.0, 100.0)), Some(1));
        assert_eq!(grab(&mut world, Vec2::new(70.0, 100.0)), Some(1));
        assert_eq!(world.bodies.iter().filter(|b| b.held).count(), 1);
    }

    #[test]
    fn test_grab_miss_holds_nothing() {
        let mut world = world();
        assert_eq!(grab(&mut world, Vec2::new(500.0, 500.0)), None);
        assert!(world.held.is_none());
        assert!(world.bodies.iter().all(|b| !b.held));
        drag(&mut world, Vec2::new(10.0, 10.0));
        assert_eq!(release(&mut world, Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_release_flings_with_windowed_velocity() {
        let mut world = world();
        // Only the first orb covers this point
        assert_eq!(grab(&mut world, Vec2::new(65.0, 100.0)), Some(0));
        for i in 1..=5 {
            drag(&mut world, Vec2::new(65.0 + 10.0 * i as f32, 100.0 - 4.0 * i as f32));
        }
        let fling = release(&mut world, Vec2::new(125.0, 76.0)).unwrap();

        assert!((fling - Vec2::new(10.0, -4.0)).length() < 1e-4);
        let body = &world.bodies[0];
        assert!(!body.held);
        assert_eq!(body.pos, Vec2::new(125.0, 76.0));
        assert_eq!(body.vel, fling);
        assert_eq!(world.bodies[1].vel, Vec2::ZERO);
        assert!(world.held.is_none());
        assert!(world.pointer.is_empty());
    }

    #[test]
    fn test_release_without_motion_drops() {
        let mut world = world();
        // Inside both orbs: the newer one is thrown
        assert_eq!(grab(&mut world, Vec2::new(100.0, 100.0)), Some(1));
        let fling = release(&mut world, Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(fling, Vec2::ZERO);
        assert!(!world.bodies[1].held);
        assert_eq!(world.bodies[1].pos, Vec2::new(100.0, 100.0));
        assert_eq!(world.bodies[1].vel, Vec2::ZERO);
        assert_eq!(world.bodies[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_tracker_window() {
        let mut tracker = PointerTracker::new(2);
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.record(Vec2::new(0.0, 0.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.record(Vec2::new(100.0, 0.0));
        tracker.record(Vec2::new(104.0, 0.0));
        tracker.record(Vec2::new(108.0, 0.0));
        // Oldest sample dropped: (108 - 100) / 2
        assert_eq!(tracker.velocity(), Vec2::new(4.0, 0.0));
    }
}

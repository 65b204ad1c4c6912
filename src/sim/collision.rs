//! Body-body collision detection and response
//!
//! Every body is a circle of its effective radius here. Contacts are solved
//! one pair at a time (sequential impulses): half the penetration is pushed
//! out per pass, mass-weighted, then an inelastic impulse is applied along
//! the contact normal. Several passes per step relax dense piles.

use glam::Vec2;
use rand::Rng;

use super::state::Body;
use crate::consts::*;
use crate::{polar_to_cartesian, unit_or_none};

/// Result of a contact check
#[derive(Debug, Clone)]
pub struct Contact {
    /// Unit normal from `a` toward `b`
    pub normal: Vec2,
    /// Sum of radii minus distance
    pub penetration: f32,
}

/// Check whether two bodies overlap.
///
/// Coincident centers get a random normal and a small stand-in distance so
/// the response stays finite.
pub fn detect(a: &Body, b: &Body, rng: &mut impl Rng) -> Option<Contact> {
    let min_dist = a.effective_radius() + b.effective_radius();
    let (normal, distance) = match unit_or_none(b.pos - a.pos) {
        Some(found) => found,
        None => {
            let theta = rng.random::<f32>() * std::f32::consts::TAU;
            (polar_to_cartesian(1.0, theta), DEGENERATE_DISTANCE)
        }
    };

    if distance >= min_dist {
        return None;
    }

    Some(Contact {
        normal,
        penetration: min_dist - distance,
    })
}

/// Resolve one pair. Returns true if they were in contact.
///
/// Pairs with a held body are skipped outright: neither body changes.
pub fn resolve_pair(a: &mut Body, b: &mut Body, bounce: f32, rng: &mut impl Rng) -> bool {
    if a.held || b.held {
        return false;
    }

    let Some(contact) = detect(a, b, rng) else {
        return false;
    };
    let n = contact.normal;

    // Partial correction; the remaining passes close the gap
    let overlap = contact.penetration * OVERLAP_CORRECTION;
    let total_mass = a.mass + b.mass;
    a.pos -= n * overlap * (b.mass / total_mass);
    b.pos += n * overlap * (a.mass / total_mass);

    let vel_norm = (b.vel - a.vel).dot(n);
    if vel_norm > 0.0 {
        // Already separating
        return true;
    }

    let j = -(1.0 + bounce) * vel_norm / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = n * j;
    a.vel -= impulse / a.mass;
    b.vel += impulse / b.mass;

    snap_rest(&mut a.vel);
    snap_rest(&mut b.vel);
    true
}

/// Zero out jitter-sized velocity components
#[inline]
fn snap_rest(vel: &mut Vec2) {
    if vel.x.abs() < VELOCITY_REST {
        vel.x = 0.0;
    }
    if vel.y.abs() < VELOCITY_REST {
        vel.y = 0.0;
    }
}

/// Sweep every pair `passes` times in index order.
/// Returns the number of contacts seen across all passes.
pub fn relax(bodies: &mut [Body], passes: u32, bounce: f32, rng: &mut impl Rng) -> usize {
    let mut contacts = 0;
    for _ in 0..passes {
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if resolve_pair(a, b, bounce, rng) {
                    contacts += 1;
                }
            }
        }
    }
    contacts
}

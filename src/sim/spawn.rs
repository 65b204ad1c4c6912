//! Spawn policy
//!
//! Bodies drop in one at a time after a random delay. One spawn per epoch,
//! picked at random from the configured index range, is the cube instead of
//! an orb.

use glam::Vec2;
use rand::Rng;

use super::state::{Body, Tint, World};
use crate::settings::SimConfig;

/// Spawn bookkeeping for the current epoch
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnState {
    /// Spawn events so far, cube included
    pub spawn_count: u32,
    /// The spawn event (1-based) that drops the cube
    pub special_drop_index: u32,
    pub special_spawned: bool,
    /// Time accumulated since the last spawn
    pub elapsed_ms: f32,
    pub next_delay_ms: u32,
}

impl SpawnState {
    /// Fresh epoch with newly drawn drop index and delay
    pub fn new(config: &SimConfig, rng: &mut impl Rng) -> Self {
        Self {
            spawn_count: 0,
            special_drop_index: rng.random_range(config.special_drop_min..=config.special_drop_max),
            special_spawned: false,
            elapsed_ms: 0.0,
            next_delay_ms: draw_delay(config, rng),
        }
    }

    /// Accumulate frame time; true once the current delay has passed
    pub fn timer_elapsed(&mut self, frame_ms: f32) -> bool {
        self.elapsed_ms += frame_ms;
        self.elapsed_ms >= self.next_delay_ms as f32
    }

    /// Whether the next spawn event should be the cube
    #[inline]
    fn special_due(&self) -> bool {
        !self.special_spawned && self.spawn_count == self.special_drop_index
    }
}

/// What a spawn event produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Orb,
    Special,
}

fn draw_delay(config: &SimConfig, rng: &mut impl Rng) -> u32 {
    rng.random_range(config.spawn_delay_min_ms..=config.spawn_delay_max_ms)
}

/// Uniform draw that tolerates a degenerate range
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if lo >= hi { lo } else { rng.random_range(lo..=hi) }
}

/// Run one spawn event unconditionally and restart the timer.
///
/// Fill state and the timer are the caller's concern; see [`maybe_spawn`].
pub fn spawn_next(world: &mut World) -> SpawnKind {
    world.spawn.spawn_count += 1;

    let kind = if world.spawn.special_due() {
        let size = world.config.special_size();
        let half = size / 2.0;
        let x = uniform(&mut world.rng, half, world.config.arena_width - half);
        let id = world.next_body_id();
        let mass = world.config.special_mass();
        world
            .bodies
            .push(Body::special(id, Vec2::new(x, -half), size, mass));
        world.spawn.special_spawned = true;
        log::info!("Cube dropped at spawn {}", world.spawn.spawn_count);
        SpawnKind::Special
    } else {
        let (min_r, max_r) = (world.config.min_radius, world.config.max_radius);
        let r = uniform(&mut world.rng, min_r, max_r);
        let x = uniform(&mut world.rng, r, world.config.arena_width - r);
        let tint = Tint::random(&mut world.rng);
        let sprite = world.rng.random_range(0..world.config.orb_sprites);
        let id = world.next_body_id();
        world
            .bodies
            .push(Body::orb(id, Vec2::new(x, -r), r, tint).with_sprite(sprite));
        log::debug!(
            "Orb {} (r={:.1}) spawned at x={:.1} [{} bodies]",
            id,
            r,
            x,
            world.bodies.len()
        );
        SpawnKind::Orb
    };

    world.spawn.elapsed_ms = 0.0;
    world.spawn.next_delay_ms = draw_delay(&world.config, &mut world.rng);
    kind
}

/// Spawn if the arena has room and the delay has passed
pub fn maybe_spawn(world: &mut World, frame_ms: f32) -> Option<SpawnKind> {
    if world.is_arena_full() {
        return None;
    }
    if !world.spawn.timer_elapsed(frame_ms) {
        return None;
    }
    Some(spawn_next(world))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_drop_index(index: u32) -> World {
        let mut world = World::new(SimConfig::default(), 42).unwrap();
        world.spawn.special_drop_index = index;
        world
    }

    fn special_count(world: &World) -> usize {
        world.bodies.iter().filter(|b| b.is_special()).count()
    }

    #[test]
    fn test_new_state_within_ranges() {
        let config = SimConfig::default();
        let mut rng = rand_pcg::Pcg32::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7);
        for _ in 0..200 {
            let state = SpawnState::new(&config, &mut rng);
            assert!((35..=45).contains(&state.special_drop_index));
            assert!(state.next_delay_ms <= 2000);
            assert_eq!(state.spawn_count, 0);
            assert!(!state.special_spawned);
        }
    }

    #[test]
    fn test_cube_drops_exactly_once_at_index() {
        let mut world = world_with_drop_index(40);

        for _ in 0..39 {
            assert_eq!(spawn_next(&mut world), SpawnKind::Orb);
        }
        assert_eq!(special_count(&world), 0);

        assert_eq!(spawn_next(&mut world), SpawnKind::Special);
        assert_eq!(special_count(&world), 1);
        assert!(world.spawn.special_spawned);

        for _ in 0..20 {
            assert_eq!(spawn_next(&mut world), SpawnKind::Orb);
        }
        assert_eq!(special_count(&world), 1);
        assert_eq!(world.spawn.spawn_count, 60);
    }

    #[test]
    fn test_cube_placement_and_mass() {
        let mut world = world_with_drop_index(1);
        spawn_next(&mut world);
        let cube = &world.bodies[0];
        assert!(cube.is_special());
        assert_eq!(cube.effective_radius(), 35.0);
        assert_eq!(cube.mass, 35.0 * 35.0);
        assert_eq!(cube.pos.y, -35.0);
        assert!(cube.pos.x >= 35.0 && cube.pos.x <= 765.0);
    }

    #[test]
    fn test_orbs_spawn_above_arena_in_bounds() {
        let mut world = world_with_drop_index(1000);
        for _ in 0..100 {
            spawn_next(&mut world);
        }
        for orb in &world.bodies {
            let r = orb.effective_radius();
            assert!((35.0..=70.0).contains(&r));
            assert_eq!(orb.pos.y, -r);
            assert!(orb.pos.x >= r && orb.pos.x <= 800.0 - r);
            assert_eq!(orb.mass, r * r);
            for c in [orb.tint.r, orb.tint.g, orb.tint.b] {
                assert!(c >= 80);
            }
            assert!(orb.sprite < world.config.orb_sprites);
        }
        let first = world.bodies[0].sprite;
        assert!(world.bodies.iter().any(|b| b.sprite != first));
    }

    #[test]
    fn test_timer_gates_spawns() {
        let mut world = world_with_drop_index(40);
        world.spawn.next_delay_ms = 100;

        assert_eq!(maybe_spawn(&mut world, 60.0), None);
        assert_eq!(maybe_spawn(&mut world, 60.0), Some(SpawnKind::Orb));
        assert_eq!(world.bodies.len(), 1);
        assert_eq!(world.spawn.elapsed_ms, 0.0);
        assert!(world.spawn.next_delay_ms <= 2000);
    }

    #[test]
    fn test_full_arena_blocks_spawning() {
        let config = SimConfig {
            max_bodies: 50,
            min_radius: 5.0,
            max_radius: 5.0,
            spawn_delay_max_ms: 0,
            ..Default::default()
        };
        let mut world = World::new(config, 3).unwrap();

        for _ in 0..50 {
            assert!(maybe_spawn(&mut world, 16.0).is_some());
        }
        assert_eq!(world.bodies.len(), 50);
        assert!(world.is_arena_full());

        for _ in 0..100 {
            assert_eq!(maybe_spawn(&mut world, 16.0), None);
        }
        assert_eq!(world.bodies.len(), 50);
        assert_eq!(world.spawn.spawn_count, 50);

        world.reset();
        assert!(!world.is_arena_full());
        assert!(maybe_spawn(&mut world, 16.0).is_some());
    }
}

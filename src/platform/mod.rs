//! Platform abstraction layer
//!
//! Handles the outside world for the frame loop:
//! - Input snapshots (one per tick)
//! - Fixed-rate frame timing

use glam::Vec2;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::TickInput;

/// Produces the input snapshot for each tick
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> TickInput;
}

/// A timed pointer or key event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    PointerDown(Vec2),
    MoveTo(Vec2),
    PointerUp(Vec2),
    Reset,
    Quit,
}

/// Replays events at fixed ticks; the pointer stays where it was last put
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// (tick, event), sorted by tick
    events: Vec<(u64, ScriptEvent)>,
    cursor: usize,
    pointer: Vec2,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(u64, ScriptEvent)>) -> Self {
        events.sort_by_key(|(tick, _)| *tick);
        Self {
            events,
            cursor: 0,
            pointer: Vec2::ZERO,
        }
    }

    /// Press at `from`, drag in a straight line to `to` over `ticks`, release
    pub fn fling(start: u64, from: Vec2, to: Vec2, ticks: u64) -> Vec<(u64, ScriptEvent)> {
        let ticks = ticks.max(1);
        let mut events = vec![(start, ScriptEvent::PointerDown(from))];
        for i in 1..ticks {
            let t = i as f32 / ticks as f32;
            events.push((start + i, ScriptEvent::MoveTo(from.lerp(to, t))));
        }
        events.push((start + ticks, ScriptEvent::PointerUp(to)));
        events
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> TickInput {
        let mut input = TickInput::default();

        while let Some(&(at, event)) = self.events.get(self.cursor) {
            if at > tick {
                break;
            }
            self.cursor += 1;
            match event {
                ScriptEvent::PointerDown(pos) => {
                    self.pointer = pos;
                    input.pointer_pressed = true;
                }
                ScriptEvent::MoveTo(pos) => self.pointer = pos,
                ScriptEvent::PointerUp(pos) => {
                    self.pointer = pos;
                    input.pointer_released = true;
                }
                ScriptEvent::Reset => input.reset = true,
                ScriptEvent::Quit => input.quit = true,
            }
        }

        // Last position wins
        input.pointer = self.pointer;
        input
    }
}

/// Turns wall-clock frame time into whole fixed steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_secs: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            step_secs: 1.0 / frame_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Fixed step length in seconds
    pub fn step_secs(&self) -> f32 {
        self.step_secs
    }

    /// Add elapsed time; returns how many steps to run now (capped to
    /// prevent spiral of death, excess time is dropped)
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= self.step_secs && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step_secs);
        }
        steps
    }
}

//! Orb Pool entry point
//!
//! Headless native driver: runs the fixed-rate loop against scripted pointer
//! input and the fallback mesh presenter, then logs a summary. A windowed
//! front end plugs in through `platform::InputSource` and `renderer::Presenter`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;

use orb_pool::platform::{FrameClock, InputSource, ScriptEvent, ScriptedInput};
use orb_pool::renderer::{FallbackMesh, present};
use orb_pool::sim::{World, tick};
use orb_pool::{ConfigError, SimConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Headless orb pool simulation")]
struct Args {
    /// JSON config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World RNG seed
    #[arg(short, long, default_value_t = 0x0bb5_eed)]
    seed: u64,

    /// Frames to simulate before quitting
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Pace the loop with the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Two throws from the floor, then quit
fn demo_script(config: &SimConfig, frames: u64) -> ScriptedInput {
    let floor = Vec2::new(config.arena_width / 2.0, config.arena_height - config.min_radius);
    let mut events = ScriptedInput::fling(300, floor, floor + Vec2::new(-120.0, -200.0), 6);
    events.extend(ScriptedInput::fling(900, floor, floor + Vec2::new(150.0, -250.0), 4));
    events.push((frames, ScriptEvent::Quit));
    ScriptedInput::new(events)
}

/// Owns the world and its input script; frames are counted here, not on
/// world ticks, which a reset rewinds
struct Driver<I: InputSource> {
    world: World,
    input: I,
    frame_ms: f32,
    frame: u64,
    flings: u32,
}

impl<I: InputSource> Driver<I> {
    fn new(world: World, input: I) -> Self {
        let frame_ms = world.config.frame_ms();
        Self {
            world,
            input,
            frame_ms,
            frame: 0,
            flings: 0,
        }
    }

    /// Run one frame; false once the input asks to quit
    fn step(&mut self) -> bool {
        let tick_input = self.input.poll(self.frame);
        if tick_input.quit {
            return false;
        }
        self.frame += 1;

        let report = tick(&mut self.world, &tick_input, self.frame_ms);
        if report.flung.is_some() {
            self.flings += 1;
        }
        if self.frame % 600 == 0 {
            log::debug!(
                "frame {}: {} bodies, coverage {:.2}",
                self.frame,
                self.world.bodies.len(),
                self.world.coverage()
            );
        }
        true
    }
}

fn run(args: Args) -> Result<(), ConfigError> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut clock = FrameClock::new(config.frame_rate);
    let input = demo_script(&config, args.frames);
    let mut driver = Driver::new(World::new(config, args.seed)?, input);
    let mut mesh = FallbackMesh::default();

    let mut last = Instant::now();
    'frames: loop {
        let steps = if args.realtime {
            let now = Instant::now();
            let steps = clock.advance((now - last).as_secs_f32());
            last = now;
            steps
        } else {
            1
        };

        for _ in 0..steps {
            if !driver.step() {
                break 'frames;
            }
        }

        if steps > 0 {
            present(&driver.world, &mut mesh);
        }
        if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(clock.step_secs() / 2.0));
        }
    }

    let world = &driver.world;
    log::info!(
        "Finished after {} frames (seed {}): {} bodies, coverage {:.2}, full: {}, cube: {}, throws: {}, {} mesh bytes",
        driver.frame,
        world.seed,
        world.bodies.len(),
        world.coverage(),
        world.is_arena_full(),
        world.special_index().is_some(),
        driver.flings,
        mesh.as_bytes().len()
    );

    if log::log_enabled!(log::Level::Trace) {
        match serde_json::to_string(&world.bodies) {
            Ok(dump) => log::trace!("Final bodies: {dump}"),
            Err(e) => log::warn!("Could not dump bodies: {e}"),
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Orb Pool (headless) starting...");

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

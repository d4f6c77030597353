//! Marble Race entry point
//!
//! Native demo driver: builds a course from settings, runs a few seconds of
//! fixed steps against the in-memory physics world, then prints the layout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use marble_race::physics::MemoryWorld;
use marble_race::sim::SimClock;
use marble_race::{Race, SessionState, Settings};

/// Frame delta fed to the clock (60 fps host)
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a marble race course and simulate its obstacles", long_about = None)]
struct Args {
    /// Settings JSON file (defaults are used when omitted)
    settings: Option<PathBuf>,
    /// Simulated time in seconds
    #[arg(long, default_value_t = 3.0)]
    seconds: f32,
    /// Override the block count from the settings
    #[arg(long)]
    count: Option<i64>,
    /// Override the layout seed from the settings
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if let Some(count) = self.count {
            settings.blocks_count = count;
        }
        if let Some(seed) = self.seed {
            settings.block_seed = seed;
        }
        settings
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Marble Race (native) starting...");

    let args = Args::parse();
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        log::error!("Invalid duration: {}", args.seconds);
        return ExitCode::FAILURE;
    }

    let settings = args.settings();
    if let Err(e) = settings.validate() {
        log::error!("Invalid settings: {}", e);
        return ExitCode::FAILURE;
    }

    let state = SessionState::from_settings(&settings);
    let clock = SimClock::new(settings.sim_hz, settings.max_substeps);
    let mut race = Race::new(MemoryWorld::new(), clock);
    if let Err(e) = race.sync(&state) {
        log::error!("Could not build course: {}", e);
        return ExitCode::FAILURE;
    }

    let frames = (args.seconds / FRAME_DT).ceil() as u32;
    let mut steps = 0u64;
    for _ in 0..frames {
        steps += race.advance(FRAME_DT) as u64;
    }
    log::info!(
        "Simulated {} steps ({:.2}s), {} bodies live, {} kinematic",
        steps,
        race.clock().elapsed(),
        race.world().len(),
        race.world().kinematic_count()
    );

    let Some(level) = race.level() else {
        return ExitCode::FAILURE;
    };
    match serde_json::to_string_pretty(level) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Could not serialize level: {}", e);
            return ExitCode::FAILURE;
        }
    }

    race.into_world();
    ExitCode::SUCCESS
}

//! Headless sparkring runner.
//!
//! Drives a simulation with a synthetic pointer that circles the generator
//! and toggles attraction every second, logging a summary once per simulated
//! second.
//!
//! Usage: `sparkring [--fixed-step] [--seed N] [settings.json] [seconds]`
//!
//! By default the run follows the wall clock. `--fixed-step` advances exactly
//! 1/60 s per frame without sleeping; combined with `--seed` the run is
//! reproducible.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use sparkring::prelude::*;
use std::env;
use std::error::Error;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FRAME_BUDGET: Duration = Duration::from_millis(16);
const FIXED_STEP: f64 = 1.0 / 60.0;
const DEFAULT_SECONDS: f64 = 10.0;

#[derive(Debug, Default, PartialEq)]
struct RunOptions {
    settings_path: Option<String>,
    seconds: Option<f64>,
    fixed_step: bool,
    seed: Option<u64>,
}

impl RunOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, Box<dyn Error>> {
        let mut options = RunOptions::default();
        let mut args = args.into_iter();
        let mut positional = 0;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixed-step" => options.fixed_step = true,
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    options.seed = Some(value.parse()?);
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown option {flag}").into());
                }
                _ => {
                    match positional {
                        0 => options.settings_path = Some(arg.clone()),
                        1 => options.seconds = Some(arg.parse()?),
                        _ => return Err(format!("unexpected argument {arg}").into()),
                    }
                    positional += 1;
                }
            }
        }

        Ok(options)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = RunOptions::parse(env::args().skip(1))?;
    let settings = match &options.settings_path {
        Some(path) => {
            tracing::info!(%path, "loading settings");
            Settings::load(path)?
        }
        None => Settings::default(),
    };
    let seconds = options.seconds.unwrap_or(DEFAULT_SECONDS);

    let mut sim = Simulation::new(settings);
    if let Some(seed) = options.seed {
        sim = sim.with_seed(seed);
    }
    let settings = sim.settings().clone();
    tracing::info!(
        max_particles = settings.max_particles,
        radius = settings.generator_radius,
        interval = settings.spawn_interval,
        speed = settings.speed_base,
        seconds,
        fixed_step = options.fixed_step,
        "simulation starting"
    );

    let mut time = Time::new();
    if options.fixed_step {
        time = time.with_fixed_delta(FIXED_STEP);
    }
    let mut next_report = 1.0;
    let mut spawned = 0usize;
    let mut aged_out = 0usize;
    let mut culled = 0usize;

    while time.elapsed() < seconds {
        if !time.is_fixed_step() {
            thread::sleep(FRAME_BUDGET);
        }
        let (now, _) = time.update();

        let pointer = orbiting_pointer(sim.generator(), now);
        let report = sim.tick(now, &pointer);
        spawned += report.spawned();
        aged_out += report.aged_out;
        culled += report.culled;

        if now >= next_report {
            tracing::info!(
                t = now,
                fps = time.fps(),
                dt = time.delta(),
                live = report.live,
                spawned,
                aged_out,
                culled,
                attract = pointer.attract,
                "population"
            );
            next_report += 1.0;
        }
    }

    tracing::info!(frames = time.frame(), live = sim.particles().len(), "simulation finished");
    Ok(())
}

/// A pointer circling the generator at half its radius, attracting on odd seconds.
fn orbiting_pointer(generator: &Generator, now: f64) -> PointerState {
    let angle = now * std::f64::consts::FRAC_PI_2;
    let offset = DVec2::from_angle(angle) * generator.radius() * 0.5;
    PointerState::at(generator.position() + offset, now as u64 % 2 == 1)
}

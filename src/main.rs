//! Box Bounce entry point
//!
//! Headless driver: builds a world from settings, advances it tick by tick,
//! and logs where the balls end up. Rendering, pacing, and everything else
//! visual is someone else's job - this binary only owns the tick loop.

use std::path::Path;
use std::process::ExitCode;

use box_bounce::SimError;
use box_bounce::settings::Settings;
use box_bounce::sim::{SimState, tick};

fn main() -> ExitCode {
    env_logger::init();

    let settings = match parse_args() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "usage: box-bounce [CONFIG.json] [--balls N] [--ticks N] [--seed N] \
                 [--stop-x X] [--strict]"
            );
            return ExitCode::from(2);
        }
    };

    let mut state = match SimState::new(&settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Spawned {} balls in a {}x{} box (seed {})",
        state.balls.len(),
        state.enclosure.width(),
        state.enclosure.height(),
        state.seed
    );

    run(&mut state, &settings);

    log::info!("Finished after {} ticks", state.time_ticks);
    for ball in &state.balls {
        log::info!(
            "ball {} ({}, r={}): pos=({}, {}) vel=({}, {})",
            ball.id,
            ball.color.as_str(),
            ball.radius,
            ball.x(),
            ball.y(),
            ball.vel.x,
            ball.vel.y
        );
    }

    ExitCode::SUCCESS
}

/// Advance the world until the tick budget runs out or a ball crosses the
/// stop threshold
fn run(state: &mut SimState, settings: &Settings) {
    for _ in 0..settings.max_ticks {
        tick(state);

        if let Some(stop_x) = settings.stop_x {
            if state.balls.iter().any(|b| b.x() >= stop_x) {
                log::info!(
                    "Stopping early: a ball reached x >= {stop_x} after {} ticks",
                    state.time_ticks
                );
                break;
            }
        }
    }
}

/// Build settings from argv: an optional JSON config path plus overrides
fn parse_args() -> Result<Settings, SimError> {
    let mut settings = Settings::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--balls" => settings.ball_count = next_value(&mut args, "--balls")?,
            "--ticks" => settings.max_ticks = next_value(&mut args, "--ticks")?,
            "--seed" => settings.seed = next_value(&mut args, "--seed")?,
            "--stop-x" => settings.stop_x = Some(next_value(&mut args, "--stop-x")?),
            "--strict" => settings.strict_containment = true,
            flag if flag.starts_with("--") => {
                return Err(SimError::InvalidConfiguration(format!(
                    "unknown flag {flag}"
                )));
            }
            path => {
                // Overrides given before the config path would be lost;
                // load the file first, then let later flags win.
                let loaded = Settings::load(Path::new(path))?;
                settings = loaded;
            }
        }
    }

    settings.validate()?;
    Ok(settings)
}

fn next_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, SimError> {
    let raw = args
        .next()
        .ok_or_else(|| SimError::InvalidConfiguration(format!("{flag} needs a value")))?;
    raw.parse()
        .map_err(|_| SimError::InvalidConfiguration(format!("{flag}: bad value {raw:?}")))
}

//! Frontline headless driver
//!
//! Runs a session with a simple autopilot and logs how it went. Usage:
//!
//! ```text
//! frontline [--settings PATH] [--mode survival|bootcamp] [--seed N]
//!           [--steps N] [--save-settings PATH] [--scores PATH]
//! ```
//!
//! `--mode` and `--seed` override the loaded settings. With `--scores` the
//! run is added to a leaderboard file that persists between runs.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "frontline")]
#[command(about = "Play a headless Frontline session with an autopilot")]
struct Args {
    /// Settings JSON to load (defaults when missing)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Game mode, overriding the settings file
    #[arg(long)]
    mode: Option<frontline::GameMode>,

    /// RNG seed, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Step limit for the session
    #[arg(long, default_value_t = 60 * 60 * 5)]
    steps: u64,

    /// Write the effective settings here before playing
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Leaderboard JSON that the run is added to
    #[arg(long)]
    scores: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use frontline::consts::SIM_DT;
    use frontline::sim::{FrameResult, GamePhase, GameState, tick};
    use frontline::{HighScores, Settings};

    env_logger::init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(path) = &args.save_settings {
        match settings.save(path) {
            Ok(()) => log::info!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {e}", path.display()),
        }
    }

    let max_steps = args.steps;
    log::info!("Frontline (native) starting, {} steps max", max_steps);

    let mut state = GameState::new(settings);
    let mut waves_cleared = 0;
    while state.time_ticks < max_steps {
        let input = autopilot(&state);
        match tick(&mut state, &input) {
            FrameResult::PlayerDied => break,
            FrameResult::WaveCleared => waves_cleared += 1,
            FrameResult::Continue => {}
        }
        if state.phase == GamePhase::Complete {
            break;
        }
    }

    let run = state.run_summary();
    log::info!(
        "Session ended after {} steps ({:.1}s): wave {}, {} cleared, {} kills, ${}",
        state.time_ticks,
        state.time_ticks as f32 * SIM_DT,
        run.wave,
        waves_cleared,
        run.kills,
        run.money
    );

    let mut scores = match &args.scores {
        Some(path) => HighScores::load(path),
        None => HighScores::new(),
    };
    if let Some(rank) = scores.add(run) {
        log::info!("High score rank {rank}");
    }
    if scores.is_empty() {
        log::info!("No runs on the leaderboard yet");
    } else if let Some(best) = scores.best() {
        log::info!("Best run: wave {}, {} kills", best.wave, best.kills);
    }
    if let Some(path) = &args.scores {
        if let Err(e) = scores.save(path) {
            log::warn!("Could not save high scores to {}: {e}", path.display());
        }
    }
    match scores.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not encode high scores: {e}"),
    }
}

/// Circle-strafe around the nearest hostile and keep shooting at it
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &frontline::sim::GameState) -> frontline::sim::TickInput {
    use frontline::sim::TickInput;

    let player = &state.player.body;
    let target = state
        .hostiles
        .iter()
        .filter(|h| h.is_alive())
        .min_by_key(|h| (h.pos - player.pos).abs().element_sum());

    let Some(target) = target else {
        return TickInput::default();
    };

    let to_target = target.pos - player.pos;
    let phase = (state.time_ticks / 90) % 4;
    let reloading = player.primary.as_ref().is_some_and(|w| w.is_reloading());
    let empty = player.primary.as_ref().is_some_and(|w| w.magazine == 0);

    TickInput {
        up: phase == 0,
        right: phase == 1,
        down: phase == 2,
        left: phase == 3,
        // Release every other step so semi-automatic weapons keep firing
        fire: !reloading && state.time_ticks % 2 == 0,
        aim: state.to_screen(target.pos),
        reload: empty,
        throw_grenade: to_target.abs().max_element() < 300,
        ..Default::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

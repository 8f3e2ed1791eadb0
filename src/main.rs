//! Skyflap entry point
//!
//! Native headless runner: plays one autopilot run through the full state
//! machine, then records the score on the leaderboard.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyflap::audio::{AudioManager, LogAudio};
    use skyflap::consts::*;
    use skyflap::platform::{FixedStep, InputState, SIM_DT, run_frame};
    use skyflap::renderer::{LogRenderer, RenderSnapshot, Renderer};
    use skyflap::sim::{GameEvent, GameMode, GamePhase, GameState, set_events_enabled};
    use skyflap::{Leaderboard, Settings};

    /// Command line options
    #[derive(Debug, Clone)]
    pub struct Options {
        pub seed: u64,
        /// Upper bound on simulated ticks
        pub ticks: u64,
        pub mode: Option<GameMode>,
        pub name: Option<String>,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seed: 0x5eed,
                ticks: 20_000,
                mode: None,
                name: None,
            }
        }
    }

    pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--seed" => {
                    options.seed = value()?.parse().map_err(|e| format!("bad --seed: {e}"))?;
                }
                "--ticks" => {
                    options.ticks = value()?.parse().map_err(|e| format!("bad --ticks: {e}"))?;
                }
                "--mode" => {
                    let raw = value()?;
                    options.mode =
                        Some(GameMode::parse(&raw).ok_or_else(|| format!("unknown mode {raw}"))?);
                }
                "--name" => options.name = Some(value()?),
                other => return Err(format!("unknown argument {other}")),
            }
        }
        Ok(options)
    }

    pub fn run(options: Options) {
        let settings = Settings::load();
        let mut leaderboard = Leaderboard::load(&settings.leaderboard_path);
        let mut audio = AudioManager::from_settings(LogAudio::default(), &settings);
        let mut renderer = LogRenderer::new(60);

        let mut state = GameState::new(options.seed);
        state.selected_mode = options.mode.unwrap_or(settings.mode);
        state.skin = settings.skin;
        state.respawn_avatar();
        state.debug_mode = settings.debug_mode;
        if !settings.events_enabled {
            set_events_enabled(&mut state, false);
        }

        let name = options.name.unwrap_or_else(|| settings.player_name.clone());
        let mut step = FixedStep::new();
        let mut input = InputState::default();
        input.input.idle_mode = true;
        input.pointer_down();

        let mut submitted = false;
        while state.time_ticks < options.ticks {
            run_frame(&mut state, &mut step, &mut input, SIM_DT);

            let events = state.drain_events();
            audio.handle_events(&events);
            for event in &events {
                match event {
                    GameEvent::EventStarted(kind) => log::info!("Event: {}", kind.label()),
                    GameEvent::SubmissionReady { score } => {
                        submit(&mut leaderboard, &name, *score);
                        submitted = true;
                    }
                    _ => {}
                }
            }
            renderer.render(&RenderSnapshot::capture(&state, leaderboard.best_score()));

            if submitted {
                break;
            }
        }

        if !submitted {
            if state.phase != GamePhase::GameOver {
                log::info!("Tick budget spent while still flying");
            }
            submit(&mut leaderboard, &name, state.score);
        }

        if let Err(e) = leaderboard.save(&settings.leaderboard_path) {
            log::warn!("Could not save leaderboard: {e}");
        }

        println!(
            "{} run: score {} in {:.1} s ({} cues played)",
            state.selected_mode.as_str(),
            state.score,
            state.run_elapsed_ms() as f32 / 1000.0,
            audio.sink().played
        );
        println!("High scores:");
        for (i, entry) in leaderboard.entries.iter().enumerate() {
            println!("  {}. {:<12} {}", i + 1, entry.name, entry.score);
        }
        if leaderboard.is_empty() {
            println!("  (none)");
        }
        log::debug!("Ran {} ticks ({} ms per tick)", state.time_ticks, TICK_MS);
    }

    fn submit(leaderboard: &mut Leaderboard, name: &str, score: u64) {
        if !leaderboard.is_top_score(score) {
            log::info!("Score {score} is not a top score");
            return;
        }
        match leaderboard.submit(name, score) {
            Some(rank) => log::info!("{name} placed #{rank} with {score}"),
            None => log::info!("Score {score} did not place"),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyflap (headless) starting...");

    match headless::parse_args(std::env::args().skip(1)) {
        Ok(options) => headless::run(options),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: skyflap [--seed N] [--ticks N] [--mode adventure|pilot] [--name NAME]");
            std::process::exit(2);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Nothing to run headless in the browser
}

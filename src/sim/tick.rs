//! Fixed timestep simulation tick
//!
//! The state machine: menu, running (adventure or pilot), paused, game over.
//! A running tick is always integrate → obstacles → collide → events.

use super::collision::{self, Outcome};
use super::events::{EventKind, end_event, set_events_enabled, trigger_event, update_events};
use super::kinematics::{Regime, blend_toward_targets, flap, integrate, menu_bob};
use super::state::{GameEvent, GameMode, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (adventure mode only)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a run from the main menu
    pub start: bool,
    /// Return to the main menu after game over
    pub restart: bool,
    /// Switch the selected mode (menu only)
    pub cycle_mode: bool,
    /// Switch the avatar skin (menu only)
    pub cycle_skin: bool,
    /// Pointer height steering the nearest gap (pilot mode only)
    pub steer_y: Option<f32>,
    /// Force an event (debug mode only)
    pub trigger_event: Option<EventKind>,
    /// Enable/disable random events
    pub toggle_events: bool,
    /// Debug overlay toggle
    pub toggle_debug: bool,
    /// Idle/demo mode - AI flaps in adventure mode
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.toggle_debug {
        state.debug_mode = !state.debug_mode;
        log::info!("Debug mode: {}", state.debug_mode);
    }
    if input.toggle_events {
        let enabled = !state.scheduler.enabled;
        set_events_enabled(state, enabled);
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running(mode) => {
                state.phase = GamePhase::Paused(mode);
                log::info!("Paused at {} ms", state.clock_ms);
                return;
            }
            GamePhase::Paused(mode) => {
                state.phase = GamePhase::Running(mode);
                log::info!("Resumed at {} ms", state.clock_ms);
            }
            _ => {}
        }
    }

    // Paused: nothing advances, not even the clock
    if let GamePhase::Paused(_) = state.phase {
        return;
    }

    state.time_ticks += 1;
    state.clock_ms += TICK_MS;
    state.backdrop.update_cycle(state.clock_ms);

    match state.phase {
        GamePhase::MainMenu => tick_menu(state, input),
        GamePhase::Running(mode) => tick_running(state, input, mode),
        GamePhase::GameOver => tick_game_over(state, input),
        GamePhase::Paused(_) => {}
    }
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    if input.cycle_mode {
        state.selected_mode = state.selected_mode.toggled();
        log::info!("Selected mode: {}", state.selected_mode.as_str());
    }
    if input.cycle_skin {
        state.skin = state.skin.next();
        state.respawn_avatar();
        log::info!("Selected skin: {}", state.skin.as_str());
    }

    menu_bob(&mut state.avatar);
    state.backdrop.scroll_ground();
    state.backdrop.scroll_background();

    if input.start {
        state.push_event(GameEvent::Swoosh);
        let mode = state.selected_mode;
        state.start_run(mode);
    }
}

fn tick_running(state: &mut GameState, input: &TickInput, mode: GameMode) {
    // Player input
    if let Some(kind) = input.trigger_event {
        if state.debug_mode && state.scheduler.enabled {
            trigger_event(state, kind);
        }
    }
    match mode {
        GameMode::Adventure => {
            let wants_flap = if input.idle_mode {
                autopilot_wants_flap(state)
            } else {
                input.flap
            };
            if wants_flap {
                flap(&mut state.avatar);
                state.push_event(GameEvent::Flap);
            }
        }
        GameMode::Pilot => {
            if let Some(y) = input.steer_y {
                state.stream.steer_nearest(state.avatar.pos.x, y);
            }
        }
    }

    // 1. Kinematics
    let regime = Regime::select(mode, &state.params);
    blend_toward_targets(&mut state.avatar, &state.params);
    integrate(&mut state.avatar, regime, &mut state.rng);
    state.backdrop.scroll_ground();
    state.backdrop.scroll_background();

    // 2. Obstacles: advance/score/retire, then the wave timer
    let awards = state
        .stream
        .advance_all(state.avatar.pos.x, state.params.multiplier);
    for points in awards {
        state.score += points;
        let total = state.score;
        state.push_event(GameEvent::Scored { points, total });
    }
    let now = state.clock_ms;
    let gap_height = state.params.gap_height;
    state.stream.update_spawn(now, &mut state.rng, gap_height);
    state.overlay.update(now, &mut state.rng);

    // 3. Collision sees this tick's post-integration position
    let outcome = collision::check(&state.avatar, regime, &state.stream.obstacles);
    if outcome.is_hit() {
        game_over(state, outcome);
        return;
    }

    // 4. Events
    update_events(state);
}

/// End the run: revert the active event first, then enter GameOver
fn game_over(state: &mut GameState, outcome: Outcome) {
    end_event(state);

    if outcome.is_impact() {
        state.push_event(GameEvent::Hit);
    }
    state.push_event(GameEvent::Died(outcome));

    state.phase = GamePhase::GameOver;
    state.last_outcome = outcome;
    state.game_over_at_ms = state.clock_ms;
    state.submission_offered = false;
    log::info!(
        "Game over ({:?}): score {} after {} ms",
        outcome,
        state.score,
        state.run_elapsed_ms()
    );
}

fn tick_game_over(state: &mut GameState, input: &TickInput) {
    if !state.submission_offered
        && state.clock_ms.saturating_sub(state.game_over_at_ms) >= GAME_OVER_DELAY_MS
    {
        state.submission_offered = true;
        let score = state.score;
        state.push_event(GameEvent::SubmissionReady { score });
    }

    if input.restart {
        state.reset_to_menu();
        log::info!("Back to main menu");
    }
}

/// Flap when the avatar sinks toward the bottom of the next gap
fn autopilot_wants_flap(state: &GameState) -> bool {
    let avatar = &state.avatar;
    let center_y = avatar.pos.y + avatar.size.y / 2.0;

    let threshold = state
        .stream
        .obstacles
        .iter()
        .find(|o| o.x + o.width >= avatar.pos.x)
        .map(|o| o.gap_bottom() - 20.0)
        .unwrap_or(GROUND_Y * 0.6);

    avatar.vel >= 0.0 && center_y > threshold
}

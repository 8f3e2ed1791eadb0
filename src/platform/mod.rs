//! Platform glue
//!
//! Handles the frontend side of the simulation:
//! - Frame time → fixed ticks (accumulator)
//! - Keys/pointer → `TickInput`

use crate::consts::{MAX_SUBSTEPS, TICK_MS};
use crate::sim::{EventKind, GameState, TickInput, tick};

/// Seconds per tick
pub const SIM_DT: f32 = TICK_MS as f32 / 1000.0;

/// Converts variable frame times into a bounded number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed seconds and return how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.25);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Behind by more than the cap: drop the backlog
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}

/// Logical keys the frontend reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    P,
    R,
    S,
    C,
    E,
    B,
    I,
    Digit(u8),
}

/// Latched input between frames. One-shot commands clear after a tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub input: TickInput,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        let input = &mut self.input;
        match key {
            Key::Space => input.flap = true,
            Key::P => input.pause = true,
            Key::R => input.restart = true,
            Key::S => input.cycle_skin = true,
            Key::C => input.cycle_mode = true,
            Key::E => input.toggle_events = true,
            Key::B => input.toggle_debug = true,
            Key::I => {
                input.idle_mode = !input.idle_mode;
                log::info!("Idle mode: {}", input.idle_mode);
            }
            Key::Digit(n) => {
                if let Some(kind) = event_for_digit(n) {
                    input.trigger_event = Some(kind);
                }
            }
        }
    }

    /// Click: starts a run on the menu, flaps while running
    pub fn pointer_down(&mut self) {
        self.input.start = true;
        self.input.flap = true;
    }

    pub fn pointer_move(&mut self, y: f32) {
        self.input.steer_y = Some(y);
    }

    /// Clear one-shot inputs after processing
    pub fn clear_one_shots(&mut self) {
        let idle_mode = self.input.idle_mode;
        let steer_y = self.input.steer_y;
        self.input = TickInput {
            idle_mode,
            steer_y,
            ..Default::default()
        };
    }
}

/// Debug keys 1-4 map to the event kinds in order
pub fn event_for_digit(n: u8) -> Option<EventKind> {
    let index = usize::from(n).checked_sub(1)?;
    EventKind::ALL.get(index).copied()
}

/// Run the ticks owed for one frame, clearing one-shots after each
pub fn run_frame(
    state: &mut GameState,
    step: &mut FixedStep,
    input: &mut InputState,
    dt: f32,
) -> u32 {
    let ticks = step.advance(dt);
    for _ in 0..ticks {
        tick(state, &input.input);
        input.clear_one_shots();
    }
    ticks
}

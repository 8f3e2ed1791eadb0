//! Random gameplay events
//!
//! A single-slot scheduler: idle until the readiness deadline, then exactly
//! one event is active until its end deadline. Activation records an undo
//! snapshot; expiry restores it and draws the next idle wait.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, PhysicsParams};
use crate::consts::*;
use crate::secs_to_ms;

/// Every event the scheduler can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    LowGravity,
    SizeChange,
    DoubleScore,
    SkyOverlay,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::LowGravity,
        EventKind::SizeChange,
        EventKind::DoubleScore,
        EventKind::SkyOverlay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::LowGravity => "Low Gravity",
            EventKind::SizeChange => "Size Change",
            EventKind::DoubleScore => "Double Score",
            EventKind::SkyOverlay => "Cloudy Sky",
        }
    }

    /// Geometry-changing events flush the stream on activation
    pub fn clears_obstacles(&self) -> bool {
        !matches!(self, EventKind::SkyOverlay)
    }
}

/// Values an event may override, captured right before it applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Undo {
    pub params: PhysicsParams,
    pub avatar_size: Vec2,
    pub avatar_gravity: f32,
    pub avatar_lift: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    pub started_ms: u64,
    pub ends_ms: u64,
    pub undo: Undo,
}

impl ActiveEvent {
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.ends_ms.saturating_sub(now_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SchedulerState {
    /// Waiting; the next event fires at `next_ms`
    Idle { since_ms: u64, next_ms: u64 },
    Active(ActiveEvent),
}

/// Progress bar content for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventProgress {
    Disabled,
    /// Fraction of the idle wait already elapsed
    Waiting { fraction: f32 },
    /// Fraction of the event duration already elapsed
    Active { kind: EventKind, fraction: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventScheduler {
    pub state: SchedulerState,
    pub enabled: bool,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle {
                since_ms: 0,
                next_ms: 0,
            },
            enabled: true,
        }
    }
}

impl EventScheduler {
    /// Go idle and draw the first wait of a run
    pub fn reset<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        self.state = SchedulerState::Idle {
            since_ms: now_ms,
            next_ms: now_ms + draw_interval_ms(rng),
        };
    }

    /// Drop any active event without reverting (its state is being discarded)
    pub fn deactivate(&mut self) {
        self.state = SchedulerState::Idle {
            since_ms: 0,
            next_ms: 0,
        };
    }

    pub fn active(&self) -> Option<&ActiveEvent> {
        match &self.state {
            SchedulerState::Active(event) => Some(event),
            SchedulerState::Idle { .. } => None,
        }
    }

    pub fn active_kind(&self) -> Option<EventKind> {
        self.active().map(|e| e.kind)
    }

    pub fn progress(&self, now_ms: u64) -> EventProgress {
        if !self.enabled {
            return EventProgress::Disabled;
        }
        match self.state {
            SchedulerState::Active(event) => {
                let total = event.ends_ms.saturating_sub(event.started_ms).max(1);
                let elapsed = now_ms.saturating_sub(event.started_ms);
                EventProgress::Active {
                    kind: event.kind,
                    fraction: (elapsed as f32 / total as f32).min(1.0),
                }
            }
            SchedulerState::Idle { since_ms, next_ms } => {
                let total = next_ms.saturating_sub(since_ms);
                let fraction = if total == 0 {
                    0.0
                } else {
                    let remaining = next_ms.saturating_sub(now_ms);
                    (1.0 - remaining as f32 / total as f32).max(0.0)
                };
                EventProgress::Waiting { fraction }
            }
        }
    }
}

fn draw_interval_ms<R: Rng>(rng: &mut R) -> u64 {
    secs_to_ms(rng.random_range(EVENT_INTERVAL_MIN..=EVENT_INTERVAL_MAX))
}

fn draw_duration_ms<R: Rng>(rng: &mut R) -> u64 {
    secs_to_ms(rng.random_range(EVENT_DURATION_MIN..=EVENT_DURATION_MAX))
}

/// Start `kind` now. No-op while another event is active.
pub fn trigger_event(state: &mut GameState, kind: EventKind) -> bool {
    if state.scheduler.active().is_some() {
        log::debug!("Ignoring {} trigger: an event is already active", kind.label());
        return false;
    }

    let now = state.clock_ms;
    let duration = draw_duration_ms(&mut state.rng);
    let undo = Undo {
        params: state.params,
        avatar_size: state.avatar.size,
        avatar_gravity: state.avatar.gravity,
        avatar_lift: state.avatar.lift,
    };

    if kind.clears_obstacles() {
        state.stream.clear();
    }

    match kind {
        EventKind::LowGravity => {
            state.params.gravity_target = LOW_GRAVITY;
            state.params.lift_target = LOW_GRAVITY_LIFT;
            state.params.gap_height = LOW_GRAVITY_GAP_HEIGHT;
            state.params.low_gravity = true;
            state.avatar.drift.retarget(&mut state.rng);
        }
        EventKind::SizeChange => {
            state.avatar.size *= SIZE_FACTOR;
            state.params.lift_target *= SIZE_LIFT_FACTOR;
            state.params.gravity_target *= SIZE_GRAVITY_FACTOR;
            state.params.gap_height *= SIZE_GAP_FACTOR;
            state.avatar.lift = state.params.lift_target;
            state.avatar.gravity = state.params.gravity_target;
        }
        EventKind::DoubleScore => {
            state.params.multiplier = 2;
        }
        EventKind::SkyOverlay => {
            state.overlay.enable(now, &mut state.rng);
        }
    }

    state.scheduler.state = SchedulerState::Active(ActiveEvent {
        kind,
        started_ms: now,
        ends_ms: now + duration,
        undo,
    });
    state.push_event(GameEvent::Swoosh);
    state.push_event(GameEvent::EventStarted(kind));
    log::info!("Event started: {} ({} ms)", kind.label(), duration);
    true
}

/// End the active event (if any): restore its undo snapshot and draw the
/// next idle wait. Returns the kind that ended.
pub fn end_event(state: &mut GameState) -> Option<EventKind> {
    let SchedulerState::Active(event) = state.scheduler.state else {
        return None;
    };
    let undo = event.undo;

    state.params = undo.params;
    match event.kind {
        EventKind::LowGravity => {
            state.avatar.drift.target = ROTATION_UP;
        }
        EventKind::SizeChange => {
            state.avatar.size = undo.avatar_size;
            state.avatar.gravity = undo.avatar_gravity;
            state.avatar.lift = undo.avatar_lift;
        }
        EventKind::DoubleScore => {}
        EventKind::SkyOverlay => {
            state.overlay.disable();
        }
    }

    let now = state.clock_ms;
    state.scheduler.state = SchedulerState::Idle {
        since_ms: now,
        next_ms: now + draw_interval_ms(&mut state.rng),
    };
    state.push_event(GameEvent::Swoosh);
    state.push_event(GameEvent::EventEnded(event.kind));
    log::info!("Event ended: {}", event.kind.label());
    Some(event.kind)
}

/// Scheduled transitions for this tick
pub fn update_events(state: &mut GameState) {
    if !state.scheduler.enabled {
        return;
    }

    let now = state.clock_ms;
    let current = state.scheduler.state;
    match current {
        SchedulerState::Idle { next_ms, .. } if now >= next_ms => {
            let kind = EventKind::ALL[state.rng.random_range(0..EventKind::ALL.len())];
            trigger_event(state, kind);
        }
        SchedulerState::Active(event) if now >= event.ends_ms => {
            end_event(state);
        }
        _ => {}
    }
}

/// Enable or disable the scheduler; disabling ends the active event
pub fn set_events_enabled(state: &mut GameState, enabled: bool) {
    state.scheduler.enabled = enabled;
    if !enabled {
        end_event(state);
    }
    log::info!("Random events {}", if enabled { "enabled" } else { "disabled" });
}

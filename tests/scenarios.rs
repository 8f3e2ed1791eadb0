//! End-to-end runs through the public tick API

use skyflap::consts::*;
use skyflap::sim::events::SchedulerState;
use skyflap::sim::{
    EventKind, GameEvent, GameMode, GamePhase, GameState, Outcome, PhysicsParams, TickInput,
    tick, trigger_event,
};

fn start(seed: u64, mode: GameMode) -> GameState {
    let mut state = GameState::new(seed);
    state.selected_mode = mode;
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Running(mode));
    state
}

fn idle() -> TickInput {
    TickInput::default()
}

/// Park the avatar mid-air at rest so it can fly through a gap at 150..250
fn hold_avatar(state: &mut GameState) {
    state.avatar.pos.y = 200.0;
    state.avatar.vel = 0.0;
}

#[test]
fn falls_to_the_ground_without_input() {
    let mut state = start(1, GameMode::Adventure);
    let mut last_y = state.avatar.pos.y;

    for _ in 0..200 {
        tick(&mut state, &idle());
        if state.phase == GamePhase::GameOver {
            break;
        }
        assert!(state.avatar.pos.y > last_y);
        last_y = state.avatar.pos.y;
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.last_outcome, Outcome::GroundHit);
    let cues = state.drain_events();
    assert!(cues.contains(&GameEvent::Hit));
    assert!(cues.contains(&GameEvent::Died(Outcome::GroundHit)));
}

#[test]
fn double_score_then_expiry() {
    let mut state = start(2, GameMode::Adventure);
    assert!(trigger_event(&mut state, EventKind::DoubleScore));

    hold_avatar(&mut state);
    state.stream.push_static(AVATAR_START_X + 1.0, 150.0, GAP_HEIGHT, false);
    tick(&mut state, &idle());
    assert_eq!(state.score, 2);

    // Expire the event on the next tick
    if let SchedulerState::Active(event) = &mut state.scheduler.state {
        event.ends_ms = state.clock_ms + TICK_MS;
    }
    hold_avatar(&mut state);
    tick(&mut state, &idle());
    assert!(state.scheduler.active().is_none());
    assert_eq!(state.params.multiplier, 1);

    hold_avatar(&mut state);
    state.stream.push_static(AVATAR_START_X + 1.0, 150.0, GAP_HEIGHT, false);
    tick(&mut state, &idle());
    assert_eq!(state.score, 3);
    assert_eq!(state.phase, GamePhase::Running(GameMode::Adventure));
}

#[test]
fn pause_keeps_event_deadline() {
    let mut state = start(3, GameMode::Adventure);
    trigger_event(&mut state, EventKind::DoubleScore);
    if let SchedulerState::Active(event) = &mut state.scheduler.state {
        event.ends_ms = state.clock_ms + 3000;
    }
    let ends_ms = state.scheduler.active().map(|e| e.ends_ms);

    let pause = TickInput {
        pause: true,
        ..Default::default()
    };
    tick(&mut state, &pause);
    assert_eq!(state.phase, GamePhase::Paused(GameMode::Adventure));

    for _ in 0..50 {
        tick(&mut state, &idle());
    }
    let event = *state.scheduler.active().expect("event survives the pause");
    assert_eq!(Some(event.ends_ms), ends_ms);
    assert_eq!(event.remaining_ms(state.clock_ms), 3000);

    tick(&mut state, &pause);
    assert!(state.phase.is_running());
    let event = *state.scheduler.active().expect("event still active");
    assert_eq!(Some(event.ends_ms), ends_ms);
    assert_eq!(event.remaining_ms(state.clock_ms), 3000 - TICK_MS);
}

#[test]
fn ground_hit_under_every_event() {
    for kind in EventKind::ALL {
        let mut state = start(4, GameMode::Adventure);
        trigger_event(&mut state, kind);
        state.avatar.pos.y = GROUND_Y;
        tick(&mut state, &idle());
        assert_eq!(state.last_outcome, Outcome::GroundHit, "{kind:?}");
        // Reverted before game over
        assert_eq!(state.params, PhysicsParams::default(), "{kind:?}");
        assert_eq!(state.avatar.size.x, AVATAR_WIDTH, "{kind:?}");
    }
}

#[test]
fn ceiling_exit_only_in_free_fall() {
    let mut state = start(5, GameMode::Adventure);
    state.avatar.pos.y = 4.0;
    state.avatar.vel = -8.0;
    tick(&mut state, &idle());
    assert_eq!(state.last_outcome, Outcome::CeilingExit);
    assert!(!state.drain_events().contains(&GameEvent::Hit));

    let mut state = start(5, GameMode::Adventure);
    trigger_event(&mut state, EventKind::LowGravity);
    state.avatar.pos.y = 4.0;
    state.avatar.vel = -8.0;
    tick(&mut state, &idle());
    assert!(state.phase.is_running());
}

#[test]
fn pilot_steering_moves_nearest_gap() {
    let mut state = start(6, GameMode::Pilot);
    state.stream.push_static(200.0, 100.0, GAP_HEIGHT, false);
    let input = TickInput {
        steer_y: Some(250.0),
        ..Default::default()
    };
    tick(&mut state, &input);
    assert_eq!(state.stream.obstacles[0].gap_top, 200.0);
}

/// Drive full sessions: restart after every game over
fn session(seed: u64, ticks: usize) -> (Vec<GameEvent>, Vec<(u32, f32)>) {
    let mut state = start(seed, GameMode::Adventure);
    let mut cues = Vec::new();
    let mut gaps = Vec::new();
    let mut seen = 0;

    for _ in 0..ticks {
        let input = match state.phase {
            GamePhase::MainMenu => TickInput {
                start: true,
                ..Default::default()
            },
            GamePhase::GameOver if state.submission_offered => TickInput {
                restart: true,
                ..Default::default()
            },
            _ => TickInput {
                idle_mode: true,
                ..Default::default()
            },
        };
        tick(&mut state, &input);

        for o in &state.stream.obstacles {
            if o.id > seen {
                seen = o.id;
                gaps.push((o.id, o.gap_top));
            }
        }
        for cue in state.drain_events() {
            if let GameEvent::EventEnded(_) = cue {
                // Every override reverted exactly
                assert_eq!(state.params, PhysicsParams::default());
                assert_eq!(state.avatar.size.x, AVATAR_WIDTH);
                assert_eq!(state.avatar.size.y, AVATAR_HEIGHT);
            }
            cues.push(cue);
        }
        let overlay_active = state.scheduler.active_kind() == Some(EventKind::SkyOverlay);
        assert_eq!(state.overlay.enabled, overlay_active);
    }
    (cues, gaps)
}

#[test]
fn long_sessions_are_reproducible() {
    let (cues_a, gaps_a) = session(77, 4000);
    let (cues_b, gaps_b) = session(77, 4000);
    assert_eq!(cues_a, cues_b);
    assert_eq!(gaps_a, gaps_b);
    assert!(!gaps_a.is_empty());
}

#[test]
fn events_alternate_start_and_end() {
    let (cues, _) = session(1234, 4000);
    let mut active = false;
    for cue in cues {
        match cue {
            GameEvent::EventStarted(_) => {
                assert!(!active, "two events active at once");
                active = true;
            }
            GameEvent::EventEnded(_) => {
                assert!(active);
                active = false;
            }
            _ => {}
        }
    }
}

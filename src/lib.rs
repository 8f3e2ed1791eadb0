//! Skyflap - A side-scrolling flappy arcade game with random events
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, events)
//! - `renderer`: Read-only render snapshots handed to a drawing backend
//! - `audio`: Fire-and-forget sound cues
//! - `platform`: Frame pacing and key mapping
//! - `persistence`: JSON load/save for the leaderboard and settings

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period (milliseconds of simulated time)
    pub const TICK_MS: u64 = 16;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 288.0;
    pub const PLAYFIELD_HEIGHT: f32 = 512.0;
    pub const GROUND_HEIGHT: f32 = 112.0;
    /// Top edge of the ground band
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - GROUND_HEIGHT;

    /// Avatar defaults
    pub const AVATAR_WIDTH: f32 = 34.0;
    pub const AVATAR_HEIGHT: f32 = 24.0;
    pub const AVATAR_START_X: f32 = 50.0;
    pub const AVATAR_START_Y: f32 = 200.0;
    /// Inset from sprite bounds to hitbox on every side
    pub const HITBOX_MARGIN: f32 = 5.0;
    pub const ANIMATION_FRAMES: u8 = 3;
    /// Running ticks between wing frames (advance when the timer exceeds this)
    pub const FRAME_TIMER_THRESHOLD: u32 = 5;
    pub const MENU_FRAME_TIMER_THRESHOLD: u32 = 10;
    pub const MENU_BOB_OFFSET: f32 = 5.0;

    /// Free-fall physics
    pub const GRAVITY: f32 = 0.5;
    pub const LIFT: f32 = -8.0;
    pub const ROTATION_UP: f32 = -25.0;
    pub const ROTATION_DOWN: f32 = 90.0;
    /// Nose-down ramp per falling tick (degrees)
    pub const TILT_RATE: f32 = 4.0;
    /// Per-tick blend factor for gravity/lift approaching their targets
    pub const GRAVITY_BLEND_RATE: f32 = 0.005;

    /// Low-gravity physics
    pub const LOW_GRAVITY: f32 = 0.07;
    pub const LOW_GRAVITY_LIFT: f32 = -3.0;
    pub const LOW_GRAVITY_GAP_HEIGHT: f32 = 120.0;
    /// Drift rotation target is drawn from [-RANGE, RANGE] degrees
    pub const DRIFT_ROTATION_RANGE: f32 = 45.0;
    pub const DRIFT_ROTATION_EASING: f32 = 0.02;
    pub const DRIFT_INITIAL_INTERVAL: u32 = 60;
    pub const DRIFT_INTERVAL_MIN: u32 = 30;
    pub const DRIFT_INTERVAL_MAX: u32 = 90;

    /// Pilot (autonomous) mode
    pub const PILOT_SPEED: f32 = 1.0;
    pub const PILOT_EASING: f32 = 0.2;
    pub const PILOT_INTERVAL_MIN: u32 = 250;
    pub const PILOT_INTERVAL_MAX: u32 = 350;

    /// Obstacle stream
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_SPEED: f32 = 2.0;
    pub const SPAWN_INTERVAL_MS: u64 = 1500;
    pub const GAP_HEIGHT: f32 = 100.0;
    /// Minimum distance between a gap and the playfield top or ground
    pub const GAP_MARGIN: f32 = 60.0;
    pub const SPECIAL_CHANCE: f64 = 0.2;
    pub const OSCILLATING_CHANCE: f64 = 0.5;
    pub const DOUBLE_OSCILLATING_CHANCE: f64 = 0.5;
    pub const OSCILLATING_GAP_HEIGHT: f32 = 150.0;
    pub const OSCILLATION_AMPLITUDE: f32 = 80.0;
    /// Radians per pixel of horizontal travel
    pub const OSCILLATION_FREQUENCY: f32 = 0.006;
    /// Extra horizontal spacing of the second oscillating obstacle in a wave
    pub const SECOND_OSCILLATING_GAP: f32 = 100.0;
    pub const POINTS_ORDINARY: u64 = 1;
    pub const POINTS_SPECIAL: u64 = 5;

    /// Event scheduler (seconds of simulated time)
    pub const EVENT_DURATION_MIN: f32 = 5.0;
    pub const EVENT_DURATION_MAX: f32 = 10.0;
    pub const EVENT_INTERVAL_MIN: f32 = 3.0;
    pub const EVENT_INTERVAL_MAX: f32 = 8.0;

    /// SizeChange factors
    pub const SIZE_FACTOR: f32 = 1.5;
    pub const SIZE_LIFT_FACTOR: f32 = 1.1;
    pub const SIZE_GRAVITY_FACTOR: f32 = 0.9;
    pub const SIZE_GAP_FACTOR: f32 = 1.5;

    /// SkyOverlay clouds
    pub const CLOUD_SPAWN_MIN_MS: u64 = 300;
    pub const CLOUD_SPAWN_MAX_MS: u64 = 600;
    pub const CLOUD_INTRO_MIN_S: f32 = 1.5;
    pub const CLOUD_INTRO_MAX_S: f32 = 3.0;
    pub const CLOUD_SPRITE_WIDTH: f32 = 96.0;
    pub const CLOUD_SPRITE_HEIGHT: f32 = 48.0;
    pub const GROUND_DARKENING_OPACITY: f32 = 0.35;

    /// Backdrop
    pub const BACKGROUND_SCROLL_SPEED: f32 = 0.5;
    pub const DAY_NIGHT_CYCLE_MS: u64 = 12_000;

    /// Delay between game over and the score submission offer
    pub const GAME_OVER_DELAY_MS: u64 = 2000;
}

/// Convert seconds of simulated time to milliseconds
#[inline]
pub fn secs_to_ms(secs: f32) -> u64 {
    (secs.max(0.0) * 1000.0).round() as u64
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w.max(0.0), h.max(0.0)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.min.x + margin,
            self.min.y + margin,
            self.size.x - 2.0 * margin,
            self.size.y - 2.0 * margin,
        )
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(50.0, 200.0, 34.0, 24.0).inset(5.0);
        assert_eq!(r.left(), 55.0);
        assert_eq!(r.top(), 205.0);
        assert_eq!(r.right(), 79.0);
        assert_eq!(r.bottom(), 219.0);
    }

    #[test]
    fn test_secs_to_ms() {
        assert_eq!(secs_to_ms(1.5), 1500);
        assert_eq!(secs_to_ms(-1.0), 0);
    }
}

//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`: entities, tunables that events
//! rewrite, the seeded RNG and the simulated clock.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Outcome;
use super::events::{EventKind, EventScheduler};
use super::kinematics::{PilotController, RotationDrift};
use super::obstacles::ObstacleStream;
use super::overlay::SkyOverlay;
use crate::Rect;
use crate::consts::*;

/// Which Running variant the player selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Player flaps through obstacles under gravity
    #[default]
    Adventure,
    /// Avatar flies itself; player steers obstacle gaps
    Pilot,
}

impl GameMode {
    pub fn toggled(self) -> Self {
        match self {
            GameMode::Adventure => GameMode::Pilot,
            GameMode::Pilot => GameMode::Adventure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Adventure => "Adventure",
            GameMode::Pilot => "Pilot",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adventure" => Some(GameMode::Adventure),
            "pilot" | "control" => Some(GameMode::Pilot),
            _ => None,
        }
    }
}

/// Top-level mode of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Avatar bobs; waiting for start
    MainMenu,
    /// Active gameplay
    Running(GameMode),
    /// Frozen; resumes into the carried mode
    Paused(GameMode),
    /// Run ended
    GameOver,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running(_))
    }
}

/// Avatar color variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Skin {
    #[default]
    Red,
    Blue,
    Yellow,
}

impl Skin {
    pub fn next(self) -> Self {
        match self {
            Skin::Red => Skin::Blue,
            Skin::Blue => Skin::Yellow,
            Skin::Yellow => Skin::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Red => "red",
            Skin::Blue => "blue",
            Skin::Yellow => "yellow",
        }
    }
}

/// Sprite frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub frame: u8,
    pub timer: u32,
}

impl Animation {
    pub fn advance(&mut self, threshold: u32) {
        self.timer += 1;
        if self.timer > threshold {
            self.timer = 0;
            self.frame = (self.frame + 1) % ANIMATION_FRAMES;
        }
    }
}

/// The player avatar. Only `pos.y` moves; `pos.x` is fixed for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left of the sprite bounds
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vel: f32,
    /// Degrees, positive is nose-down
    pub rotation: f32,
    /// Live gravity (blends toward the parameter target)
    pub gravity: f32,
    /// Live flap impulse (blends toward the parameter target)
    pub lift: f32,
    /// Sprite bounds
    pub size: Vec2,
    pub skin: Skin,
    pub animation: Animation,
    pub drift: RotationDrift,
    pub pilot: PilotController,
}

impl Avatar {
    pub fn new<R: Rng>(skin: Skin, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(AVATAR_START_X, AVATAR_START_Y),
            vel: 0.0,
            rotation: 0.0,
            gravity: GRAVITY,
            lift: LIFT,
            size: Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),
            skin,
            animation: Animation::default(),
            drift: RotationDrift::default(),
            pilot: PilotController::new(rng),
        }
    }

    /// Sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision box, inset from the sprite bounds
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(HITBOX_MARGIN)
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Fixed gap; `special` obstacles are rarer and worth more
    Static { special: bool },
    /// Gap follows a sinusoid of the obstacle's own x position
    Oscillating { base_top: f32, phase: f32 },
}

/// A pair of pipes with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Upper edge of the gap
    pub gap_top: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Scored; never reverts
    pub passed: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    pub fn is_special(&self) -> bool {
        matches!(self.kind, ObstacleKind::Static { special: true })
    }

    /// Points awarded for passing, before the multiplier
    pub fn points(&self) -> u64 {
        if self.is_special() {
            POINTS_SPECIAL
        } else {
            POINTS_ORDINARY
        }
    }

    /// Upper pipe: playfield top down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// Lower pipe: gap bottom down to the playfield bottom
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.width, PLAYFIELD_HEIGHT)
    }
}

/// Tunables that events override and revert
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub gravity_target: f32,
    pub lift_target: f32,
    /// Gap height for newly spawned static obstacles
    pub gap_height: f32,
    pub multiplier: u64,
    /// Selects the low-gravity rotation regime and suppresses the ceiling check
    pub low_gravity: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity_target: GRAVITY,
            lift_target: LIFT,
            gap_height: GAP_HEIGHT,
            multiplier: 1,
            low_gravity: false,
        }
    }
}

/// Scrolling ground, parallax background and the day/night crossfade
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Backdrop {
    pub ground_offset: f32,
    pub scroll_x: f32,
    pub night: bool,
    pub last_switch_ms: u64,
}

impl Backdrop {
    pub fn scroll_ground(&mut self) {
        self.ground_offset -= OBSTACLE_SPEED;
        if self.ground_offset <= -PLAYFIELD_WIDTH {
            self.ground_offset += PLAYFIELD_WIDTH;
        }
    }

    pub fn scroll_background(&mut self) {
        self.scroll_x -= BACKGROUND_SCROLL_SPEED;
        if self.scroll_x <= -PLAYFIELD_WIDTH {
            self.scroll_x = 0.0;
        }
    }

    pub fn update_cycle(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_switch_ms) > DAY_NIGHT_CYCLE_MS {
            self.night = !self.night;
            self.last_switch_ms = now_ms;
        }
    }

    /// Crossfade progress toward the current sky (0 = just switched, 1 = settled)
    pub fn fade(&self, now_ms: u64) -> f32 {
        (now_ms.saturating_sub(self.last_switch_ms) as f32 / DAY_NIGHT_CYCLE_MS as f32).min(1.0)
    }
}

/// Side effects for the audio/UI layers, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    Scored { points: u64, total: u64 },
    Hit,
    Died(Outcome),
    Swoosh,
    EventStarted(EventKind),
    EventEnded(EventKind),
    /// The game-over delay elapsed; the frontend may offer score submission
    SubmissionReady { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks advanced (not counting paused ticks)
    pub time_ticks: u64,
    /// Simulated clock; frozen while paused
    pub clock_ms: u64,
    pub phase: GamePhase,
    /// Mode the next run starts in
    pub selected_mode: GameMode,
    pub skin: Skin,
    pub score: u64,
    /// Clock value when the current run started
    pub run_started_ms: u64,
    pub avatar: Avatar,
    pub stream: ObstacleStream,
    pub params: PhysicsParams,
    pub scheduler: EventScheduler,
    pub overlay: SkyOverlay,
    pub backdrop: Backdrop,
    /// Draw hitboxes and allow manual event triggers
    pub debug_mode: bool,
    pub last_outcome: Outcome,
    pub game_over_at_ms: u64,
    pub submission_offered: bool,
    /// Pending cues (oldest first)
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the main menu
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let avatar = Avatar::new(Skin::default(), &mut rng);
        Self {
            seed,
            rng,
            time_ticks: 0,
            clock_ms: 0,
            phase: GamePhase::MainMenu,
            selected_mode: GameMode::default(),
            skin: Skin::default(),
            score: 0,
            run_started_ms: 0,
            avatar,
            stream: ObstacleStream::default(),
            params: PhysicsParams::default(),
            scheduler: EventScheduler::default(),
            overlay: SkyOverlay::default(),
            backdrop: Backdrop::default(),
            debug_mode: false,
            last_outcome: Outcome::None,
            game_over_at_ms: 0,
            submission_offered: false,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending cues
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the avatar with a fresh one in the current skin
    pub fn respawn_avatar(&mut self) {
        self.avatar = Avatar::new(self.skin, &mut self.rng);
    }

    /// Simulated time since the current run started
    pub fn run_elapsed_ms(&self) -> u64 {
        self.clock_ms.saturating_sub(self.run_started_ms)
    }

    /// Begin a run in `mode`
    pub fn start_run(&mut self, mode: GameMode) {
        self.phase = GamePhase::Running(mode);
        self.score = 0;
        self.run_started_ms = self.clock_ms;
        self.params = PhysicsParams::default();
        self.respawn_avatar();
        self.stream.reset(self.clock_ms);
        self.overlay.disable();
        self.scheduler.reset(self.clock_ms, &mut self.rng);
        self.last_outcome = Outcome::None;
        self.submission_offered = false;
        log::info!("Run started: mode={}, seed={}", mode.as_str(), self.seed);
    }

    /// Drop the finished run and return to the main menu
    pub fn reset_to_menu(&mut self) {
        self.phase = GamePhase::MainMenu;
        self.score = 0;
        self.params = PhysicsParams::default();
        self.respawn_avatar();
        self.stream.clear();
        self.overlay.disable();
        self.scheduler.deactivate();
        self.last_outcome = Outcome::None;
        self.submission_offered = false;
    }
}

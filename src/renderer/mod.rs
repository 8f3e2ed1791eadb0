//! Rendering seam
//!
//! The simulation never draws. Each frame the frontend builds a read-only
//! `RenderSnapshot` from the game state and hands it to a `Renderer`.

use glam::Vec2;
use serde::Serialize;

use crate::Rect;
use crate::sim::{
    CloudLayer, EventProgress, GameMode, GamePhase, GameState, ObstacleKind, Skin,
};

#[derive(Debug, Clone, Serialize)]
pub struct AvatarData {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub frame: u8,
    pub skin: Skin,
    /// Only filled in debug mode
    pub hitbox: Option<Rect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleData {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub special: bool,
    pub oscillating: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudData {
    pub pos: Vec2,
    pub size: Vec2,
    pub opacity: f32,
    pub layer: CloudLayer,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    /// Mode shown on the menu
    pub selected_mode: GameMode,
    pub score: u64,
    pub high_score: Option<u64>,
    pub avatar: AvatarData,
    pub obstacles: Vec<ObstacleData>,
    pub clouds: Vec<CloudData>,
    pub ground_offset: f32,
    pub background_scroll: f32,
    pub night: bool,
    /// Crossfade progress into the current sky
    pub sky_fade: f32,
    pub ground_darkening: f32,
    pub event_progress: EventProgress,
    pub debug_mode: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, high_score: Option<u64>) -> Self {
        let avatar = &state.avatar;
        let obstacles = state
            .stream
            .obstacles
            .iter()
            .map(|o| ObstacleData {
                x: o.x,
                width: o.width,
                gap_top: o.gap_top,
                gap_bottom: o.gap_bottom(),
                special: o.is_special(),
                oscillating: matches!(o.kind, ObstacleKind::Oscillating { .. }),
            })
            .collect();

        // Background layer first so it draws behind
        let clouds = state
            .overlay
            .background
            .iter()
            .chain(state.overlay.foreground.iter())
            .map(|c| CloudData {
                pos: c.pos,
                size: c.size,
                opacity: c.opacity,
                layer: c.layer,
            })
            .collect();

        Self {
            phase: state.phase,
            selected_mode: state.selected_mode,
            score: state.score,
            high_score,
            avatar: AvatarData {
                pos: avatar.pos,
                size: avatar.size,
                rotation: avatar.rotation,
                frame: avatar.animation.frame,
                skin: avatar.skin,
                hitbox: state.debug_mode.then(|| avatar.hitbox()),
            },
            obstacles,
            clouds,
            ground_offset: state.backdrop.ground_offset,
            background_scroll: state.backdrop.scroll_x,
            night: state.backdrop.night,
            sky_fade: state.backdrop.fade(state.clock_ms),
            ground_darkening: state.overlay.ground_darkening(),
            event_progress: state.scheduler.progress(state.clock_ms),
            debug_mode: state.debug_mode,
        }
    }
}

/// Drawing backend. Asset or surface problems are handled (and logged) inside.
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

/// Backend for headless runs: logs a summary line every `every` frames
#[derive(Debug)]
pub struct LogRenderer {
    pub every: u64,
    pub frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        log::debug!(
            "frame {}: {:?} score={} y={:.1} obstacles={} clouds={} events={:?}",
            self.frames,
            snapshot.phase,
            snapshot.score,
            snapshot.avatar.pos.y,
            snapshot.obstacles.len(),
            snapshot.clouds.len(),
            snapshot.event_progress
        );
    }
}

//! Obstacle stream: wave spawning, motion, scoring and retirement

use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Active obstacles in spawn order plus the wave cadence
#[derive(Debug, Clone, Default)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    /// Clock value at which the next wave spawns
    pub next_spawn_ms: u64,
    next_id: u32,
}

impl ObstacleStream {
    /// Clear and schedule the first wave one interval from `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.obstacles.clear();
        self.next_spawn_ms = now_ms + SPAWN_INTERVAL_MS;
    }

    /// Remove every in-flight obstacle, keeping the cadence
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    fn next_entity_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Add a fixed-gap obstacle at `x`
    pub fn push_static(&mut self, x: f32, gap_top: f32, gap_height: f32, special: bool) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_top,
            gap_height,
            width: OBSTACLE_WIDTH,
            passed: false,
            kind: ObstacleKind::Static { special },
        });
        id
    }

    /// Add an oscillating obstacle whose gap swings around `base_top`
    pub fn push_oscillating(&mut self, x: f32, base_top: f32, phase: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_top: base_top,
            gap_height: OSCILLATING_GAP_HEIGHT,
            width: OBSTACLE_WIDTH,
            passed: false,
            kind: ObstacleKind::Oscillating { base_top, phase },
        });
        id
    }

    /// Spawn one wave at the right edge. `gap_height` applies to static obstacles.
    pub fn spawn_wave<R: Rng>(&mut self, rng: &mut R, gap_height: f32) {
        if rng.random_bool(OSCILLATING_CHANCE) {
            let top = random_gap_top(rng, OSCILLATING_GAP_HEIGHT);
            let phase = rng.random_range(0.0..TAU);
            self.push_oscillating(PLAYFIELD_WIDTH, top, phase);

            if rng.random_bool(DOUBLE_OSCILLATING_CHANCE) {
                let top = random_gap_top(rng, OSCILLATING_GAP_HEIGHT);
                let phase = rng.random_range(0.0..TAU);
                let x = PLAYFIELD_WIDTH + OBSTACLE_WIDTH + SECOND_OSCILLATING_GAP;
                self.push_oscillating(x, top, phase);
                log::debug!("Wave: two oscillating obstacles");
            } else {
                log::debug!("Wave: one oscillating obstacle");
            }
        } else {
            let top = random_gap_top(rng, gap_height);
            let special = rng.random_bool(SPECIAL_CHANCE);
            self.push_static(PLAYFIELD_WIDTH, top, gap_height, special);
            log::debug!("Wave: static obstacle (gap_top={top}, special={special})");
        }
    }

    /// Fire the wave timer if due. Returns true when a wave spawned.
    pub fn update_spawn<R: Rng>(&mut self, now_ms: u64, rng: &mut R, gap_height: f32) -> bool {
        if now_ms < self.next_spawn_ms {
            return false;
        }
        self.spawn_wave(rng, gap_height);
        self.next_spawn_ms = now_ms + SPAWN_INTERVAL_MS;
        true
    }

    /// Advance every obstacle, score those the avatar just passed, and retire
    /// those fully off-screen. Returns the award of each newly scored obstacle.
    pub fn advance_all(&mut self, avatar_x: f32, multiplier: u64) -> Vec<u64> {
        let mut awards = Vec::new();
        for obstacle in &mut self.obstacles {
            advance(obstacle);

            if !obstacle.passed && obstacle.x <= avatar_x {
                obstacle.passed = true;
                awards.push(obstacle.points() * multiplier);
            }
        }
        self.obstacles.retain(|o| o.x + o.width >= 0.0);
        awards
    }

    /// Pilot-mode steering: move the gap of the nearest obstacle still ahead
    /// of the avatar so it is centered on `pointer_y`.
    pub fn steer_nearest(&mut self, avatar_x: f32, pointer_y: f32) {
        let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.x >= avatar_x) else {
            return;
        };
        let max_top = (GROUND_Y - obstacle.gap_height - GAP_MARGIN).max(GAP_MARGIN);
        let top = (pointer_y - obstacle.gap_height / 2.0).clamp(GAP_MARGIN, max_top);

        if let ObstacleKind::Oscillating { base_top, .. } = &mut obstacle.kind {
            *base_top += top - obstacle.gap_top;
        }
        obstacle.gap_top = top;
    }
}

/// Uniform whole-pixel gap top inside the band that keeps the gap clear of
/// the playfield top and the ground
fn random_gap_top<R: Rng>(rng: &mut R, gap_height: f32) -> f32 {
    let min = GAP_MARGIN as i32;
    let max = ((GROUND_Y - gap_height - GAP_MARGIN) as i32).max(min);
    rng.random_range(min..=max) as f32
}

/// Move one obstacle a tick to the left; oscillating gaps follow their sinusoid
pub fn advance(obstacle: &mut Obstacle) {
    obstacle.x -= OBSTACLE_SPEED;
    if let ObstacleKind::Oscillating { base_top, phase } = obstacle.kind {
        obstacle.gap_top = oscillation_top(base_top, phase, obstacle.x);
    }
}

/// Gap top of an oscillating obstacle at horizontal position `x`
#[inline]
pub fn oscillation_top(base_top: f32, phase: f32, x: f32) -> f32 {
    base_top + (OSCILLATION_FREQUENCY * (x + phase)).sin() * OSCILLATION_AMPLITUDE
}

//! Sky overlay: decorative clouds drifting over and behind the playfield
//!
//! Visual only. Nothing here feeds back into collisions or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::secs_to_ms;

/// Draw order relative to pipes and avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudLayer {
    /// Behind pipes; rises in from the bottom edge
    Background,
    /// In front of the avatar; fades in place
    Foreground,
}

#[derive(Debug, Clone, Copy)]
pub struct CloudConfig {
    pub layer: CloudLayer,
    pub speed_factor: f32,
    pub size_factor: f32,
    pub opacity: f32,
}

pub const CLOUD_CONFIGS: [CloudConfig; 4] = [
    CloudConfig {
        layer: CloudLayer::Background,
        speed_factor: 0.5,
        size_factor: 0.8,
        opacity: 0.6,
    },
    CloudConfig {
        layer: CloudLayer::Background,
        speed_factor: 0.7,
        size_factor: 1.0,
        opacity: 0.7,
    },
    CloudConfig {
        layer: CloudLayer::Background,
        speed_factor: 0.9,
        size_factor: 1.2,
        opacity: 0.8,
    },
    CloudConfig {
        layer: CloudLayer::Foreground,
        speed_factor: 0.3,
        size_factor: 1.5,
        opacity: 0.9,
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
    pub layer: CloudLayer,
    /// Pixels per tick once the intro finished
    pub speed: f32,
    pub opacity: f32,
    pub base_opacity: f32,
    start_y: f32,
    target_y: f32,
    born_ms: u64,
    intro_ms: u64,
    pub animating: bool,
}

impl Cloud {
    fn new(config: &CloudConfig, y: f32, intro_ms: u64, now_ms: u64) -> Self {
        let (start_y, opacity) = match config.layer {
            CloudLayer::Background => (PLAYFIELD_HEIGHT, config.opacity),
            CloudLayer::Foreground => (y, 0.0),
        };
        Self {
            pos: Vec2::new(PLAYFIELD_WIDTH, start_y),
            size: Vec2::new(CLOUD_SPRITE_WIDTH, CLOUD_SPRITE_HEIGHT) * config.size_factor,
            layer: config.layer,
            speed: config.speed_factor * OBSTACLE_SPEED,
            opacity,
            base_opacity: config.opacity,
            start_y,
            target_y: y,
            born_ms: now_ms,
            intro_ms: intro_ms.max(1),
            animating: true,
        }
    }

    /// Intro easing first, then a steady drift to the left
    pub fn update(&mut self, now_ms: u64) {
        if !self.animating {
            self.pos.x -= self.speed;
            return;
        }

        let progress =
            (now_ms.saturating_sub(self.born_ms) as f32 / self.intro_ms as f32).min(1.0);
        let eased = 1.0 - (1.0 - progress).powi(2);
        match self.layer {
            CloudLayer::Background => {
                self.pos.y = self.start_y + (self.target_y - self.start_y) * eased;
            }
            CloudLayer::Foreground => {
                self.opacity = self.base_opacity * eased;
            }
        }
        if progress >= 1.0 {
            self.animating = false;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Cloud spawner and the ground-darkening flag
#[derive(Debug, Clone, Default)]
pub struct SkyOverlay {
    pub enabled: bool,
    pub interval_ms: u64,
    pub next_spawn_ms: u64,
    pub background: Vec<Cloud>,
    pub foreground: Vec<Cloud>,
}

impl SkyOverlay {
    /// Start spawning on a freshly drawn interval
    pub fn enable<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        self.enabled = true;
        self.interval_ms = rng.random_range(CLOUD_SPAWN_MIN_MS..=CLOUD_SPAWN_MAX_MS);
        self.next_spawn_ms = now_ms + self.interval_ms;
        self.background.clear();
        self.foreground.clear();
    }

    /// Stop spawning and drop every cloud
    pub fn disable(&mut self) {
        self.enabled = false;
        self.background.clear();
        self.foreground.clear();
    }

    /// Ground is drawn darker while the overlay runs
    pub fn ground_darkening(&self) -> f32 {
        if self.enabled {
            GROUND_DARKENING_OPACITY
        } else {
            0.0
        }
    }

    pub fn cloud_count(&self) -> usize {
        self.background.len() + self.foreground.len()
    }

    pub fn spawn_cloud<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        let config = CLOUD_CONFIGS[rng.random_range(0..CLOUD_CONFIGS.len())];
        let y = rng.random_range(0..=(PLAYFIELD_HEIGHT as i32 / 2)) as f32;
        let intro = secs_to_ms(rng.random_range(CLOUD_INTRO_MIN_S..=CLOUD_INTRO_MAX_S));
        let cloud = Cloud::new(&config, y, intro, now_ms);
        match config.layer {
            CloudLayer::Background => self.background.push(cloud),
            CloudLayer::Foreground => self.foreground.push(cloud),
        }
    }

    /// One tick: fire the spawn timer if due, move clouds, retire the gone
    pub fn update<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        if !self.enabled {
            return;
        }

        if now_ms >= self.next_spawn_ms {
            self.spawn_cloud(now_ms, rng);
            self.next_spawn_ms = now_ms + self.interval_ms;
        }

        for cloud in self.background.iter_mut().chain(self.foreground.iter_mut()) {
            cloud.update(now_ms);
        }
        self.background.retain(|c| !c.is_off_screen());
        self.foreground.retain(|c| !c.is_off_screen());
    }
}

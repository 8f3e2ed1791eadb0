//! Avatar kinematics
//!
//! One call per fixed tick, no variable dt. Three regimes share the avatar:
//! free-fall (default), low-gravity drift, and the autonomous pilot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Avatar, GameMode, PhysicsParams};
use crate::consts::*;

/// Which control law drives the avatar this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Gravity accumulation, rotation tied to vertical velocity
    FreeFall,
    /// Gravity accumulation, rotation drifts toward random targets
    LowGravity,
    /// No physics; velocity eases toward a flipping target speed
    Pilot,
}

impl Regime {
    pub fn select(mode: GameMode, params: &PhysicsParams) -> Self {
        match mode {
            GameMode::Pilot => Regime::Pilot,
            GameMode::Adventure if params.low_gravity => Regime::LowGravity,
            GameMode::Adventure => Regime::FreeFall,
        }
    }
}

/// Periodically resampled rotation target used under low gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationDrift {
    pub target: f32,
    pub timer: u32,
    pub interval: u32,
}

impl Default for RotationDrift {
    fn default() -> Self {
        Self {
            target: 0.0,
            timer: 0,
            interval: DRIFT_INITIAL_INTERVAL,
        }
    }
}

impl RotationDrift {
    /// Draw a fresh target angle without touching the countdown
    pub fn retarget<R: Rng>(&mut self, rng: &mut R) {
        self.target = rng.random_range(-DRIFT_ROTATION_RANGE..=DRIFT_ROTATION_RANGE);
    }

    /// Advance the countdown and return the eased rotation
    pub fn step<R: Rng>(&mut self, rotation: f32, rng: &mut R) -> f32 {
        self.timer += 1;
        if self.timer >= self.interval {
            self.retarget(rng);
            self.timer = 0;
            self.interval = rng.random_range(DRIFT_INTERVAL_MIN..=DRIFT_INTERVAL_MAX);
        }
        rotation + (self.target - rotation) * DRIFT_ROTATION_EASING
    }
}

/// Autonomous vertical motion used in pilot mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PilotController {
    pub vel: f32,
    pub target_vel: f32,
    pub timer: u32,
    pub interval: u32,
}

impl PilotController {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            vel: 0.0,
            target_vel: 0.0,
            timer: 0,
            interval: rng.random_range(PILOT_INTERVAL_MIN..=PILOT_INTERVAL_MAX),
        }
    }

    /// Advance one tick and return the new top edge `y` of a body of `height`.
    ///
    /// The body reflects off the playfield top and the ground: position is
    /// clamped and the target speed is pointed back into the playfield.
    pub fn step<R: Rng>(&mut self, y: f32, height: f32, rng: &mut R) -> f32 {
        self.timer += 1;
        if self.timer >= self.interval {
            self.target_vel = if rng.random_bool(0.5) {
                PILOT_SPEED
            } else {
                -PILOT_SPEED
            };
            self.timer = 0;
            self.interval = rng.random_range(PILOT_INTERVAL_MIN..=PILOT_INTERVAL_MAX);
        }

        self.vel += (self.target_vel - self.vel) * PILOT_EASING;
        let mut y = y + self.vel;

        if y < 0.0 {
            y = 0.0;
            self.target_vel = PILOT_SPEED;
        } else if y + height > GROUND_Y {
            y = GROUND_Y - height;
            self.target_vel = -PILOT_SPEED;
        }
        y
    }
}

/// Move `current` toward `target` by a fixed fraction, snapping when close
#[inline]
fn approach(current: f32, target: f32) -> f32 {
    let diff = target - current;
    if diff.abs() > GRAVITY_BLEND_RATE {
        current + diff * GRAVITY_BLEND_RATE
    } else {
        target
    }
}

/// Blend the avatar's live gravity and lift toward the parameter targets
pub fn blend_toward_targets(avatar: &mut Avatar, params: &PhysicsParams) {
    avatar.gravity = approach(avatar.gravity, params.gravity_target);
    avatar.lift = approach(avatar.lift, params.lift_target);
}

/// Advance the avatar by one tick under `regime`
pub fn integrate<R: Rng>(avatar: &mut Avatar, regime: Regime, rng: &mut R) {
    match regime {
        Regime::FreeFall | Regime::LowGravity => {
            // Velocity first, then position from the updated velocity
            avatar.vel += avatar.gravity;
            avatar.pos.y += avatar.vel;

            if regime == Regime::LowGravity {
                avatar.rotation = avatar.drift.step(avatar.rotation, rng);
            } else if avatar.vel > 0.0 {
                avatar.rotation = (avatar.rotation + TILT_RATE).min(ROTATION_DOWN);
            } else {
                avatar.rotation = ROTATION_UP;
            }
        }
        Regime::Pilot => {
            avatar.pos.y = avatar.pilot.step(avatar.pos.y, avatar.size.y, rng);
        }
    }

    avatar.animation.advance(FRAME_TIMER_THRESHOLD);
}

/// Impulse: instant upward velocity and nose-up snap
pub fn flap(avatar: &mut Avatar) {
    avatar.vel = avatar.lift;
    avatar.rotation = ROTATION_UP;
}

/// Idle bob shown on the main menu
pub fn menu_bob(avatar: &mut Avatar) {
    avatar.pos.y = AVATAR_START_Y + MENU_BOB_OFFSET * f32::from(avatar.animation.frame % 2);
    avatar.animation.advance(MENU_FRAME_TIMER_THRESHOLD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Skin;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn avatar(rng: &mut Pcg32) -> Avatar {
        Avatar::new(Skin::Red, rng)
    }

    #[test]
    fn test_free_fall_integration() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = avatar(&mut rng);
        let y0 = a.pos.y;

        integrate(&mut a, Regime::FreeFall, &mut rng);
        assert_eq!(a.vel, GRAVITY);
        assert_eq!(a.pos.y, y0 + GRAVITY);
        // Falling tilts the nose down
        assert_eq!(a.rotation, TILT_RATE);
    }

    #[test]
    fn test_flap_sets_lift_and_nose_up() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut a = avatar(&mut rng);
        a.vel = 6.0;
        a.rotation = 70.0;

        flap(&mut a);
        assert_eq!(a.vel, LIFT);
        assert_eq!(a.rotation, ROTATION_UP);

        // Still rising after one tick: rotation stays nose-up
        integrate(&mut a, Regime::FreeFall, &mut rng);
        assert!(a.vel < 0.0);
        assert_eq!(a.rotation, ROTATION_UP);
    }

    #[test]
    fn test_tilt_caps_at_nose_down() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut a = avatar(&mut rng);
        for _ in 0..60 {
            integrate(&mut a, Regime::FreeFall, &mut rng);
        }
        assert_eq!(a.rotation, ROTATION_DOWN);
    }

    #[test]
    fn test_drift_eases_toward_target() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut drift = RotationDrift {
            target: 40.0,
            timer: 0,
            interval: 1000,
        };
        let r = drift.step(0.0, &mut rng);
        assert!((r - 40.0 * DRIFT_ROTATION_EASING).abs() < 1e-6);
    }

    #[test]
    fn test_drift_resamples_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut drift = RotationDrift::default();
        let mut rotation = 0.0;
        for _ in 0..1000 {
            rotation = drift.step(rotation, &mut rng);
            assert!(drift.target.abs() <= DRIFT_ROTATION_RANGE);
            assert!((DRIFT_INTERVAL_MIN..=DRIFT_INTERVAL_MAX).contains(&drift.interval));
        }
        assert!(rotation.abs() <= DRIFT_ROTATION_RANGE);
    }

    #[test]
    fn test_pilot_reflects_at_bounds() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut pilot = PilotController::new(&mut rng);
        pilot.target_vel = -PILOT_SPEED;
        pilot.vel = -PILOT_SPEED;

        let y = pilot.step(0.5, AVATAR_HEIGHT, &mut rng);
        assert_eq!(y, 0.0);
        assert_eq!(pilot.target_vel, PILOT_SPEED);

        pilot.target_vel = PILOT_SPEED;
        pilot.vel = PILOT_SPEED;
        let y = pilot.step(GROUND_Y - AVATAR_HEIGHT, AVATAR_HEIGHT, &mut rng);
        assert_eq!(y, GROUND_Y - AVATAR_HEIGHT);
        assert_eq!(pilot.target_vel, -PILOT_SPEED);
    }

    #[test]
    fn test_pilot_stays_inside_playfield() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut a = avatar(&mut rng);
        for _ in 0..5000 {
            integrate(&mut a, Regime::Pilot, &mut rng);
            assert!(a.pos.y >= 0.0);
            assert!(a.pos.y + a.size.y <= GROUND_Y);
        }
    }

    #[test]
    fn test_blend_is_gradual_then_snaps() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut a = avatar(&mut rng);
        let params = PhysicsParams {
            gravity_target: LOW_GRAVITY,
            lift_target: LOW_GRAVITY_LIFT,
            ..PhysicsParams::default()
        };

        let before = a.gravity;
        blend_toward_targets(&mut a, &params);
        let step = (before - a.gravity).abs();
        assert!(step <= (GRAVITY - LOW_GRAVITY) * GRAVITY_BLEND_RATE + 1e-6);

        for _ in 0..5000 {
            blend_toward_targets(&mut a, &params);
        }
        assert_eq!(a.gravity, LOW_GRAVITY);
        assert_eq!(a.lift, LOW_GRAVITY_LIFT);
    }

    #[test]
    fn test_regime_selection() {
        let mut params = PhysicsParams::default();
        assert_eq!(Regime::select(GameMode::Adventure, &params), Regime::FreeFall);
        assert_eq!(Regime::select(GameMode::Pilot, &params), Regime::Pilot);
        params.low_gravity = true;
        assert_eq!(Regime::select(GameMode::Adventure, &params), Regime::LowGravity);
        assert_eq!(Regime::select(GameMode::Pilot, &params), Regime::Pilot);
    }

    #[test]
    fn test_menu_bob_alternates() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut a = avatar(&mut rng);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..40 {
            menu_bob(&mut a);
            seen.insert(a.pos.y as i32);
        }
        assert!(seen.contains(&(AVATAR_START_Y as i32)));
        assert!(seen.contains(&((AVATAR_START_Y + MENU_BOB_OFFSET) as i32)));
    }
}

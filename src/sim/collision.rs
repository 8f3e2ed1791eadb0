//! Collision detection between the avatar hitbox and the world
//!
//! Everything is an axis-aligned rectangle: the inset avatar hitbox, the ground
//! band, and the two pipes of each obstacle.

use serde::{Deserialize, Serialize};

use super::kinematics::Regime;
use super::state::{Avatar, Obstacle};
use crate::Rect;
use crate::consts::*;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    None,
    GroundHit,
    CeilingExit,
    ObstacleHit,
}

impl Outcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Outcome::None)
    }

    /// Impacts play the hit cue before the death cue; leaving the top does not
    pub fn is_impact(&self) -> bool {
        matches!(self, Outcome::GroundHit | Outcome::ObstacleHit)
    }
}

/// The ground band at the bottom of the playfield
pub fn ground_rect() -> Rect {
    Rect::new(0.0, GROUND_Y, PLAYFIELD_WIDTH, GROUND_HEIGHT)
}

/// Check whether the avatar hitbox reached the ground band
#[inline]
pub fn hits_ground(hitbox: &Rect) -> bool {
    hitbox.bottom() >= ground_rect().top()
}

/// Check whether the avatar has left through the top edge
#[inline]
pub fn exits_ceiling(avatar: &Avatar) -> bool {
    avatar.pos.y <= 0.0
}

/// Check whether the avatar hitbox overlaps either pipe of `obstacle`
pub fn hits_obstacle(hitbox: &Rect, obstacle: &Obstacle) -> bool {
    hitbox.intersects(&obstacle.top_rect()) || hitbox.intersects(&obstacle.bottom_rect())
}

/// Run every check in order: ground, ceiling, obstacles in stream order.
///
/// The ceiling is only checked under free-fall; low gravity and pilot motion
/// are allowed to graze the top edge.
pub fn check(avatar: &Avatar, regime: Regime, obstacles: &[Obstacle]) -> Outcome {
    let hitbox = avatar.hitbox();

    if hits_ground(&hitbox) {
        return Outcome::GroundHit;
    }

    if regime == Regime::FreeFall && exits_ceiling(avatar) {
        return Outcome::CeilingExit;
    }

    if obstacles.iter().any(|o| hits_obstacle(&hitbox, o)) {
        return Outcome::ObstacleHit;
    }

    Outcome::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleKind, Skin};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn avatar_at(y: f32) -> Avatar {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut a = Avatar::new(Skin::Red, &mut rng);
        a.pos.y = y;
        a
    }

    fn obstacle(x: f32, gap_top: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top,
            gap_height: GAP_HEIGHT,
            width: OBSTACLE_WIDTH,
            passed: false,
            kind: ObstacleKind::Static { special: false },
        }
    }

    #[test]
    fn test_clear_air() {
        let a = avatar_at(200.0);
        assert_eq!(check(&a, Regime::FreeFall, &[]), Outcome::None);
    }

    #[test]
    fn test_ground_hit_in_every_regime() {
        // Hitbox bottom exactly on the ground line
        let a = avatar_at(GROUND_Y - AVATAR_HEIGHT + HITBOX_MARGIN);
        for regime in [Regime::FreeFall, Regime::LowGravity, Regime::Pilot] {
            assert_eq!(check(&a, regime, &[]), Outcome::GroundHit);
        }
    }

    #[test]
    fn test_ceiling_only_under_free_fall() {
        let a = avatar_at(-1.0);
        assert_eq!(check(&a, Regime::FreeFall, &[]), Outcome::CeilingExit);
        assert_eq!(check(&a, Regime::LowGravity, &[]), Outcome::None);
        assert_eq!(check(&a, Regime::Pilot, &[]), Outcome::None);
    }

    #[test]
    fn test_obstacle_top_and_bottom() {
        let x = AVATAR_START_X;
        // Avatar at 200..224, hitbox 205..219
        let a = avatar_at(200.0);

        // Gap 150..250 contains the hitbox
        assert_eq!(check(&a, Regime::FreeFall, &[obstacle(x, 150.0)]), Outcome::None);
        // Gap 210..310: top pipe overlaps
        assert_eq!(
            check(&a, Regime::FreeFall, &[obstacle(x, 210.0)]),
            Outcome::ObstacleHit
        );
        // Gap 100..200: bottom pipe overlaps
        assert_eq!(
            check(&a, Regime::FreeFall, &[obstacle(x, 100.0)]),
            Outcome::ObstacleHit
        );
    }

    #[test]
    fn test_obstacle_out_of_reach_horizontally() {
        let a = avatar_at(200.0);
        let far = obstacle(200.0, 10.0);
        assert_eq!(check(&a, Regime::FreeFall, &[far]), Outcome::None);
    }

    #[test]
    fn test_ground_reported_before_obstacle() {
        let a = avatar_at(GROUND_Y);
        let o = obstacle(AVATAR_START_X, 60.0);
        assert_eq!(check(&a, Regime::FreeFall, &[o]), Outcome::GroundHit);
    }

    #[test]
    fn test_outcome_flags() {
        assert!(!Outcome::None.is_hit());
        assert!(Outcome::CeilingExit.is_hit());
        assert!(!Outcome::CeilingExit.is_impact());
        assert!(Outcome::ObstacleHit.is_impact());
    }
}

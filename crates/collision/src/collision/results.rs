//! Query inputs and results for the collision world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::ground::GroundResult;
use super::shape::{ShapeId, ShapeKind};

/// Dimensions of an upright body (player or NPC).
///
/// Positions passed alongside a body are its bottom-center (the feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Horizontal half-width.
    pub radius: f32,
    /// Total height from feet to head.
    pub height: f32,
}

impl Body {
    /// The player's standing body.
    pub const PLAYER: Self = Self {
        radius: 0.3,
        height: 1.7,
    };

    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Half-size in each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.height * 0.5, self.radius)
    }

    /// Bounding box of the body standing at `feet`.
    #[inline]
    pub fn aabb_at(&self, feet: Vec3) -> Aabb {
        Aabb::from_feet(feet, self.radius, self.height)
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::PLAYER
    }
}

/// A raycast that struck a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,

    /// World position of the hit.
    pub point: Vec3,

    /// Outward normal of the face that was struck.
    pub normal: Vec3,

    pub shape: ShapeId,

    pub kind: ShapeKind,
}

/// Outcome of one movement resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether anything altered the requested motion.
    pub collided: bool,

    /// Resolved feet position.
    pub position: Vec3,

    /// Velocity for the next tick, with the contact axis zeroed.
    pub velocity: Vec3,

    /// Correction relative to the unobstructed target
    /// (`position - (start + velocity)`).
    pub push_out: Vec3,

    /// Fraction of the tick travelled before first contact (`1.0` = none).
    pub time_of_impact: f32,

    /// Normal of the first blocking contact.
    pub hit_normal: Option<Vec3>,

    /// Shape that blocked or pushed the body.
    pub hit_shape: Option<ShapeId>,

    /// Footing at the resolved position.
    pub ground: GroundResult,
}

impl MoveResult {
    /// A move that went the full distance untouched.
    pub fn unobstructed(position: Vec3, velocity: Vec3, ground: GroundResult) -> Self {
        Self {
            collided: false,
            position,
            velocity,
            push_out: Vec3::ZERO,
            time_of_impact: 1.0,
            hit_normal: None,
            hit_shape: None,
            ground,
        }
    }

    /// Check if a blocking contact stopped part of the motion.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.time_of_impact < 1.0 || self.hit_normal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_aabb() {
        let body = Body::new(0.5, 2.0);
        let aabb = body.aabb_at(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(aabb.min, Vec3::new(0.5, 0.0, -0.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.0, 0.5));
        assert_eq!(aabb.half_extents(), body.half_extents());
    }

    #[test]
    fn test_unobstructed_move() {
        let result = MoveResult::unobstructed(Vec3::X, Vec3::Z, GroundResult::AIRBORNE);
        assert!(!result.collided);
        assert!(!result.hit_something());
        assert_eq!(result.time_of_impact, 1.0);
        assert_eq!(result.push_out, Vec3::ZERO);
    }
}

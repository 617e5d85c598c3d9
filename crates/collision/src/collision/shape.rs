//! Collision shapes stored in the world.
//!
//! A shape is an [`Aabb`] plus gameplay classification: what kind of
//! surface it is, which layers it lives on, and whether it stops bodies,
//! bullets, or both. Ramp data only exists on the ramp variant.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, Axis};
use super::flags::CollisionLayer;

/// Handle to a shape in a [`CollisionWorld`](super::CollisionWorld).
///
/// The generation is bumped whenever a slot is freed, so an id held after
/// its shape was removed never resolves to the shape that reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId {
    index: u32,
    generation: u32,
}

impl ShapeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the shape table.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Pack into a single integer (generation in the high half).
    #[inline]
    pub fn to_bits(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Horizontal axis a ramp slopes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampAxis {
    X,
    Z,
}

impl From<RampAxis> for Axis {
    fn from(axis: RampAxis) -> Self {
        match axis {
            RampAxis::X => Axis::X,
            RampAxis::Z => Axis::Z,
        }
    }
}

/// Which end of the ramp's bounds `start_y` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlopeDirection {
    /// `start_y` at the min edge of the slope axis, `end_y` at the max edge.
    Positive,
    /// `start_y` at the max edge of the slope axis, `end_y` at the min edge.
    Negative,
}

/// Surface profile of a ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampProfile {
    pub start_y: f32,
    pub end_y: f32,
    pub axis: RampAxis,
    pub direction: SlopeDirection,
}

impl RampProfile {
    pub fn new(start_y: f32, end_y: f32, axis: RampAxis, direction: SlopeDirection) -> Self {
        Self {
            start_y,
            end_y,
            axis,
            direction,
        }
    }

    #[inline]
    pub fn low_y(&self) -> f32 {
        self.start_y.min(self.end_y)
    }

    #[inline]
    pub fn high_y(&self) -> f32 {
        self.start_y.max(self.end_y)
    }

    /// Surface height at `(x, z)`, linearly interpolated along the slope
    /// axis. Positions beyond the ramp's extent clamp to its ends.
    pub fn height_at(&self, bounds: &Aabb, x: f32, z: f32) -> f32 {
        let (lo, hi, p) = match self.axis {
            RampAxis::X => (bounds.min.x, bounds.max.x, x),
            RampAxis::Z => (bounds.min.z, bounds.max.z, z),
        };

        let length = hi - lo;
        if length <= 0.0 {
            return self.start_y;
        }

        let mut t = ((p - lo) / length).clamp(0.0, 1.0);
        if self.direction == SlopeDirection::Negative {
            t = 1.0 - t;
        }

        self.start_y + (self.end_y - self.start_y) * t
    }
}

/// What kind of surface a shape is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Solid wall. Blocks movement and shots.
    Wall,
    /// Elevated surface you can stand on; blocks from the sides.
    Platform,
    /// Sloped walkable surface. Does not block movement so bodies can walk
    /// up it; ground checks follow the slope.
    Ramp(RampProfile),
    /// Base ground level.
    Floor,
    /// Non-solid volume that only reports overlaps.
    Trigger,
}

impl ShapeKind {
    #[inline]
    pub fn is_ramp(&self) -> bool {
        matches!(self, Self::Ramp(_))
    }

    /// Default `(blocks_movement, blocks_projectiles)` for this kind.
    pub fn default_blocking(&self) -> (bool, bool) {
        match self {
            Self::Wall | Self::Platform | Self::Floor => (true, true),
            Self::Ramp(_) => (false, true),
            Self::Trigger => (false, false),
        }
    }
}

/// A piece of static collision geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    pub id: ShapeId,
    pub bounds: Aabb,
    pub kind: ShapeKind,
    pub layer: CollisionLayer,
    /// Bodies can stand on the top surface.
    pub walkable: bool,
    pub blocks_movement: bool,
    pub blocks_projectiles: bool,
    /// Debug label.
    pub name: String,
}

impl CollisionShape {
    /// Create a shape on the world layer with the kind's default blocking.
    pub fn new(id: ShapeId, bounds: Aabb, kind: ShapeKind, walkable: bool, name: &str) -> Self {
        let (blocks_movement, blocks_projectiles) = kind.default_blocking();
        Self {
            id,
            bounds,
            kind,
            layer: CollisionLayer::WORLD,
            walkable,
            blocks_movement,
            blocks_projectiles,
            name: name.to_owned(),
        }
    }

    /// Height of the walkable surface above `(x, z)`.
    pub fn surface_y_at(&self, x: f32, z: f32) -> f32 {
        match &self.kind {
            ShapeKind::Ramp(profile) => profile.height_at(&self.bounds, x, z),
            _ => self.bounds.max.y,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_bounds() -> Aabb {
        Aabb::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0))
    }

    #[test]
    fn test_ramp_height_positive() {
        let ramp = RampProfile::new(0.0, 2.0, RampAxis::X, SlopeDirection::Positive);
        let bounds = ramp_bounds();

        assert_eq!(ramp.height_at(&bounds, 0.0, 0.0), 0.0);
        assert_eq!(ramp.height_at(&bounds, 2.0, 0.0), 1.0);
        assert_eq!(ramp.height_at(&bounds, 4.0, 0.0), 2.0);
        // Clamped beyond the ends.
        assert_eq!(ramp.height_at(&bounds, 6.0, 0.0), 2.0);
        assert_eq!(ramp.height_at(&bounds, -1.0, 0.0), 0.0);
    }

    #[test]
    fn test_ramp_height_negative() {
        let ramp = RampProfile::new(0.0, 2.0, RampAxis::X, SlopeDirection::Negative);
        let bounds = ramp_bounds();

        assert_eq!(ramp.height_at(&bounds, 4.0, 0.0), 0.0);
        assert_eq!(ramp.height_at(&bounds, 1.0, 0.0), 1.5);
    }

    #[test]
    fn test_ramp_along_z() {
        let ramp = RampProfile::new(1.0, 3.0, RampAxis::Z, SlopeDirection::Positive);
        let bounds = ramp_bounds();
        assert_eq!(ramp.height_at(&bounds, 3.0, 0.0), 2.0);
    }

    #[test]
    fn test_shape_id_bits() {
        let id = ShapeId::new(17, 3);
        assert_eq!(ShapeId::from_bits(id.to_bits()), id);
        assert_eq!(id.to_string(), "17v3");
        assert_ne!(ShapeId::new(17, 4), id);
    }

    #[test]
    fn test_default_blocking() {
        let wall =
            CollisionShape::new(ShapeId::new(0, 0), ramp_bounds(), ShapeKind::Wall, false, "wall");
        assert!(wall.blocks_movement && wall.blocks_projectiles);

        let ramp =
            ShapeKind::Ramp(RampProfile::new(0.0, 1.0, RampAxis::X, SlopeDirection::Positive));
        assert_eq!(ramp.default_blocking(), (false, true));
        assert_eq!(ShapeKind::Trigger.default_blocking(), (false, false));
    }
}

//! Axis-aligned boxes and the primitive tests built on them.
//!
//! Everything in the collision world is an [`Aabb`]. The free functions here
//! are the building blocks for raycasts, sweeps and depenetration:
//!
//! - [`ray_intersect_aabb`]: slab test for hit-scan rays
//! - [`aabb_overlap`]: inclusive interval overlap on all three axes
//! - [`aabb_penetration`]: per-axis push-out for boxes that already overlap

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::EPSILON;
use crate::error::CollisionError;

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in priority order (X wins ties over Y, Y over Z).
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a `Vec3`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// An axis-aligned bounding box.
///
/// `min <= max` on every axis. Zero width is allowed and represents a plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from corners that are already ordered.
    ///
    /// Ordering is only checked in debug builds. Use [`Aabb::try_new`] for
    /// corners that come from outside the crate.
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "unordered bounds {min:?} {max:?}");
        Self { min, max }
    }

    /// Create a box, rejecting unordered or non-finite corners.
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, CollisionError> {
        if !min.is_finite() || !max.is_finite() || !min.cmple(max).all() {
            return Err(CollisionError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Create a box from its center and half-size in each axis.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create the box of an upright body standing with its feet at `feet`.
    #[inline]
    pub fn from_feet(feet: Vec3, radius: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(feet.x - radius, feet.y, feet.z - radius),
            max: Vec3::new(feet.x + radius, feet.y + height, feet.z + radius),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow the box by `amount` on both sides of every axis.
    #[inline]
    pub fn expanded(&self, amount: Vec3) -> Self {
        Self {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Inclusive overlap with another box.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        aabb_overlap(self, other)
    }

    /// Check if the horizontal (XZ) footprint of this box, grown by
    /// `radius`, contains the point `(x, z)`.
    #[inline]
    pub fn footprint_contains(&self, x: f32, z: f32, radius: f32) -> bool {
        x + radius >= self.min.x
            && x - radius <= self.max.x
            && z + radius >= self.min.z
            && z - radius <= self.max.z
    }
}

/// Slab test of a ray against a box.
///
/// Returns the distance along `dir` (in multiples of `dir`) to the entry
/// point, or to the exit point when the origin is inside the box.
///
/// Axes whose direction component is within [`EPSILON`] of zero do not
/// constrain the interval at all, even when the origin lies outside the slab
/// on that axis. Callers must not rely on exact results for axis-parallel
/// rays that start outside the box's extent on a parallel axis.
pub fn ray_intersect_aabb(origin: Vec3, dir: Vec3, box_min: Vec3, box_max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        if dir[axis].abs() > EPSILON {
            let mut t1 = (box_min[axis] - origin[axis]) / dir[axis];
            let mut t2 = (box_max[axis] - origin[axis]) / dir[axis];
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            if t1 > t_min {
                t_min = t1;
            }
            if t2 < t_max {
                t_max = t2;
            }
        }
    }

    if t_min <= t_max && t_max > 0.0 {
        Some(if t_min > 0.0 { t_min } else { t_max })
    } else {
        None
    }
}

/// Check that `origin` lies inside the box's slab on every axis the ray runs
/// parallel to.
///
/// [`ray_intersect_aabb`] leaves such axes unconstrained; world raycasts use
/// this to reject rays that pass beside or above a box.
pub fn within_parallel_slabs(origin: Vec3, dir: Vec3, aabb: &Aabb) -> bool {
    (0..3).all(|axis| {
        dir[axis].abs() > EPSILON
            || (origin[axis] >= aabb.min[axis] && origin[axis] <= aabb.max[axis])
    })
}

/// Inclusive overlap test on all three axes.
///
/// Boxes that merely touch count as overlapping.
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// Per-axis push-out that separates `player` from `obstacle`.
///
/// For each axis both exits are considered (toward -axis and +axis) and the
/// shorter one is kept; its sign is the push direction. Only meaningful when
/// the boxes overlap.
pub fn aabb_penetration(player: &Aabb, obstacle: &Aabb) -> Vec3 {
    let mut push = Vec3::ZERO;
    for axis in 0..3 {
        let toward_neg = player.max[axis] - obstacle.min[axis];
        let toward_pos = obstacle.max[axis] - player.min[axis];
        push[axis] = if toward_neg < toward_pos {
            -toward_neg
        } else {
            toward_pos
        };
    }
    push
}

/// Axis with the smallest push-out magnitude, and the push along it.
///
/// Ties go to X, then Y, then Z.
pub(crate) fn min_penetration_axis(penetration: Vec3) -> (Axis, f32) {
    let mut best = (Axis::X, penetration.x);
    for axis in [Axis::Y, Axis::Z] {
        let value = penetration[axis.index()];
        if value.abs() < best.1.abs() {
            best = (axis, value);
        }
    }
    best
}

/// Outward normal of the face of `aabb` closest to `point`.
///
/// Used for raycast hits: the face with the smallest slab margin at the hit
/// point is the one the ray struck. Ties go to X, then Y, then Z.
pub fn face_normal_at(aabb: &Aabb, point: Vec3) -> Vec3 {
    let mut best_margin = f32::INFINITY;
    let mut normal = Vec3::Y;

    for axis in Axis::ALL {
        let i = axis.index();
        let to_min = (point[i] - aabb.min[i]).abs();
        let to_max = (aabb.max[i] - point[i]).abs();

        if to_min < best_margin {
            best_margin = to_min;
            normal = -axis.unit();
        }
        if to_max < best_margin {
            best_margin = to_max;
            normal = axis.unit();
        }
    }

    normal
}

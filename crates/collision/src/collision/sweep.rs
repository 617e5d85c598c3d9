//! Continuous (swept) box-vs-box collision.
//!
//! A discrete overlap test after the move lets fast bodies pass straight
//! through thin walls once the per-tick displacement exceeds the wall's
//! thickness. The sweep here finds the exact fraction of the tick at which
//! the moving box first touches the obstacle instead.
//!
//! # Algorithm
//!
//! The obstacle is grown by the moving box's half-extents (Minkowski sum),
//! which turns the problem into a ray from the moving box's center along the
//! tick's displacement. Per-axis slab entry and exit times are intersected;
//! the time range of interest is `[0, 1]`, one full tick of motion.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::EPSILON;

use super::aabb::{Aabb, Axis, aabb_penetration};

/// Result of sweeping one box against one obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Whether contact happens during this tick.
    pub hit: bool,

    /// Fraction of the tick at first contact, clamped to `[0, 1]`.
    pub entry_time: f32,

    /// Fraction of the tick at which the boxes separate, clamped to `[0, 1]`.
    pub exit_time: f32,

    /// Axis of first contact. `None` when no axis constrains the motion
    /// (no hit, or the boxes overlap with zero velocity).
    pub axis: Option<Axis>,

    /// Contact normal on `axis`, pointing back the way the box came.
    pub normal: Vec3,

    /// Whether the boxes were already overlapping at the start of the tick.
    pub started_inside: bool,

    /// Push-out from [`aabb_penetration`] when `started_inside`, else zero.
    pub penetration: Vec3,
}

impl SweepResult {
    /// A sweep that touches nothing.
    pub const MISS: Self = Self {
        hit: false,
        entry_time: 1.0,
        exit_time: 1.0,
        axis: None,
        normal: Vec3::ZERO,
        started_inside: false,
        penetration: Vec3::ZERO,
    };
}

impl Default for SweepResult {
    fn default() -> Self {
        Self::MISS
    }
}

/// Sweep `moving` along `velocity` (the displacement for one tick) against a
/// static `obstacle`.
pub fn swept_aabb(moving: &Aabb, velocity: Vec3, obstacle: &Aabb) -> SweepResult {
    let expanded = obstacle.expanded(moving.half_extents());
    let origin = moving.center();

    let mut entry = [f32::NEG_INFINITY; 3];
    let mut exit = [f32::INFINITY; 3];

    for axis in 0..3 {
        let v = velocity[axis];

        if v.abs() < EPSILON {
            // No motion on this axis: we must already be inside the slab.
            if origin[axis] < expanded.min[axis] || origin[axis] > expanded.max[axis] {
                return SweepResult::MISS;
            }
        } else if v > 0.0 {
            entry[axis] = (expanded.min[axis] - origin[axis]) / v;
            exit[axis] = (expanded.max[axis] - origin[axis]) / v;
        } else {
            entry[axis] = (expanded.max[axis] - origin[axis]) / v;
            exit[axis] = (expanded.min[axis] - origin[axis]) / v;
        }
    }

    let t_entry = entry[0].max(entry[1]).max(entry[2]);
    let t_exit = exit[0].min(exit[1]).min(exit[2]);

    if t_entry > t_exit || t_entry > 1.0 || t_exit < 0.0 {
        return SweepResult::MISS;
    }

    // Latest-entering axis; Axis::ALL order breaks ties.
    let axis = Axis::ALL
        .into_iter()
        .find(|a| velocity[a.index()].abs() >= EPSILON && entry[a.index()] == t_entry);

    let normal = axis.map_or(Vec3::ZERO, |a| {
        -velocity[a.index()].signum() * a.unit()
    });

    let started_inside = t_entry < 0.0;
    let penetration = if started_inside {
        aabb_penetration(moving, obstacle)
    } else {
        Vec3::ZERO
    };

    SweepResult {
        hit: true,
        entry_time: t_entry.clamp(0.0, 1.0),
        exit_time: t_exit.clamp(0.0, 1.0),
        axis,
        normal,
        started_inside,
        penetration,
    }
}

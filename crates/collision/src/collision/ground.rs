//! Ground and platform classification beneath a body.
//!
//! Gameplay cares about more than "is there ground": fall damage and
//! footstep sounds differ between the base floor, raised platforms and
//! ramps, so the probe reports which one supports the body.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{EPSILON, RISING_EPSILON};

use super::aabb::Aabb;
use super::shape::{CollisionShape, ShapeId, ShapeKind};

/// What a body is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroundKind {
    /// Nothing within reach below the feet.
    #[default]
    Airborne,
    /// The base floor.
    Floor,
    /// An elevated walkable surface (platform, catwalk, container top).
    Platform,
    /// A sloped surface.
    Ramp,
}

/// Result of a ground probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundResult {
    pub on_ground: bool,

    /// Height of the supporting surface. `NEG_INFINITY` when airborne.
    pub ground_y: f32,

    pub kind: GroundKind,

    /// Shape providing support, if any.
    pub shape: Option<ShapeId>,
}

impl GroundResult {
    pub const AIRBORNE: Self = Self {
        on_ground: false,
        ground_y: f32::NEG_INFINITY,
        kind: GroundKind::Airborne,
        shape: None,
    };

    #[inline]
    pub fn on_ramp(&self) -> bool {
        self.kind == GroundKind::Ramp
    }

    #[inline]
    pub fn on_platform(&self) -> bool {
        self.kind == GroundKind::Platform
    }

    #[inline]
    pub fn on_floor(&self) -> bool {
        self.kind == GroundKind::Floor
    }
}

impl Default for GroundResult {
    fn default() -> Self {
        Self::AIRBORNE
    }
}

/// Check if a body is standing on top of `platform`.
///
/// The body's footprint (its center grown by `radius`) must overlap the
/// platform horizontally, its feet must be within `tolerance` of the top
/// surface, and it must not be rising. A body jumping up through a platform
/// is not standing on it.
pub fn is_standing_on_platform(
    feet_y: f32,
    velocity_y: f32,
    platform: &Aabb,
    player_x: f32,
    player_z: f32,
    radius: f32,
    tolerance: f32,
) -> bool {
    if velocity_y > RISING_EPSILON {
        return false;
    }

    if !platform.footprint_contains(player_x, player_z, radius) {
        return false;
    }

    (feet_y - platform.max.y).abs() <= tolerance
}

/// Which kind of footing a walkable shape provides.
pub fn classify(kind: &ShapeKind) -> GroundKind {
    match kind {
        ShapeKind::Floor => GroundKind::Floor,
        ShapeKind::Ramp(_) => GroundKind::Ramp,
        _ => GroundKind::Platform,
    }
}

/// Probe downward from `feet` against every walkable shape.
///
/// Picks the highest surface at or below the feet, at most `tolerance`
/// down, whose footprint the body overlaps. Ramp surfaces are interpolated at the body's center.
/// Earlier shapes win ties.
pub fn probe_ground<'a, I>(shapes: I, feet: Vec3, radius: f32, tolerance: f32) -> GroundResult
where
    I: IntoIterator<Item = &'a CollisionShape>,
{
    let mut best: Option<(f32, &CollisionShape)> = None;

    for shape in shapes {
        if !shape.walkable || !shape.bounds.footprint_contains(feet.x, feet.z, radius) {
            continue;
        }

        let surface_y = shape.surface_y_at(feet.x, feet.z);
        let drop = feet.y - surface_y;
        if drop < -EPSILON || drop > tolerance {
            continue;
        }

        if best.map_or(true, |(y, _)| surface_y > y) {
            best = Some((surface_y, shape));
        }
    }

    match best {
        Some((ground_y, shape)) => GroundResult {
            on_ground: true,
            ground_y,
            kind: classify(&shape.kind),
            shape: Some(shape.id),
        },
        None => GroundResult::AIRBORNE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::shape::{RampAxis, RampProfile, SlopeDirection};

    fn platform() -> Aabb {
        Aabb::new(Vec3::new(-2.0, 1.8, -2.0), Vec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn test_standing_on_platform() {
        assert!(is_standing_on_platform(2.0, 0.0, &platform(), 0.0, 0.0, 0.3, 0.1));
        assert!(is_standing_on_platform(2.05, -0.01, &platform(), 0.0, 0.0, 0.3, 0.1));
    }

    #[test]
    fn test_rising_through_platform_is_not_standing() {
        assert!(!is_standing_on_platform(2.0, 0.2, &platform(), 0.0, 0.0, 0.3, 0.1));
    }

    #[test]
    fn test_off_the_edge() {
        // Center beyond the edge, but the footprint still overlaps.
        assert!(is_standing_on_platform(2.0, 0.0, &platform(), 2.2, 0.0, 0.3, 0.1));
        assert!(!is_standing_on_platform(2.0, 0.0, &platform(), 2.5, 0.0, 0.3, 0.1));
    }

    #[test]
    fn test_too_far_above() {
        assert!(!is_standing_on_platform(2.5, 0.0, &platform(), 0.0, 0.0, 0.3, 0.1));
    }

    fn shape(index: u32, bounds: Aabb, kind: ShapeKind) -> CollisionShape {
        CollisionShape::new(ShapeId::new(index, 0), bounds, kind, true, "test")
    }

    #[test]
    fn test_probe_prefers_highest_surface() {
        let floor = shape(
            0,
            Aabb::new(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0)),
            ShapeKind::Floor,
        );
        let plate = shape(
            1,
            Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.05, 1.0)),
            ShapeKind::Platform,
        );
        let shapes = [floor, plate];

        let result = probe_ground(&shapes, Vec3::new(0.0, 0.05, 0.0), 0.3, 0.1);
        assert!(result.on_ground);
        assert!(result.on_platform());
        assert_eq!(result.ground_y, 0.05);
        assert_eq!(result.shape, Some(ShapeId::new(1, 0)));

        let result = probe_ground(&shapes, Vec3::new(5.0, 0.0, 0.0), 0.3, 0.1);
        assert!(result.on_floor());

        let result = probe_ground(&shapes, Vec3::new(5.0, 1.0, 0.0), 0.3, 0.1);
        assert!(!result.on_ground);
        assert_eq!(result.kind, GroundKind::Airborne);
    }

    #[test]
    fn test_probe_skips_surface_above_feet() {
        let floor = shape(
            0,
            Aabb::new(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0)),
            ShapeKind::Floor,
        );
        let step = shape(
            1,
            Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.08, 1.0)),
            ShapeKind::Platform,
        );
        let shapes = [floor, step];

        let result = probe_ground(&shapes, Vec3::ZERO, 0.3, 0.1);
        assert!(result.on_floor());
        assert_eq!(result.ground_y, 0.0);
        assert_eq!(result.shape, Some(ShapeId::new(0, 0)));
    }

    #[test]
    fn test_probe_ramp_interpolates() {
        let ramp = shape(
            0,
            Aabb::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0)),
            ShapeKind::Ramp(RampProfile::new(0.0, 2.0, RampAxis::X, SlopeDirection::Positive)),
        );
        let shapes = [ramp];

        let result = probe_ground(&shapes, Vec3::new(2.0, 1.0, 0.0), 0.3, 0.1);
        assert!(result.on_ramp());
        assert!((result.ground_y - 1.0).abs() < 1e-6);

        // Standing at the ramp's top height but at its low end is not ground.
        let result = probe_ground(&shapes, Vec3::new(0.5, 2.0, 0.0), 0.3, 0.1);
        assert!(!result.on_ground);
    }

    #[test]
    fn test_probe_skips_non_walkable() {
        let mut wall = shape(
            0,
            Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
            ShapeKind::Wall,
        );
        wall.walkable = false;
        let result = probe_ground(std::slice::from_ref(&wall), Vec3::new(0.0, 2.0, 0.0), 0.3, 0.1);
        assert!(!result.on_ground);
    }
}

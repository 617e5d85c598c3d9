//! Collision tuning constants.
//!
//! Grouped here so the game can tweak them in one place. Units are world
//! units per simulation tick, matching the fixed-step game loop.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionLayer;

/// Threshold below which a ray direction or velocity component is treated
/// as zero.
pub const EPSILON: f32 = 1e-4;

/// Vertical speed above which a body counts as rising.
pub const RISING_EPSILON: f32 = 0.001;

/// Default number of shapes the world can hold.
pub const MAX_COLLISION_SHAPES: usize = 256;

/// Configuration for the collision world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionConfig {
    // ========================================================================
    // Storage
    // ========================================================================
    /// Fixed number of shape slots. Inserts beyond this fail.
    pub capacity: usize,

    // ========================================================================
    // Ground detection
    // ========================================================================
    /// Vertical window (above and below the feet) in which a surface counts
    /// as ground.
    pub ground_tolerance: f32,

    /// Vertical speed above which a body is rising and cannot stand.
    pub rising_epsilon: f32,

    /// Layers considered by ground checks.
    pub ground_mask: CollisionLayer,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Penetration depth treated as resting contact rather than overlap.
    pub skin_width: f32,

    /// Upper bound on iterations of the slide helper.
    pub max_slide_iterations: usize,

    /// Layers considered by movement queries.
    pub movement_mask: CollisionLayer,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_COLLISION_SHAPES,

            ground_tolerance: 0.1,
            rising_epsilon: RISING_EPSILON,
            ground_mask: CollisionLayer::ALL,

            skin_width: 0.001,
            max_slide_iterations: 4,
            movement_mask: CollisionLayer::WORLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollisionConfig::default();
        assert_eq!(config.capacity, 256);
        assert!(config.skin_width < config.ground_tolerance);
        assert!(config.movement_mask.contains(CollisionLayer::WORLD));
    }
}

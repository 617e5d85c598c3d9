//! Error types for collision world mutation.
//!
//! Queries never fail; only inserting shapes can be rejected.

use glam::Vec3;
use thiserror::Error;

/// Errors that can occur while building the collision world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    /// The fixed-size shape table has no free slot.
    #[error("collision world is full ({capacity} shapes)")]
    WorldFull { capacity: usize },

    /// A box had min > max on some axis, or a non-finite coordinate.
    #[error("invalid bounds: min {min:?}, max {max:?}")]
    InvalidBounds { min: Vec3, max: Vec3 },

    /// A ramp that cannot be interpolated.
    #[error("invalid ramp: {reason}")]
    InvalidRamp { reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CollisionError::WorldFull { capacity: 256 };
        assert_eq!(err.to_string(), "collision world is full (256 shapes)");

        let err = CollisionError::InvalidRamp {
            reason: "zero length along slope axis",
        };
        assert!(err.to_string().contains("zero length"));
    }
}

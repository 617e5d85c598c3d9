//! Collision layers for query filtering.
//!
//! Every shape lives on one or more layers. Queries pass a mask and only
//! consider shapes whose layer intersects it (e.g. hit-scan weapons skip
//! pickups, ground checks skip nothing).

use serde::{Deserialize, Serialize};

/// Bitmask of collision categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Static world geometry - walls, floors, platforms, ramps.
    pub const WORLD: Self = Self(1 << 0);

    /// Player bodies.
    pub const PLAYER: Self = Self(1 << 1);

    /// Enemy bodies.
    pub const ENEMY: Self = Self(1 << 2);

    /// Bullets and rockets.
    pub const PROJECTILE: Self = Self(1 << 3);

    /// Health, ammo and weapon pickups.
    pub const PICKUP: Self = Self(1 << 4);

    /// Every layer.
    pub const ALL: Self = Self(0xFFFF);

    /// Check if these layers contain all of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two layer sets.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove layers from this set.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for CollisionLayer {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CollisionLayer {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

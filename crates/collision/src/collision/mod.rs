//! Collision detection for FPS movement and hit-scan.
//!
//! All geometry is axis-aligned boxes. The layers, leaves first:
//!
//! - [`aabb`]: ray/box slab test, box overlap and penetration
//! - [`sweep`]: continuous box-vs-box sweep over one tick of motion
//! - [`ground`]: footing classification (floor, platform, ramp, airborne)
//! - [`world`]: the shape registry that fans those tests out over the level
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: owns every static shape and answers queries
//! - [`CollisionShape`]: a box plus its gameplay classification
//! - [`MoveResult`] / [`RaycastHit`] / [`GroundResult`]: query outputs

pub mod aabb;
mod flags;
pub mod ground;
mod results;
mod shape;
pub mod sweep;
mod world;

pub use aabb::{Aabb, Axis, aabb_overlap, aabb_penetration, ray_intersect_aabb};
pub use flags::CollisionLayer;
pub use ground::{GroundKind, GroundResult, is_standing_on_platform};
pub use results::{Body, MoveResult, RaycastHit};
pub use shape::{CollisionShape, RampAxis, RampProfile, ShapeId, ShapeKind, SlopeDirection};
pub use sweep::{SweepResult, swept_aabb};
pub use world::CollisionWorld;

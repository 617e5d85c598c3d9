//! Astranyx Collision
//!
//! Deterministic axis-aligned collision for the Astranyx FPS: hit-scan
//! raycasts, swept player movement with wall sliding, and ground/platform/ramp
//! detection against a fixed table of static shapes.
//!
//! # Architecture
//!
//! - **Collision**: primitive box tests, the swept test, the ground
//!   classifier and the [`CollisionWorld`] registry that aggregates them
//! - **Level**: scripted population of the world at level load
//!
//! # Design Principles
//!
//! 1. **Determinism**: same inputs and shape table give bit-identical results
//! 2. **No tunneling**: movement is swept, never a post-move overlap test
//! 3. **Bounded cost**: every query is linear in a fixed-capacity table
//!
//! # Example
//!
//! ```
//! use astranyx_collision::{Body, CollisionWorld, ShapeKind};
//! use glam::Vec3;
//!
//! let mut world = CollisionWorld::new();
//! world
//!     .add_box(
//!         Vec3::new(-10.0, -1.0, -10.0),
//!         Vec3::new(10.0, 0.0, 10.0),
//!         ShapeKind::Floor,
//!         true,
//!         "floor",
//!     )
//!     .unwrap();
//!
//! // One tick of walking with gravity pulling the body into the floor.
//! let result = world.slide_move(Vec3::ZERO, Vec3::new(0.1, -0.01, 0.0), Body::PLAYER);
//! assert!(result.ground.on_floor());
//! assert!((result.position.x - 0.1).abs() < 1e-4);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod level;

// Re-export commonly used types
pub use collision::{
    Aabb, Body, CollisionLayer, CollisionShape, CollisionWorld, GroundKind, GroundResult,
    MoveResult, RampAxis, RampProfile, RaycastHit, ShapeId, ShapeKind, SlopeDirection,
    SweepResult,
};
pub use config::CollisionConfig;
pub use error::CollisionError;

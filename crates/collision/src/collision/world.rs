//! Collision world containing all static geometry.
//!
//! The world owns every shape in a fixed-capacity table and answers the
//! per-tick queries of the game loop: raycasts for weapons and line of
//! sight, ground checks, and swept player movement with slide response.
//!
//! Queries are pure functions of the table contents and iterate shapes in
//! slot order, so identical inputs give bit-identical results.

use glam::{Vec2, Vec3};

use crate::config::{CollisionConfig, EPSILON};
use crate::error::CollisionError;

use super::aabb::{
    Aabb, Axis, aabb_overlap, aabb_penetration, face_normal_at, min_penetration_axis,
    ray_intersect_aabb, within_parallel_slabs,
};
use super::flags::CollisionLayer;
use super::ground::{GroundResult, probe_ground};
use super::results::{Body, MoveResult, RaycastHit};
use super::shape::{CollisionShape, RampAxis, RampProfile, ShapeId, ShapeKind};
use super::sweep::{SweepResult, swept_aabb};

/// One entry of the shape table.
#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    shape: Option<CollisionShape>,
}

/// The collision world containing all geometry.
///
/// # Ownership
///
/// The world is an explicit context object: the game constructs one per
/// session and passes it to whoever needs it. Mutation (`add_*`,
/// `remove_shape`, `clear`) and queries must happen from the same game-loop
/// thread; no locking is done.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    config: CollisionConfig,
    /// Dense shape table, never longer than `config.capacity`.
    slots: Vec<Slot>,
    /// Freed slot indices, reused lowest-first.
    free: Vec<u32>,
    /// Number of occupied slots.
    active: usize,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    /// Create an empty collision world with default configuration.
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty collision world.
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.capacity),
            free: Vec::new(),
            active: 0,
            config,
        }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    // ========================================================================
    // Shape management
    // ========================================================================

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `min`, `max` - Opposite corners; `min <= max` on every axis
    /// * `kind` - Surface classification, which also sets default blocking
    /// * `walkable` - Whether bodies can stand on top
    /// * `name` - Debug label
    pub fn add_box(
        &mut self,
        min: Vec3,
        max: Vec3,
        kind: ShapeKind,
        walkable: bool,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        let bounds = Aabb::try_new(min, max)?;
        if let ShapeKind::Ramp(profile) = &kind {
            validate_ramp(&bounds, profile)?;
        }
        self.insert(bounds, kind, walkable, name)
    }

    /// Add a box from its center and half-size in each axis.
    pub fn add_box_centered(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        kind: ShapeKind,
        walkable: bool,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        let half = half_extents.abs();
        self.add_box(center - half, center + half, kind, walkable, name)
    }

    /// Add a walkable ramp.
    ///
    /// `min` and `max` are the XZ footprint corners (`x`, `z`). The vertical
    /// extent spans the profile's lowest to highest point.
    pub fn add_ramp(
        &mut self,
        min: Vec2,
        max: Vec2,
        profile: RampProfile,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        self.add_box(
            Vec3::new(min.x, profile.low_y(), min.y),
            Vec3::new(max.x, profile.high_y(), max.y),
            ShapeKind::Ramp(profile),
            true,
            name,
        )
    }

    /// Add a walkable platform.
    ///
    /// `min` and `max` are the XZ footprint corners (`x`, `z`); the slab
    /// extends `thickness` below `top_y`.
    pub fn add_platform(
        &mut self,
        min: Vec2,
        max: Vec2,
        top_y: f32,
        thickness: f32,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        self.add_box(
            Vec3::new(min.x, top_y - thickness.abs(), min.y),
            Vec3::new(max.x, top_y, max.y),
            ShapeKind::Platform,
            true,
            name,
        )
    }

    /// Add a non-solid trigger volume.
    pub fn add_trigger(
        &mut self,
        min: Vec3,
        max: Vec3,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        self.add_box(min, max, ShapeKind::Trigger, false, name)
    }

    /// Move a shape to other layers. Returns `false` for unknown ids.
    pub fn set_layer(&mut self, id: ShapeId, layer: CollisionLayer) -> bool {
        match self.slot_mut(id) {
            Some(shape) => {
                shape.layer = layer;
                true
            }
            None => false,
        }
    }

    /// Remove a shape, returning it. Unknown or stale ids are a no-op.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<CollisionShape> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }

        let shape = slot.shape.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        // Keep lowest indices at the end so they are reused first.
        self.free.sort_unstable_by(|a, b| b.cmp(a));
        self.active -= 1;

        log::debug!("removed collision shape {} ({})", id, shape.name);
        Some(shape)
    }

    /// Remove all collision geometry. Every previously issued id goes stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.shape.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.active = 0;
    }

    /// Look up a shape by id.
    pub fn shape(&self, id: ShapeId) -> Option<&CollisionShape> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.shape.as_ref())
    }

    /// Number of active shapes.
    pub fn shape_count(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Maximum number of shapes.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Active shapes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &CollisionShape> + '_ {
        self.slots.iter().filter_map(|slot| slot.shape.as_ref())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Perform a raycast through the world.
    ///
    /// Only shapes on `mask` that block projectiles are considered. Returns
    /// the nearest hit within `max_distance`, or `None`. Rays running
    /// parallel to an axis only hit boxes whose slab contains the origin on
    /// that axis.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum trace distance
    /// * `mask` - Layers to collide with
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: CollisionLayer,
    ) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return None;
        }

        let mut closest: Option<(f32, &CollisionShape)> = None;

        for shape in self.iter() {
            if !mask.intersects(shape.layer) || !shape.blocks_projectiles {
                continue;
            }
            if !within_parallel_slabs(origin, dir, &shape.bounds) {
                continue;
            }

            if let Some(t) = ray_intersect_aabb(origin, dir, shape.bounds.min, shape.bounds.max) {
                if t <= max_distance && closest.map_or(true, |(best, _)| t < best) {
                    closest = Some((t, shape));
                }
            }
        }

        closest.map(|(distance, shape)| {
            let point = origin + dir * distance;
            RaycastHit {
                distance,
                point,
                normal: face_normal_at(&shape.bounds, point),
                shape: shape.id,
                kind: shape.kind,
            }
        })
    }

    /// Check whether nothing on `mask` blocks the segment from `from` to `to`.
    pub fn line_of_sight(&self, from: Vec3, to: Vec3, mask: CollisionLayer) -> bool {
        let delta = to - from;
        let distance = delta.length();
        if distance < EPSILON {
            return true;
        }
        self.raycast(from, delta, distance, mask).is_none()
    }

    /// Classify the footing of a body standing at `feet`.
    pub fn check_ground_at(&self, feet: Vec3, body: Body) -> GroundResult {
        let mask = self.config.ground_mask;
        probe_ground(
            self.iter().filter(|shape| mask.intersects(shape.layer)),
            feet,
            body.radius,
            self.config.ground_tolerance,
        )
    }

    /// Ids of every shape on `mask` whose bounds overlap `aabb`.
    ///
    /// Includes triggers; used by door, pickup and trigger logic.
    pub fn overlapping_shapes<'a>(
        &'a self,
        aabb: &'a Aabb,
        mask: CollisionLayer,
    ) -> impl Iterator<Item = ShapeId> + 'a {
        self.iter()
            .filter(move |shape| mask.intersects(shape.layer) && aabb_overlap(aabb, &shape.bounds))
            .map(|shape| shape.id)
    }

    /// Check if a point lies inside any movement-blocking shape on `mask`.
    pub fn point_in_solid(&self, point: Vec3, mask: CollisionLayer) -> bool {
        self.blocking_shapes(mask)
            .any(|shape| shape.bounds.contains_point(point))
    }

    /// Resolve one tick of body motion.
    ///
    /// `velocity` is the displacement for this tick. The body is first
    /// pushed out of anything it is already embedded in, then swept against
    /// every blocking shape. The earliest contact clamps the motion and
    /// zeroes the velocity along the contact normal, keeping tangential
    /// velocity so the body slides along walls on the next tick.
    pub fn move_player(&self, position: Vec3, velocity: Vec3, body: Body) -> MoveResult {
        let mask = self.config.movement_mask;
        let skin = self.config.skin_width;
        let target = position + velocity;

        // Depenetrate
        let start_box = body.aabb_at(position);
        // Largest push each way per axis, so seams between adjacent boxes
        // do not add up.
        let mut push_pos = Vec3::ZERO;
        let mut push_neg = Vec3::ZERO;
        let mut pushed_by = None;

        for shape in self.blocking_shapes(mask) {
            if !aabb_overlap(&start_box, &shape.bounds) {
                continue;
            }
            let (axis, amount) = min_penetration_axis(aabb_penetration(&start_box, &shape.bounds));
            if amount.abs() > skin {
                let i = axis.index();
                if amount > 0.0 {
                    push_pos[i] = push_pos[i].max(amount);
                } else {
                    push_neg[i] = push_neg[i].min(amount);
                }
                pushed_by.get_or_insert(shape.id);
            }
        }
        let push_out = push_pos + push_neg;

        let start = position + push_out;
        let moving = body.aabb_at(start);

        // Sweep
        let mut earliest: Option<(SweepResult, ShapeId)> = None;

        for shape in self.blocking_shapes(mask) {
            let sweep = swept_aabb(&moving, velocity, &shape.bounds);
            if !is_blocking_contact(&sweep, &moving, &shape.bounds, velocity, skin) {
                continue;
            }
            // Walkable tops at or below the feet can be walked onto.
            if sweep.axis != Some(Axis::Y)
                && shape.walkable
                && moving.min.y >= shape.bounds.max.y - skin
            {
                continue;
            }
            if earliest.map_or(true, |(best, _)| sweep.entry_time < best.entry_time) {
                earliest = Some((sweep, shape.id));
            }
        }

        let Some((sweep, hit_shape)) = earliest else {
            let position = start + velocity;
            let ground = self.ground_after_move(position, velocity, body);
            return MoveResult {
                collided: pushed_by.is_some(),
                push_out: position - target,
                hit_shape: pushed_by,
                ..MoveResult::unobstructed(position, velocity, ground)
            };
        };

        let mut new_velocity = velocity;
        if let Some(axis) = sweep.axis {
            new_velocity[axis.index()] = 0.0;
        }

        let new_position = start + velocity * sweep.entry_time;
        let ground = self.ground_after_move(new_position, new_velocity, body);

        MoveResult {
            collided: true,
            position: new_position,
            velocity: new_velocity,
            push_out: new_position - target,
            time_of_impact: sweep.entry_time,
            hit_normal: Some(sweep.normal),
            hit_shape: Some(hit_shape),
            ground,
        }
    }

    /// Resolve a full tick of motion by repeated [`move_player`] steps.
    ///
    /// After each contact the remaining fraction of the tick continues with
    /// the clipped velocity, so a body hitting a wall at an angle still
    /// slides along it within the same tick. Bounded by
    /// `max_slide_iterations`; reports the first contact.
    ///
    /// [`move_player`]: Self::move_player
    pub fn slide_move(&self, position: Vec3, velocity: Vec3, body: Body) -> MoveResult {
        let target = position + velocity;
        let mut current = position;
        let mut current_velocity = velocity;
        let mut remaining = 1.0_f32;
        let mut first_contact: Option<MoveResult> = None;
        let mut collided = false;

        for iteration in 0..self.config.max_slide_iterations {
            if remaining <= EPSILON || current_velocity.length_squared() < EPSILON * EPSILON {
                break;
            }

            let step = self.move_player(current, current_velocity * remaining, body);
            current = step.position;
            collided |= step.collided;

            let Some(normal) = step.hit_normal else {
                break;
            };

            log::debug!(
                "slide iteration {}: hit {:?} at t={} normal={:?}",
                iteration,
                step.hit_shape,
                step.time_of_impact,
                normal
            );

            current_velocity -= normal * current_velocity.dot(normal);
            remaining *= 1.0 - step.time_of_impact;
            first_contact.get_or_insert(step);
        }

        let ground = self.ground_after_move(current, current_velocity, body);
        match first_contact {
            Some(first) => MoveResult {
                collided: true,
                position: current,
                velocity: current_velocity,
                push_out: current - target,
                ground,
                ..first
            },
            None => MoveResult {
                collided,
                push_out: current - target,
                ..MoveResult::unobstructed(current, current_velocity, ground)
            },
        }
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn insert(
        &mut self,
        bounds: Aabb,
        kind: ShapeKind,
        walkable: bool,
        name: &str,
    ) -> Result<ShapeId, CollisionError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.slots.len() < self.config.capacity => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
            None => {
                log::warn!(
                    "collision world full ({} shapes), rejected '{}'",
                    self.config.capacity,
                    name
                );
                return Err(CollisionError::WorldFull {
                    capacity: self.config.capacity,
                });
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = ShapeId::new(index, slot.generation);
        slot.shape = Some(CollisionShape::new(id, bounds, kind, walkable, name));
        self.active += 1;

        log::debug!("added collision shape {} '{}' {:?}", id, name, bounds);
        Ok(id)
    }

    fn slot_mut(&mut self, id: ShapeId) -> Option<&mut CollisionShape> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.shape.as_mut())
    }

    fn blocking_shapes(&self, mask: CollisionLayer) -> impl Iterator<Item = &CollisionShape> + '_ {
        self.iter()
            .filter(move |shape| shape.blocks_movement && mask.intersects(shape.layer))
    }

    fn ground_after_move(&self, position: Vec3, velocity: Vec3, body: Body) -> GroundResult {
        if velocity.y > self.config.rising_epsilon {
            GroundResult::AIRBORNE
        } else {
            self.check_ground_at(position, body)
        }
    }
}

/// Decide whether a sweep hit should stop the body.
///
/// A body that starts inside an obstacle is moving within it (walking along
/// a floor it overlaps, or leaving a wall it touches) rather than into it,
/// unless it is within `skin` of the contact face and heading toward the
/// obstacle.
fn is_blocking_contact(
    sweep: &SweepResult,
    moving: &Aabb,
    obstacle: &Aabb,
    velocity: Vec3,
    skin: f32,
) -> bool {
    let Some(axis) = sweep.axis else {
        return false;
    };
    if !sweep.hit {
        return false;
    }
    if !sweep.started_inside {
        return true;
    }

    let i = axis.index();
    let toward = (obstacle.center()[i] - moving.center()[i]) * velocity[i];
    sweep.penetration[i].abs() <= skin && toward > 0.0
}

fn validate_ramp(bounds: &Aabb, profile: &RampProfile) -> Result<(), CollisionError> {
    let size = bounds.size();
    let length = match profile.axis {
        RampAxis::X => size.x,
        RampAxis::Z => size.z,
    };
    if length <= EPSILON {
        return Err(CollisionError::InvalidRamp {
            reason: "zero length along slope axis",
        });
    }
    if !profile.start_y.is_finite() || !profile.end_y.is_finite() {
        return Err(CollisionError::InvalidRamp {
            reason: "non-finite height",
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

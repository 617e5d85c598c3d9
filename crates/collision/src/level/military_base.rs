//! Military base map collision.
//!
//! Creates:
//! - Concrete floor and perimeter walls
//! - Two-story command building with an interior ramp
//! - Four guard towers with access ramps, linked by catwalks
//! - A bunker with a walkable roof
//! - Cargo containers, sandbags and cover walls
//! - Door trigger volumes

use glam::{Vec2, Vec3};

use crate::collision::{CollisionWorld, RampAxis, RampProfile, ShapeId, ShapeKind, SlopeDirection};
use crate::error::CollisionError;

/// Height of the base floor surface.
pub const FLOOR_Y: f32 = -1.0;

/// Where the player starts, feet on the floor.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, FLOOR_Y, 0.0);

const BASE_HALF_SIZE: f32 = 30.0;
const PERIMETER_HEIGHT: f32 = 4.0;

// Command building
const HQ_MIN: Vec2 = Vec2::new(-7.0, -20.0);
const HQ_MAX: Vec2 = Vec2::new(7.0, -10.0);
const HQ_STORY: f32 = 3.5;
const HQ_WALL: f32 = 0.3;
const HQ_DOOR_HALF_WIDTH: f32 = 1.0;
const HQ_DOOR_HEIGHT: f32 = 2.5;

// Guard towers
const TOWER_OFFSET: f32 = 22.0;
const TOWER_HALF_SIZE: f32 = 2.0;
const TOWER_DECK: f32 = FLOOR_Y + 5.0;
const TOWER_RAMP_LENGTH: f32 = 8.0;
const RAILING_HEIGHT: f32 = 1.0;

// Cover
const CONTAINER_HALF: Vec3 = Vec3::new(3.0, 1.3, 1.2);
const SANDBAG_HALF: Vec3 = Vec3::new(1.5, 0.45, 0.3);
const COVER_WALL_HALF: Vec3 = Vec3::new(1.0, 1.0, 0.15);

/// Populate `world` with the military base. Returns the number of shapes
/// added.
pub fn build_military_base(world: &mut CollisionWorld) -> Result<usize, CollisionError> {
    let before = world.shape_count();

    // === FLOOR ===
    world.add_box(
        Vec3::new(-BASE_HALF_SIZE, FLOOR_Y - 1.0, -BASE_HALF_SIZE),
        Vec3::new(BASE_HALF_SIZE, FLOOR_Y, BASE_HALF_SIZE),
        ShapeKind::Floor,
        true,
        "concrete floor",
    )?;

    build_perimeter(world)?;
    build_command_building(world)?;

    for (x, z) in [
        (-TOWER_OFFSET, -TOWER_OFFSET),
        (TOWER_OFFSET, -TOWER_OFFSET),
        (-TOWER_OFFSET, TOWER_OFFSET),
        (TOWER_OFFSET, TOWER_OFFSET),
    ] {
        build_guard_tower(world, x, z)?;
    }

    build_catwalks(world)?;
    build_bunker(world)?;
    build_cover(world)?;

    let added = world.shape_count() - before;
    log::info!("built military base collision: {} shapes", added);
    Ok(added)
}

fn wall(
    world: &mut CollisionWorld,
    center: Vec3,
    half: Vec3,
    name: &str,
) -> Result<ShapeId, CollisionError> {
    world.add_box_centered(center, half, ShapeKind::Wall, false, name)
}

/// A solid block you can climb on top of.
fn block(
    world: &mut CollisionWorld,
    center: Vec3,
    half: Vec3,
    name: &str,
) -> Result<ShapeId, CollisionError> {
    world.add_box_centered(center, half, ShapeKind::Wall, true, name)
}

fn build_perimeter(world: &mut CollisionWorld) -> Result<(), CollisionError> {
    let y = FLOOR_Y + PERIMETER_HEIGHT / 2.0;
    let half_len = BASE_HALF_SIZE + 1.0;
    let edge = BASE_HALF_SIZE + 0.5;
    let along_x = Vec3::new(half_len, PERIMETER_HEIGHT / 2.0, 0.5);
    let along_z = Vec3::new(0.5, PERIMETER_HEIGHT / 2.0, half_len);

    wall(world, Vec3::new(0.0, y, -edge), along_x, "north perimeter")?;
    wall(world, Vec3::new(0.0, y, edge), along_x, "south perimeter")?;
    wall(world, Vec3::new(-edge, y, 0.0), along_z, "west perimeter")?;
    wall(world, Vec3::new(edge, y, 0.0), along_z, "east perimeter")?;
    Ok(())
}

fn build_command_building(world: &mut CollisionWorld) -> Result<(), CollisionError> {
    let top = FLOOR_Y + HQ_STORY * 2.0;

    // Outer walls, door in the front (+Z) wall
    world.add_box(
        Vec3::new(HQ_MIN.x, FLOOR_Y, HQ_MIN.y),
        Vec3::new(HQ_MAX.x, top, HQ_MIN.y + HQ_WALL),
        ShapeKind::Wall,
        false,
        "hq back wall",
    )?;
    world.add_box(
        Vec3::new(HQ_MIN.x, FLOOR_Y, HQ_MIN.y),
        Vec3::new(HQ_MIN.x + HQ_WALL, top, HQ_MAX.y),
        ShapeKind::Wall,
        false,
        "hq west wall",
    )?;
    world.add_box(
        Vec3::new(HQ_MAX.x - HQ_WALL, FLOOR_Y, HQ_MIN.y),
        Vec3::new(HQ_MAX.x, top, HQ_MAX.y),
        ShapeKind::Wall,
        false,
        "hq east wall",
    )?;
    world.add_box(
        Vec3::new(HQ_MIN.x, FLOOR_Y, HQ_MAX.y - HQ_WALL),
        Vec3::new(-HQ_DOOR_HALF_WIDTH, top, HQ_MAX.y),
        ShapeKind::Wall,
        false,
        "hq front wall left",
    )?;
    world.add_box(
        Vec3::new(HQ_DOOR_HALF_WIDTH, FLOOR_Y, HQ_MAX.y - HQ_WALL),
        Vec3::new(HQ_MAX.x, top, HQ_MAX.y),
        ShapeKind::Wall,
        false,
        "hq front wall right",
    )?;
    world.add_box(
        Vec3::new(-HQ_DOOR_HALF_WIDTH, FLOOR_Y + HQ_DOOR_HEIGHT, HQ_MAX.y - HQ_WALL),
        Vec3::new(HQ_DOOR_HALF_WIDTH, top, HQ_MAX.y),
        ShapeKind::Wall,
        false,
        "hq door lintel",
    )?;

    // Upper floor covers the back half; the front half is the stairwell
    let upper_y = FLOOR_Y + HQ_STORY;
    let upper_edge = HQ_MIN.y + 6.0;
    world.add_platform(
        Vec2::new(HQ_MIN.x + HQ_WALL, HQ_MIN.y + HQ_WALL),
        Vec2::new(HQ_MAX.x - HQ_WALL, upper_edge),
        upper_y,
        0.3,
        "hq upper floor",
    )?;

    // Ramp rises toward the back wall and meets the upper floor's edge
    world.add_ramp(
        Vec2::new(3.0, upper_edge),
        Vec2::new(HQ_MAX.x - HQ_WALL, upper_edge + 3.5),
        RampProfile::new(FLOOR_Y, upper_y, RampAxis::Z, SlopeDirection::Negative),
        "hq stair ramp",
    )?;

    world.add_platform(
        Vec2::new(HQ_MIN.x, HQ_MIN.y),
        Vec2::new(HQ_MAX.x, HQ_MAX.y),
        top + 0.2,
        0.2,
        "hq roof",
    )?;

    world.add_trigger(
        Vec3::new(-HQ_DOOR_HALF_WIDTH, FLOOR_Y, HQ_MAX.y - 0.5),
        Vec3::new(HQ_DOOR_HALF_WIDTH, FLOOR_Y + HQ_DOOR_HEIGHT, HQ_MAX.y + 0.5),
        "hq door trigger",
    )?;

    Ok(())
}

fn build_guard_tower(world: &mut CollisionWorld, x: f32, z: f32) -> Result<(), CollisionError> {
    let leg_half = Vec3::new(0.2, (TOWER_DECK - 0.3 - FLOOR_Y) / 2.0, 0.2);
    let leg_y = FLOOR_Y + leg_half.y;
    let inset = TOWER_HALF_SIZE - 0.2;

    for (dx, dz) in [(-inset, -inset), (inset, -inset), (-inset, inset), (inset, inset)] {
        wall(world, Vec3::new(x + dx, leg_y, z + dz), leg_half, "tower leg")?;
    }

    world.add_platform(
        Vec2::new(x - TOWER_HALF_SIZE, z - TOWER_HALF_SIZE),
        Vec2::new(x + TOWER_HALF_SIZE, z + TOWER_HALF_SIZE),
        TOWER_DECK,
        0.3,
        "tower deck",
    )?;

    // Railings on the outward sides; the inward Z side is open for the ramp
    // and the inward X side for the catwalk.
    let outward_x = x.signum();
    let outward_z = z.signum();
    let rail_y = TOWER_DECK + RAILING_HEIGHT / 2.0;
    wall(
        world,
        Vec3::new(x + outward_x * (TOWER_HALF_SIZE - 0.05), rail_y, z),
        Vec3::new(0.05, RAILING_HEIGHT / 2.0, TOWER_HALF_SIZE),
        "tower railing",
    )?;
    wall(
        world,
        Vec3::new(x, rail_y, z + outward_z * (TOWER_HALF_SIZE - 0.05)),
        Vec3::new(TOWER_HALF_SIZE, RAILING_HEIGHT / 2.0, 0.05),
        "tower railing",
    )?;

    // Ramp runs from the deck's inward edge toward the base center
    let deck_edge = z - outward_z * TOWER_HALF_SIZE;
    let foot = deck_edge - outward_z * TOWER_RAMP_LENGTH;
    let (min_z, max_z) = (deck_edge.min(foot), deck_edge.max(foot));
    let direction = if outward_z > 0.0 {
        SlopeDirection::Positive
    } else {
        SlopeDirection::Negative
    };
    world.add_ramp(
        Vec2::new(x - 0.75, min_z),
        Vec2::new(x + 0.75, max_z),
        RampProfile::new(FLOOR_Y, TOWER_DECK, RampAxis::Z, direction),
        "tower ramp",
    )?;

    Ok(())
}

fn build_catwalks(world: &mut CollisionWorld) -> Result<(), CollisionError> {
    let span = TOWER_OFFSET - TOWER_HALF_SIZE;

    for z in [-TOWER_OFFSET, TOWER_OFFSET] {
        world.add_platform(
            Vec2::new(-span, z - 0.75),
            Vec2::new(span, z + 0.75),
            TOWER_DECK,
            0.2,
            "catwalk",
        )?;

        let support_half = Vec3::new(0.2, (TOWER_DECK - 0.2 - FLOOR_Y) / 2.0, 0.2);
        wall(
            world,
            Vec3::new(0.0, FLOOR_Y + support_half.y, z),
            support_half,
            "catwalk support",
        )?;
    }

    Ok(())
}

fn build_bunker(world: &mut CollisionWorld) -> Result<(), CollisionError> {
    let (min, max) = (Vec2::new(14.0, -4.0), Vec2::new(22.0, 4.0));
    let height = 2.5;
    let thick = 0.5;
    let top = FLOOR_Y + height;

    world.add_box(
        Vec3::new(max.x - thick, FLOOR_Y, min.y),
        Vec3::new(max.x, top, max.y),
        ShapeKind::Wall,
        false,
        "bunker back wall",
    )?;
    world.add_box(
        Vec3::new(min.x, FLOOR_Y, min.y),
        Vec3::new(max.x, top, min.y + thick),
        ShapeKind::Wall,
        false,
        "bunker north wall",
    )?;
    world.add_box(
        Vec3::new(min.x, FLOOR_Y, max.y - thick),
        Vec3::new(max.x, top, max.y),
        ShapeKind::Wall,
        false,
        "bunker south wall",
    )?;
    // Entrance gap in the middle of the west wall
    world.add_box(
        Vec3::new(min.x, FLOOR_Y, min.y),
        Vec3::new(min.x + thick, top, -1.0),
        ShapeKind::Wall,
        false,
        "bunker west wall",
    )?;
    world.add_box(
        Vec3::new(min.x, FLOOR_Y, 1.0),
        Vec3::new(min.x + thick, top, max.y),
        ShapeKind::Wall,
        false,
        "bunker west wall",
    )?;

    world.add_platform(min, max, top + 0.3, 0.3, "bunker roof")?;

    world.add_trigger(
        Vec3::new(min.x - 0.5, FLOOR_Y, -1.0),
        Vec3::new(min.x + thick + 0.5, FLOOR_Y + 2.0, 1.0),
        "bunker entrance trigger",
    )?;

    Ok(())
}

fn build_cover(world: &mut CollisionWorld) -> Result<(), CollisionError> {
    let container_y = FLOOR_Y + CONTAINER_HALF.y;
    let along_z = Vec3::new(CONTAINER_HALF.z, CONTAINER_HALF.y, CONTAINER_HALF.x);

    block(world, Vec3::new(-15.0, container_y, 5.0), CONTAINER_HALF, "cargo container")?;
    block(world, Vec3::new(-15.0, container_y, 8.0), CONTAINER_HALF, "cargo container")?;
    block(
        world,
        Vec3::new(-15.0, container_y + CONTAINER_HALF.y * 2.0, 5.0),
        CONTAINER_HALF,
        "cargo container (stacked)",
    )?;
    block(world, Vec3::new(10.0, container_y, 15.0), along_z, "cargo container")?;
    block(world, Vec3::new(-8.0, container_y, 18.0), CONTAINER_HALF, "cargo container")?;
    block(world, Vec3::new(12.0, container_y, -25.0), CONTAINER_HALF, "cargo container")?;

    let sandbag_y = FLOOR_Y + SANDBAG_HALF.y;
    let sandbag_across = Vec3::new(SANDBAG_HALF.z, SANDBAG_HALF.y, SANDBAG_HALF.x);
    for (x, z, half) in [
        (0.0, 5.0, SANDBAG_HALF),
        (-4.0, 8.0, SANDBAG_HALF),
        (4.0, 8.0, SANDBAG_HALF),
        (8.0, -4.0, sandbag_across),
        (-8.0, -4.0, sandbag_across),
    ] {
        wall(world, Vec3::new(x, sandbag_y, z), half, "sandbags")?;
    }

    let cover_y = FLOOR_Y + COVER_WALL_HALF.y;
    wall(world, Vec3::new(2.0, cover_y, 1.0), COVER_WALL_HALF, "cover wall")?;
    wall(world, Vec3::new(-2.0, cover_y, 3.0), COVER_WALL_HALF, "cover wall")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Body, CollisionLayer, GroundKind};
    use crate::config::CollisionConfig;

    fn base() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        build_military_base(&mut world).unwrap();
        world
    }

    #[test]
    fn test_build_fits_in_world() {
        let mut world = CollisionWorld::new();
        let added = build_military_base(&mut world).unwrap();

        assert_eq!(added, world.shape_count());
        assert!(added > 50);
        assert!(added < world.capacity());
    }

    #[test]
    fn test_build_fails_when_world_too_small() {
        let config = CollisionConfig {
            capacity: 10,
            ..Default::default()
        };
        let mut world = CollisionWorld::with_config(config);
        let err = build_military_base(&mut world);
        assert_eq!(err, Err(CollisionError::WorldFull { capacity: 10 }));
    }

    #[test]
    fn test_spawn_is_clear_and_grounded() {
        let world = base();
        let body = Body::PLAYER.aabb_at(PLAYER_SPAWN);
        let solid: Vec<_> = world
            .overlapping_shapes(&body, CollisionLayer::ALL)
            .filter_map(|id| world.shape(id))
            .filter(|shape| shape.kind != ShapeKind::Floor)
            .map(|shape| shape.name.clone())
            .collect();
        assert!(solid.is_empty(), "spawn overlaps {solid:?}");

        let ground = world.check_ground_at(PLAYER_SPAWN, Body::PLAYER);
        assert_eq!(ground.kind, GroundKind::Floor);
        assert_eq!(ground.ground_y, FLOOR_Y);
    }

    #[test]
    fn test_tower_deck_and_ramp() {
        let world = base();

        let deck = Vec3::new(TOWER_OFFSET, TOWER_DECK, TOWER_OFFSET);
        let on_deck = world.check_ground_at(deck, Body::PLAYER);
        assert!(on_deck.on_platform());
        assert_eq!(on_deck.ground_y, TOWER_DECK);

        // Halfway up the ramp of the +Z tower
        let mid_z = TOWER_OFFSET - TOWER_HALF_SIZE - TOWER_RAMP_LENGTH / 2.0;
        let mid_y = (FLOOR_Y + TOWER_DECK) / 2.0;
        let on_ramp = world.check_ground_at(Vec3::new(TOWER_OFFSET, mid_y, mid_z), Body::PLAYER);
        assert!(on_ramp.on_ramp());
        assert!((on_ramp.ground_y - mid_y).abs() < 1e-4);

        // Halfway up the ramp of a -Z tower
        let on_ramp = world.check_ground_at(Vec3::new(-TOWER_OFFSET, mid_y, -mid_z), Body::PLAYER);
        assert!(on_ramp.on_ramp());
    }

    #[test]
    fn test_catwalk_is_walkable() {
        let world = base();
        let ground = world.check_ground_at(Vec3::new(8.0, TOWER_DECK, TOWER_OFFSET), Body::PLAYER);
        assert!(ground.on_platform());
    }

    #[test]
    fn test_hq_door_trigger() {
        let world = base();
        let at_door = Body::PLAYER.aabb_at(Vec3::new(0.0, FLOOR_Y, HQ_MAX.y));
        let triggers = world
            .overlapping_shapes(&at_door, CollisionLayer::ALL)
            .filter_map(|id| world.shape(id))
            .filter(|shape| shape.kind == ShapeKind::Trigger)
            .count();
        assert_eq!(triggers, 1);
    }

    #[test]
    fn test_shot_from_spawn_hits_cover() {
        let world = base();
        // Eye height clears the sandbags; the south catwalk support is first.
        let eye = PLAYER_SPAWN + Vec3::new(0.0, 1.5, 0.0);
        let hit = world
            .raycast(eye, Vec3::Z, 100.0, CollisionLayer::WORLD)
            .expect("catwalk support straight ahead");
        assert!((hit.distance - 21.8).abs() < 1e-4);
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_walking_into_container_slides() {
        let world = base();
        // Container at (-15, 5) spans x in [-18, -12]; start east of it.
        let start = Vec3::new(-11.5, FLOOR_Y, 5.0);
        let result = world.slide_move(start, Vec3::new(-0.4, -0.01, 0.1), Body::PLAYER);

        assert!(result.collided);
        assert!(result.position.x >= -12.0 + 0.3 - 1e-4);
        assert_eq!(result.velocity.x, 0.0);
        assert!(result.velocity.z > 0.0);
        assert!(result.ground.on_floor());
    }
}

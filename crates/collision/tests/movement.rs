//! End-to-end movement against a populated world.

use astranyx_collision::level::{PLAYER_SPAWN, build_military_base};
use astranyx_collision::{Body, CollisionLayer, CollisionWorld, ShapeKind};
use glam::Vec3;

fn walled_room() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world
        .add_box(
            Vec3::new(-20.0, -1.0, -20.0),
            Vec3::new(20.0, 0.0, 20.0),
            ShapeKind::Floor,
            true,
            "floor",
        )
        .unwrap();
    world
        .add_box_centered(
            Vec3::new(10.0, 2.0, 0.0),
            Vec3::new(0.5, 2.0, 10.0),
            ShapeKind::Wall,
            false,
            "wall",
        )
        .unwrap();
    world
}

#[test]
fn wall_contact_clamps_and_slides() {
    let world = walled_room();
    // Near face at x=9.5; body face starts 0.05 short of it.
    let start = Vec3::new(9.15, 0.0, 0.0);
    let velocity = Vec3::new(0.2, 0.0, 0.15);

    let result = world.move_player(start, velocity, Body::PLAYER);

    assert!(result.collided);
    assert!((result.time_of_impact - 0.25).abs() < 1e-3);
    assert!((result.position.x - 9.2).abs() < 1e-3);
    assert_eq!(result.velocity.x, 0.0);
    assert_eq!(result.velocity.z, 0.15);
    assert_eq!(result.hit_normal, Some(-Vec3::X));
    assert!(result.ground.on_floor());
}

#[test]
fn repeated_ticks_never_pass_through_wall() {
    let world = walled_room();
    let mut position = Vec3::new(5.0, 0.0, 0.0);
    let mut velocity = Vec3::new(1.5, 0.0, 0.05);

    for _ in 0..20 {
        let result = world.slide_move(position, velocity, Body::PLAYER);
        position = result.position;
        velocity = Vec3::new(1.5, 0.0, 0.05);
        assert!(position.x + Body::PLAYER.radius <= 9.5 + 1e-3);
    }
    assert!(position.z > 0.5);
}

#[test]
fn military_base_walkthrough() {
    let mut world = CollisionWorld::new();
    let added = build_military_base(&mut world).unwrap();
    assert_eq!(world.shape_count(), added);

    // Fall from above the spawn point and land on the floor.
    let mut position = PLAYER_SPAWN + Vec3::new(0.0, 0.5, 0.0);
    let mut ground = None;
    for _ in 0..10 {
        let result = world.slide_move(position, Vec3::new(0.0, -0.1, 0.0), Body::PLAYER);
        position = result.position;
        ground = Some(result.ground);
    }
    assert!(ground.is_some_and(|g| g.on_floor()));
    assert!((position.y - PLAYER_SPAWN.y).abs() < 1e-3);

    // The spawn point is open to the sky.
    let eye = position + Vec3::new(0.0, 1.5, 0.0);
    assert!(world.raycast(eye, Vec3::Y, 50.0, CollisionLayer::ALL).is_none());

    // The perimeter holds a body running at it.
    let mut position = Vec3::new(0.0, PLAYER_SPAWN.y, 26.0);
    for _ in 0..30 {
        position = world.slide_move(position, Vec3::new(0.0, -0.01, 0.5), Body::PLAYER).position;
    }
    assert!(position.z + Body::PLAYER.radius <= 30.0 + 1e-3);
}

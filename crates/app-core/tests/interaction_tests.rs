// Grab protocol: nearest-hit selection, attach/release round trips, the
// one-shot hammer attachment, and startup configuration errors.

use app_core::{
    ControllerId, GameConfig, GameError, GameState, InputEvent, Node, NodeId, Scene, Shape,
    Transform, HAMMER_GRIP_OFFSET,
};
use glam::{Quat, Vec3};

const GRAB_HAND: ControllerId = ControllerId(0);
const HAMMER_HAND: ControllerId = ControllerId(1);

fn game() -> GameState {
    GameState::new(GameConfig::default()).expect("default config is valid")
}

fn add_grabbable(scene: &mut Scene, pos: Vec3) -> NodeId {
    let root = scene.root();
    scene.insert(
        root,
        Node::new(Transform::from_translation(pos))
            .with_shape(Shape::Disc { radius: 0.1 }, [1.0, 0.0, 0.0])
            .pickable(true),
    )
}

/// Park the controller high above the table, aiming straight down -Z, so the
/// ray only sees what the test placed in front of it.
fn aim_down_z(game: &mut GameState, id: ControllerId, origin: Vec3) {
    game.set_controller_pose(id, Transform::from_translation(origin));
}

#[test]
fn select_start_grabs_the_nearest_intersected_node() {
    let mut game = game();
    let origin = Vec3::new(0.0, 5.0, 0.0);
    let far = add_grabbable(&mut game.scene, origin + Vec3::new(0.0, 0.0, -2.0));
    let near = add_grabbable(&mut game.scene, origin + Vec3::new(0.0, 0.0, -0.5));
    aim_down_z(&mut game, GRAB_HAND, origin);

    game.handle_event(InputEvent::SelectStart(GRAB_HAND));

    assert_eq!(game.rig.held(GRAB_HAND), Some(near));
    let controller = game.rig.node(GRAB_HAND).unwrap();
    assert_eq!(game.scene.parent(near), Some(controller));
    assert_eq!(game.scene.parent(far), Some(game.scene.root()));
}

#[test]
fn select_start_with_no_intersection_is_a_no_op() {
    let mut game = game();
    // Aiming into empty space far above everything.
    aim_down_z(&mut game, GRAB_HAND, Vec3::new(0.0, 50.0, 0.0));

    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);
}

#[test]
fn release_returns_the_node_to_the_root_without_snapping() {
    let mut game = game();
    let origin = Vec3::new(0.0, 5.0, 0.0);
    let node = add_grabbable(&mut game.scene, origin + Vec3::new(0.0, 0.0, -1.0));
    aim_down_z(&mut game, GRAB_HAND, origin);

    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), Some(node));

    // Drag: the controller moves, the node rides along.
    let moved = Vec3::new(1.0, 5.0, 0.5);
    aim_down_z(&mut game, GRAB_HAND, moved);
    let world_before_release = game.scene.world_transform(node);

    game.handle_event(InputEvent::SelectEnd(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);
    assert_eq!(game.scene.parent(node), Some(game.scene.root()));
    let world_after = game.scene.world_transform(node);
    assert!(world_before_release.abs_diff_eq(world_after, 1e-5));
    let (_, _, t) = world_after.to_scale_rotation_translation();
    assert!((t - (moved + Vec3::new(0.0, 0.0, -1.0))).length() < 1e-4);
}

#[test]
fn unmatched_select_end_is_a_no_op() {
    let mut game = game();
    game.handle_event(InputEvent::SelectEnd(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);

    // And a second one right after a real release.
    let origin = Vec3::new(0.0, 5.0, 0.0);
    add_grabbable(&mut game.scene, origin + Vec3::new(0.0, 0.0, -1.0));
    aim_down_z(&mut game, GRAB_HAND, origin);
    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    game.handle_event(InputEvent::SelectEnd(GRAB_HAND));
    game.handle_event(InputEvent::SelectEnd(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);
}

#[test]
fn hammer_attaches_once_on_connect_with_fixed_grip_offset() {
    let mut game = game();
    let controller = game.rig.node(HAMMER_HAND).unwrap();
    game.set_controller_pose(HAMMER_HAND, Transform::from_translation(Vec3::new(0.5, 1.5, 1.0)));

    game.handle_event(InputEvent::Connected(HAMMER_HAND));
    assert_eq!(game.scene.parent(game.hammer), Some(controller));
    let local = game.scene.node(game.hammer).unwrap().local;
    assert!((local.translation - HAMMER_GRIP_OFFSET).length() < 1e-6);

    // A second connect must not re-attach or reset anything.
    game.scene.set_local(
        game.hammer,
        Transform::from_translation(Vec3::new(9.0, 9.0, 9.0)),
    );
    game.handle_event(InputEvent::Connected(HAMMER_HAND));
    let local = game.scene.node(game.hammer).unwrap().local;
    assert!((local.translation - Vec3::new(9.0, 9.0, 9.0)).length() < 1e-6);

    // The grab hand never claims the hammer.
    let mut fresh = self::game();
    fresh.handle_event(InputEvent::Connected(GRAB_HAND));
    assert_eq!(fresh.scene.parent(fresh.hammer), Some(fresh.scene.root()));
}

#[test]
fn hammer_is_never_selectable() {
    let mut game = game();
    // Aim straight at the resting hammer from in front of it.
    let rest = Vec3::new(-1.5, 1.05, 0.0);
    game.set_controller_pose(GRAB_HAND, Transform::from_translation(rest + Vec3::new(0.0, 0.0, 2.0)));

    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);
    assert_eq!(game.scene.parent(game.hammer), Some(game.scene.root()));
}

#[test]
fn disconnect_force_releases_held_nodes() {
    let mut game = game();
    let origin = Vec3::new(0.0, 5.0, 0.0);
    let node = add_grabbable(&mut game.scene, origin + Vec3::new(0.0, 0.0, -1.0));
    aim_down_z(&mut game, GRAB_HAND, origin);

    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), Some(node));

    game.handle_event(InputEvent::Disconnected(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), None);
    assert_eq!(game.scene.parent(node), Some(game.scene.root()));
}

#[test]
fn grabbed_worms_ride_the_controller_and_expire_after_release() {
    let mut game = game();
    game.frame(0.0);
    assert_eq!(game.worms.live_count(), 1);
    let worm = game.worms.worms()[0].node;

    // Aim straight down at the worm from above.
    let (_, _, worm_pos) = game.scene.world_transform(worm).to_scale_rotation_translation();
    game.set_controller_pose(
        GRAB_HAND,
        Transform {
            translation: worm_pos + Vec3::new(0.0, 2.0, 0.0),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            scale: Vec3::ONE,
        },
    );
    game.handle_event(InputEvent::SelectStart(GRAB_HAND));
    assert_eq!(game.rig.held(GRAB_HAND), Some(worm));

    // Held across what would be its whole lifetime.
    game.frame(10.0);
    assert!(game.worms.worms().iter().any(|w| w.node == worm));

    game.handle_event(InputEvent::SelectEnd(GRAB_HAND));
    game.frame(10.1);
    assert!(game.worms.worms().iter().all(|w| w.node != worm));
    assert!(game.scene.node(worm).is_none());
}

#[test]
fn startup_invariants_are_checked_once() {
    let config = GameConfig {
        holes: Vec::new(),
        ..GameConfig::default()
    };
    assert!(matches!(GameState::new(config), Err(GameError::NoHoles)));

    let config = GameConfig {
        controllers: 1,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameState::new(config),
        Err(GameError::NotEnoughControllers { got: 1 })
    ));
}

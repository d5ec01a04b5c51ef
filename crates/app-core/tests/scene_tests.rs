// Scene-arena behavior: parentage, world transforms, and the attach
// operation's world-transform-preservation guarantee.

use app_core::{Node, Scene, Shape, Transform};
use glam::{Quat, Vec3};

fn shaped(t: Transform) -> Node {
    Node::new(t).with_shape(
        Shape::Cuboid {
            half_extents: Vec3::splat(0.1),
        },
        [1.0, 1.0, 1.0],
    )
}

#[test]
fn world_transform_composes_down_the_parent_chain() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.insert(root, shaped(Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))));
    let b = scene.insert(a, shaped(Transform::from_translation(Vec3::new(0.0, 2.0, 0.0))));

    let world = scene.world_transform(b);
    let (_, _, translation) = world.to_scale_rotation_translation();
    assert!((translation - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn attach_preserves_world_translation_and_rotation() {
    let mut scene = Scene::new();
    let root = scene.root();
    let rot = Quat::from_rotation_y(0.7);
    let parent = scene.insert(
        root,
        shaped(Transform {
            translation: Vec3::new(2.0, 1.0, -3.0),
            rotation: rot,
            scale: Vec3::ONE,
        }),
    );
    let node = scene.insert(
        root,
        shaped(Transform {
            translation: Vec3::new(0.5, 1.5, 0.0),
            rotation: Quat::from_rotation_x(0.3),
            scale: Vec3::ONE,
        }),
    );

    let before = scene.world_transform(node);
    scene.attach(node, parent);
    let after = scene.world_transform(node);
    assert!(before.abs_diff_eq(after, 1e-5), "attach must not move the node in world space");
    assert_eq!(scene.parent(node), Some(parent));

    // And back to the root, again without snapping.
    scene.attach(node, root);
    let restored = scene.world_transform(node);
    assert!(before.abs_diff_eq(restored, 1e-5));
    assert_eq!(scene.parent(node), Some(root));
}

#[test]
fn attach_rejects_cycles_and_root_moves() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.insert(root, shaped(Transform::IDENTITY));
    let b = scene.insert(a, shaped(Transform::IDENTITY));

    // Attaching a node under its own descendant would orphan the subtree.
    scene.attach(a, b);
    assert_eq!(scene.parent(a), Some(root));
    assert_eq!(scene.parent(b), Some(a));

    // The root itself never moves.
    scene.attach(root, a);
    assert_eq!(scene.parent(root), None);
}

#[test]
fn remove_drops_the_whole_subtree() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.insert(root, shaped(Transform::IDENTITY));
    let b = scene.insert(a, shaped(Transform::IDENTITY));

    scene.remove(a);
    assert!(scene.node(a).is_none());
    assert!(scene.node(b).is_none());
    assert!(scene.children(root).is_empty());

    // Stale ids degrade to no-ops.
    scene.remove(a);
    scene.attach(b, root);
}

#[test]
fn insert_under_stale_parent_parks_under_root() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.insert(root, shaped(Transform::IDENTITY));
    scene.remove(a);

    let b = scene.insert(a, shaped(Transform::IDENTITY));
    assert_eq!(scene.parent(b), Some(root));
}

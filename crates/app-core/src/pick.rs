use crate::scene::{NodeId, Scene};
use glam::{Mat4, Vec3};

/// World-space ray used for controller picking.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build the pointing ray from a controller's world transform: origin at
    /// the transform's translation, direction is local -Z rotated into world
    /// space (the translation component is discarded).
    pub fn from_world(world: &Mat4) -> Self {
        let (_, rotation, translation) = world.to_scale_rotation_translation();
        Self {
            origin: translation,
            dir: (rotation * Vec3::NEG_Z).normalize(),
        }
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Test `ray` against the flat set of the root's children; the scene keeps
/// every grabbable object at the top level, so no recursion is needed. Nodes
/// without a shape or with `pickable == false` are skipped. Hits come back
/// sorted nearest-first.
pub fn intersect_scene(scene: &Scene, ray: &Ray) -> Vec<(NodeId, f32)> {
    let mut hits = Vec::new();
    for &id in scene.children(scene.root()) {
        let Some(node) = scene.node(id) else { continue };
        if !node.pickable {
            continue;
        }
        let Some(shape) = node.shape else { continue };
        let (scale, _, center) = scene.world_transform(id).to_scale_rotation_translation();
        let radius = shape.pick_radius() * scale.max_element();
        if let Some(t) = ray_sphere(ray.origin, ray.dir, center, radius) {
            hits.push((id, t));
        }
    }
    hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

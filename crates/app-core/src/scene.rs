//! Scene-node arena shared by the game logic and the renderer.
//!
//! Nodes live in a slotmap keyed by stable [`NodeId`]s, so re-parenting an
//! object between the scene root and a controller never moves its storage.
//! [`Scene::attach`] preserves the node's world transform across the parent
//! change, which is what makes grab-and-release feel continuous.

use glam::{Mat4, Quat, Vec3};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Stable handle to a scene node; survives removals of other nodes.
    pub struct NodeId;
}

/// TRS transform relative to the parent node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_matrix(m: Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Renderable solid attached to a node. Doubles as the pick volume: picking
/// tests against the shape's bounding sphere.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Cuboid { half_extents: Vec3 },
    Cylinder { radius: f32, half_height: f32 },
    Disc { radius: f32 },
}

impl Shape {
    /// Bounding-sphere radius around the node origin (unit node scale).
    pub fn pick_radius(&self) -> f32 {
        match *self {
            Shape::Cuboid { half_extents } => half_extents.length(),
            Shape::Cylinder {
                radius,
                half_height,
            } => (radius * radius + half_height * half_height).sqrt(),
            Shape::Disc { radius } => radius,
        }
    }
}

pub struct Node {
    pub local: Transform,
    pub shape: Option<Shape>,
    pub color: [f32; 3],
    pub pickable: bool,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(local: Transform) -> Self {
        Self {
            local,
            shape: None,
            color: [1.0, 1.0, 1.0],
            pickable: false,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn with_shape(mut self, shape: Shape, color: [f32; 3]) -> Self {
        self.shape = Some(shape);
        self.color = color;
        self
    }

    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Transform::IDENTITY));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Insert `node` as a child of `parent`. Returns the new id; inserting
    /// under a stale parent parks the node under the root instead.
    pub fn insert(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            self.root
        };
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// World transform of `id`, composed root-down. Identity for stale ids.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get(c) else { break };
            m = node.local.matrix() * m;
            cur = node.parent;
        }
        m
    }

    /// Re-parent `id` under `new_parent`, preserving the node's world
    /// transform: its new local transform is recomputed from the old world
    /// transform, so nothing snaps on screen.
    ///
    /// No-op for stale ids, for the root, when the parent is unchanged, or
    /// when the move would create a cycle.
    pub fn attach(&mut self, id: NodeId, new_parent: NodeId) {
        if id == self.root
            || !self.nodes.contains_key(id)
            || !self.nodes.contains_key(new_parent)
            || self.parent(id) == Some(new_parent)
            || self.is_ancestor(id, new_parent)
        {
            return;
        }
        let world = self.world_transform(id);
        let parent_world = self.world_transform(new_parent);
        let new_local = Transform::from_matrix(parent_world.inverse() * world);

        self.unlink(id);
        let node = &mut self.nodes[id];
        node.local = new_local;
        node.parent = Some(new_parent);
        self.nodes[new_parent].children.push(id);
    }

    /// Remove `id` and its whole subtree. Stale ids and the root are no-ops.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.nodes.contains_key(id) {
            return;
        }
        self.unlink(id);
        let mut stack: SmallVec<[NodeId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.remove(cur) {
                stack.extend(node.children);
            }
        }
    }

    pub fn set_local(&mut self, id: NodeId, local: Transform) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.local = local;
        }
    }

    /// True if `ancestor` lies on the parent chain of `id` (or is `id`).
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

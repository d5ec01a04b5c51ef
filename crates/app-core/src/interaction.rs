//! Controller grab protocol and the one-shot hammer attachment.

use crate::constants::{CONTROLLER_COUNT, HAMMER_GRIP_OFFSET, HAMMER_HAND};
use crate::pick::{intersect_scene, Ray};
use crate::scene::{Node, NodeId, Scene, Transform};
use smallvec::SmallVec;

/// Identity of one tracked controller (0 = grabbing hand, 1 = hammer hand).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerId(pub usize);

/// Discrete signals from the immersive input provider. Delivered by the
/// front-end and consumed strictly inside the frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Connected(ControllerId),
    Disconnected(ControllerId),
    SelectStart(ControllerId),
    SelectEnd(ControllerId),
}

/// Per-controller grab state: `Idle -> Holding(node) -> Idle`, driven by
/// matched select-start/select-end pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Grab {
    Idle,
    Holding(NodeId),
}

/// The two tracked controllers and everything attached to them.
pub struct ControllerRig {
    nodes: [NodeId; CONTROLLER_COUNT],
    grabs: [Grab; CONTROLLER_COUNT],
    hammer: NodeId,
    hammer_attached: bool,
}

impl ControllerRig {
    /// Create the controller nodes under the scene root. `hammer` is the node
    /// that will be claimed by the hammer hand on its first connect.
    pub fn new(scene: &mut Scene, hammer: NodeId) -> Self {
        let root = scene.root();
        let nodes =
            [(); CONTROLLER_COUNT].map(|_| scene.insert(root, Node::new(Transform::IDENTITY)));
        Self {
            nodes,
            grabs: [Grab::Idle; CONTROLLER_COUNT],
            hammer,
            hammer_attached: false,
        }
    }

    pub fn node(&self, id: ControllerId) -> Option<NodeId> {
        self.nodes.get(id.0).copied()
    }

    pub fn held(&self, id: ControllerId) -> Option<NodeId> {
        match self.grabs.get(id.0)? {
            Grab::Holding(n) => Some(*n),
            Grab::Idle => None,
        }
    }

    /// Nodes currently parented to a controller; the worm lifecycle exempts
    /// these from animation and expiry.
    pub fn held_nodes(&self) -> SmallVec<[NodeId; CONTROLLER_COUNT]> {
        self.grabs
            .iter()
            .filter_map(|g| match g {
                Grab::Holding(n) => Some(*n),
                Grab::Idle => None,
            })
            .collect()
    }

    /// Pose update from the input provider, once per frame per controller.
    pub fn set_pose(&self, scene: &mut Scene, id: ControllerId, pose: Transform) {
        if let Some(node) = self.node(id) {
            scene.set_local(node, pose);
        }
    }

    /// Connect event. The hammer hand claims the hammer exactly once: the
    /// hammer is re-parented under the controller at a fixed grip offset and
    /// never released (it is not part of the grab protocol).
    pub fn on_connected(&mut self, scene: &mut Scene, id: ControllerId) {
        if id.0 != HAMMER_HAND || self.hammer_attached {
            return;
        }
        let Some(controller) = self.node(id) else {
            return;
        };
        scene.attach(self.hammer, controller);
        scene.set_local(self.hammer, Transform::from_translation(HAMMER_GRIP_OFFSET));
        self.hammer_attached = true;
        log::info!("[rig] hammer attached to controller {}", id.0);
    }

    /// Disconnect event: anything the controller holds goes back to the scene
    /// root so no node is left under a pose source that stopped updating.
    pub fn on_disconnected(&mut self, scene: &mut Scene, id: ControllerId) {
        self.on_select_end(scene, id);
    }

    /// Select-start: cast the controller's pointing ray into the scene and
    /// grab the nearest intersected node, if any. Already-holding controllers
    /// and empty casts are no-ops.
    pub fn on_select_start(&mut self, scene: &mut Scene, id: ControllerId) -> Option<NodeId> {
        let slot = id.0;
        if slot >= CONTROLLER_COUNT || self.grabs[slot] != Grab::Idle {
            return None;
        }
        let controller = self.nodes[slot];
        let ray = Ray::from_world(&scene.world_transform(controller));
        let (node, distance) = intersect_scene(scene, &ray).into_iter().next()?;
        scene.attach(node, controller);
        self.grabs[slot] = Grab::Holding(node);
        log::info!("[rig] controller {} grabbed node at t={:.3}", slot, distance);
        Some(node)
    }

    /// Select-end: release the held node back under the scene root, keeping
    /// its world transform. Unmatched select-ends are no-ops.
    pub fn on_select_end(&mut self, scene: &mut Scene, id: ControllerId) -> Option<NodeId> {
        let slot = id.0;
        if slot >= CONTROLLER_COUNT {
            return None;
        }
        match self.grabs[slot] {
            Grab::Holding(node) => {
                let root = scene.root();
                scene.attach(node, root);
                self.grabs[slot] = Grab::Idle;
                log::info!("[rig] controller {} released node", slot);
                Some(node)
            }
            Grab::Idle => None,
        }
    }
}

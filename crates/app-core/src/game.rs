//! Scene construction and the per-frame entry point.

use crate::constants::*;
use crate::interaction::{ControllerId, ControllerRig, InputEvent};
use crate::scene::{Node, NodeId, Scene, Shape, Transform};
use crate::worms::{Hole, WormField, WormParams};
use glam::{Quat, Vec3};
use thiserror::Error;

/// Startup invariant violations. Reported once from [`GameState::new`];
/// nothing per-frame can produce these.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("scene configuration has no worm holes")]
    NoHoles,
    #[error("need {CONTROLLER_COUNT} tracked controllers, input provider reports {got}")]
    NotEnoughControllers { got: usize },
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub holes: Vec<Hole>,
    /// Number of pose sources the input provider exposes.
    pub controllers: usize,
    pub worms: WormParams,
    pub seed: u64,
}

impl GameConfig {
    /// The reference layout: a 3x3 hole grid on the tabletop.
    pub fn default_holes() -> Vec<Hole> {
        let mut holes = Vec::with_capacity(9);
        for i in -1..=1 {
            for j in -1..=1 {
                holes.push(Hole::new(Vec3::new(
                    i as f32 * HOLE_GRID_STEP,
                    TABLE_Y + HOLE_LIFT,
                    j as f32 * HOLE_GRID_STEP,
                )));
            }
        }
        holes
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            holes: Self::default_holes(),
            controllers: CONTROLLER_COUNT,
            worms: WormParams::default(),
            seed: 42,
        }
    }
}

/// Whole game: scene graph, hole layout, worm lifecycle and controller rig.
/// Single-threaded; every mutation happens inside the frame callback.
pub struct GameState {
    pub scene: Scene,
    pub holes: Vec<Hole>,
    pub worms: WormField,
    pub rig: ControllerRig,
    pub hammer: NodeId,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        if config.holes.is_empty() {
            return Err(GameError::NoHoles);
        }
        if config.controllers < CONTROLLER_COUNT {
            return Err(GameError::NotEnoughControllers {
                got: config.controllers,
            });
        }

        let mut scene = Scene::new();
        build_furniture(&mut scene, &config.holes);
        let hammer = build_hammer(&mut scene);
        let rig = ControllerRig::new(&mut scene, hammer);

        log::info!(
            "[game] scene ready: {} holes, cap {}, spawn interval {:.2}s",
            config.holes.len(),
            config.worms.max_live,
            config.worms.spawn_interval_sec
        );

        Ok(Self {
            scene,
            holes: config.holes,
            worms: WormField::new(config.worms, config.seed),
            rig,
            hammer,
        })
    }

    /// Once per rendered frame: advance the worm lifecycle to `now`.
    pub fn frame(&mut self, now: f64) {
        let held = self.rig.held_nodes();
        self.worms.update(&mut self.scene, now, &self.holes, &held);
    }

    /// Feed one input-provider event through the rig.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Connected(id) => self.rig.on_connected(&mut self.scene, id),
            InputEvent::Disconnected(id) => self.rig.on_disconnected(&mut self.scene, id),
            InputEvent::SelectStart(id) => {
                self.rig.on_select_start(&mut self.scene, id);
            }
            InputEvent::SelectEnd(id) => {
                self.rig.on_select_end(&mut self.scene, id);
            }
        }
    }

    pub fn set_controller_pose(&mut self, id: ControllerId, pose: Transform) {
        self.rig.set_pose(&mut self.scene, id, pose);
    }
}

fn build_furniture(scene: &mut Scene, holes: &[Hole]) {
    let root = scene.root();

    // Tabletop
    scene.insert(
        root,
        Node::new(Transform::from_translation(Vec3::new(0.0, TABLE_Y, 0.0))).with_shape(
            Shape::Cuboid {
                half_extents: TABLE_HALF_EXTENTS,
            },
            TABLE_COLOR,
        ),
    );

    // Hole discs, face-up on the table surface
    for hole in holes {
        scene.insert(
            root,
            Node::new(Transform {
                translation: hole.position,
                rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
                scale: Vec3::ONE,
            })
            .with_shape(
                Shape::Disc {
                    radius: HOLE_RADIUS,
                },
                HOLE_COLOR,
            ),
        );
    }

    // Floor
    scene.insert(
        root,
        Node::new(Transform::IDENTITY).with_shape(
            Shape::Cuboid {
                half_extents: Vec3::new(FLOOR_HALF, 0.01, FLOOR_HALF),
            },
            FLOOR_COLOR,
        ),
    );
}

/// Handle cylinder with the head cuboid as a child node, resting beside the
/// table until the hammer hand connects. Never pickable.
fn build_hammer(scene: &mut Scene) -> NodeId {
    let root = scene.root();
    let handle = scene.insert(
        root,
        Node::new(Transform::from_translation(HAMMER_REST_POSITION)).with_shape(
            Shape::Cylinder {
                radius: HAMMER_HANDLE_RADIUS,
                half_height: HAMMER_HANDLE_LEN / 2.0,
            },
            TABLE_COLOR,
        ),
    );
    scene.insert(
        handle,
        Node::new(Transform::from_translation(Vec3::new(
            0.0,
            HAMMER_HEAD_OFFSET_Y,
            0.0,
        )))
        .with_shape(
            Shape::Cuboid {
                half_extents: HAMMER_HEAD_HALF_EXTENTS,
            },
            HAMMER_HEAD_COLOR,
        ),
    );
    handle
}

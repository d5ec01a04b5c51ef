//! Worm lifecycle: spawn scheduling, rise/sink animation, expiry.

use crate::constants::*;
use crate::scene::{Node, NodeId, Scene, Shape, Transform};
use glam::{Quat, Vec3};
use rand::prelude::*;

/// Fixed position on the tabletop where worms appear.
#[derive(Clone, Copy, Debug)]
pub struct Hole {
    pub position: Vec3,
}

impl Hole {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Lifecycle tuning. `Default` carries the reference values.
#[derive(Clone, Debug)]
pub struct WormParams {
    pub spawn_interval_sec: f64,
    pub max_live: usize,
    pub rise_sec: f64,
    pub fall_sec: f64,
    pub body_height: f32,
}

impl WormParams {
    /// Total time a worm stays in the scene before it is retired.
    pub fn visible_sec(&self) -> f64 {
        self.rise_sec + self.fall_sec
    }
}

impl Default for WormParams {
    fn default() -> Self {
        Self {
            spawn_interval_sec: SPAWN_INTERVAL_SEC,
            max_live: MAX_LIVE_WORMS,
            rise_sec: WORM_RISE_SEC,
            fall_sec: WORM_FALL_SEC,
            body_height: WORM_HEIGHT,
        }
    }
}

/// Vertical offset from the hole as a pure function of worm age.
///
/// Rises linearly from `-0.7 * height` to `+0.3 * height` over `rise_sec`,
/// then sinks back symmetrically over `fall_sec`. The 0.7/0.3 split keeps the
/// resting worm mostly hidden and the peaked worm mostly exposed.
pub fn worm_y_offset(age_sec: f64, params: &WormParams) -> f32 {
    let progress = if age_sec <= params.rise_sec {
        age_sec / params.rise_sec
    } else {
        (params.visible_sec() - age_sec) / params.fall_sec
    };
    params.body_height * progress as f32 - WORM_REST_FRAC * params.body_height
}

#[derive(Clone, Copy, Debug)]
pub struct Worm {
    pub node: NodeId,
    pub spawn_time: f64,
    pub hole: Vec3,
}

/// Owns the live worm set and the spawn schedule. Driven once per rendered
/// frame via [`WormField::update`].
pub struct WormField {
    pub params: WormParams,
    worms: Vec<Worm>,
    last_spawn: f64,
    rng: StdRng,
}

impl WormField {
    pub fn new(params: WormParams, seed: u64) -> Self {
        Self {
            params,
            worms: Vec::new(),
            // Negative infinity so the first eligible update spawns right away.
            last_spawn: f64::NEG_INFINITY,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn worms(&self) -> &[Worm] {
        &self.worms
    }

    pub fn live_count(&self) -> usize {
        self.worms.len()
    }

    /// Advance the lifecycle to `now` (seconds on the frame clock).
    ///
    /// Spawns at most one worm per call, then animates or retires every live
    /// worm. Nodes listed in `held` are currently parented to a controller:
    /// they are neither animated nor retired until released.
    pub fn update(&mut self, scene: &mut Scene, now: f64, holes: &[Hole], held: &[NodeId]) {
        if now - self.last_spawn >= self.params.spawn_interval_sec
            && self.worms.len() < self.params.max_live
        {
            if let Some(hole) = holes.choose(&mut self.rng) {
                self.spawn(scene, now, hole.position);
                self.last_spawn = now;
            }
        }

        let params = self.params.clone();
        self.worms.retain(|worm| {
            if held.contains(&worm.node) {
                return true;
            }
            let age = now - worm.spawn_time;
            if age > params.visible_sec() {
                scene.remove(worm.node);
                return false;
            }
            // Only y follows the animation law; x/z stay wherever the worm
            // last was (it may have been grabbed and dropped off its hole).
            if let Some(node) = scene.node_mut(worm.node) {
                node.local.translation.y = worm.hole.y + worm_y_offset(age, &params);
            }
            true
        });
    }

    fn spawn(&mut self, scene: &mut Scene, now: f64, hole: Vec3) {
        let start = Vec3::new(
            hole.x,
            hole.y + worm_y_offset(0.0, &self.params),
            hole.z,
        );
        let node = Node::new(Transform {
            translation: start,
            rotation: Quat::from_rotation_x(std::f32::consts::PI),
            scale: Vec3::ONE,
        })
        .with_shape(
            Shape::Cylinder {
                radius: WORM_RADIUS,
                half_height: WORM_BODY_LEN / 2.0,
            },
            WORM_COLOR,
        )
        .pickable(true);
        let root = scene.root();
        let id = scene.insert(root, node);
        log::debug!("[worms] spawn at ({:.2},{:.2},{:.2})", hole.x, hole.y, hole.z);
        self.worms.push(Worm {
            node: id,
            spawn_time: now,
            hole,
        });
    }
}

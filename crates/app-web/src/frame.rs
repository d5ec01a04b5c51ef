use crate::camera;
use crate::events::WAND;
use crate::input;
use crate::render;
use app_core::{GameState, InputEvent, NodeId, Scene, Shape};
use glam::{Mat4, Vec3};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub game: Rc<RefCell<GameState>>,
    pub paused: Rc<RefCell<bool>>,
    pub pending: Rc<RefCell<Vec<InputEvent>>>,
    pub mouse: Rc<RefCell<input::MouseState>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    pub clock_sec: f64,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let paused = *self.paused.borrow();
        if !paused {
            // The game clock only runs while the overlay is dismissed, so
            // worms do not burst out after a long pause.
            self.clock_sec += dt.as_secs_f64();
        }

        let events: Vec<InputEvent> = self.pending.borrow_mut().drain(..).collect();
        let mut game = self.game.borrow_mut();

        // The wand controller tracks the latest pointer ray.
        let ms = *self.mouse.borrow();
        let (ro, rd) = camera::screen_to_world_ray(&self.canvas, ms.x, ms.y);
        game.set_controller_pose(WAND, input::wand_pose(ro, rd));

        for ev in events {
            game.handle_event(ev);
        }
        if !paused {
            game.frame(self.clock_sec);
        }

        if let Some(g) = &mut self.gpu {
            let instances = gather_instances(&game.scene);
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&instances) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Flatten the scene into draw instances: every shaped node becomes a unit
/// cube scaled to the shape's bounds under the node's world transform.
fn gather_instances(scene: &Scene) -> Vec<render::Instance> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = scene.children(scene.root()).to_vec();
    while let Some(id) = stack.pop() {
        stack.extend_from_slice(scene.children(id));
        let Some(node) = scene.node(id) else { continue };
        let Some(shape) = node.shape else { continue };
        let bounds = match shape {
            Shape::Cuboid { half_extents } => half_extents,
            Shape::Cylinder {
                radius,
                half_height,
            } => Vec3::new(radius, half_height, radius),
            Shape::Disc { radius } => Vec3::new(radius, radius, 0.004),
        };
        let model = scene.world_transform(id) * Mat4::from_scale(bounds);
        out.push(render::Instance::new(model, node.color));
    }
    out
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

#![cfg(target_arch = "wasm32")]
use crate::constants::HAMMER_HAND_POSE;
use app_core::{ControllerId, GameConfig, GameState, InputEvent, Transform};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio, so the surface renders at native resolution.
fn fit_canvas_backing(canvas: &web::HtmlCanvasElement) {
    let Some(window) = web::window() else { return };
    let dpr = window.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    canvas.set_width(((rect.width() * dpr) as u32).max(1));
    canvas.set_height(((rect.height() * dpr) as u32).max(1));
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    fit_canvas_backing(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        fit_canvas_backing(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_overlay_buttons(paused: &Rc<RefCell<bool>>) {
    for id in ["overlay-ok", "overlay-close"] {
        let paused = paused.clone();
        events::wire_click(id, move || {
            *paused.borrow_mut() = false;
            overlay::hide();
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // Startup invariants are checked exactly once; a bad configuration halts
    // init here instead of failing every frame.
    let game = GameState::new(GameConfig::default())
        .map_err(|e| anyhow::anyhow!("game setup: {e}"))?;
    let game = Rc::new(RefCell::new(game));

    // The emulated hammer hand is present from the start: report it connected
    // and park it beside the camera. The event is drained on the first frame.
    let pending: Rc<RefCell<Vec<InputEvent>>> = Rc::new(RefCell::new(vec![InputEvent::Connected(
        ControllerId(app_core::HAMMER_HAND),
    )]));
    game.borrow_mut().set_controller_pose(
        ControllerId(app_core::HAMMER_HAND),
        Transform::from_translation(HAMMER_HAND_POSE),
    );

    let paused = Rc::new(RefCell::new(true));
    wire_overlay_buttons(&paused);
    events::wire_global_keydown(canvas.clone());

    let mouse_state = Rc::new(RefCell::new(input::MouseState::default()));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        mouse_state: mouse_state.clone(),
        pending: pending.clone(),
    });

    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        game,
        paused,
        pending,
        mouse: mouse_state,
        canvas,
        gpu,
        last_instant: Instant::now(),
        clock_sec: 0.0,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}

//! DOM event wiring. Handlers only record state or queue [`InputEvent`]s;
//! everything is consumed inside the frame callback, never concurrently
//! with it.

use crate::input;
use app_core::{ControllerId, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The pointer stands in for the grabbing controller.
pub const WAND: ControllerId = ControllerId(0);

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub mouse_state: Rc<RefCell<input::MouseState>>,
    pub pending: Rc<RefCell<Vec<InputEvent>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

/// Attach a click handler to the element with `element_id`, if it exists.
pub fn wire_click(element_id: &str, mut handler: impl FnMut() + 'static) {
    let Some(el) = web::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    else {
        return;
    };
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let mut ms = w.mouse_state.borrow_mut();
        ms.x = pos.x;
        ms.y = pos.y;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.pending.borrow_mut().push(InputEvent::SelectStart(WAND));
        w.mouse_state.borrow_mut().down = true;
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.pending.borrow_mut().push(InputEvent::SelectEnd(WAND));
        w.mouse_state.borrow_mut().down = false;
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_global_keydown(canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                let doc = web::window().and_then(|w| w.document());
                match ev.key().as_str() {
                    "h" | "H" => {
                        crate::overlay::toggle();
                        ev.prevent_default();
                    }
                    "Enter" => {
                        if let Some(doc) = doc {
                            if doc.fullscreen_element().is_some() {
                                let _ = doc.exit_fullscreen();
                            } else {
                                let _ = canvas.request_fullscreen();
                            }
                        }
                        ev.prevent_default();
                    }
                    "Escape" => {
                        if let Some(doc) = doc {
                            let _ = doc.exit_fullscreen();
                        }
                    }
                    _ => {}
                }
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

//! Start overlay: shown until the player dismisses it, toggled with 'h'.

use web_sys as web;

fn panel() -> Option<web::Element> {
    web::window()?.document()?.get_element_by_id("start-overlay")
}

pub fn show() {
    if let Some(el) = panel() {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

pub fn hide() {
    if let Some(el) = panel() {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn is_hidden() -> bool {
    let Some(el) = panel() else { return false };
    if el.class_list().contains("hidden") {
        return true;
    }
    el.get_attribute("style")
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

pub fn toggle() {
    if is_hidden() {
        show();
    } else {
        hide();
    }
}

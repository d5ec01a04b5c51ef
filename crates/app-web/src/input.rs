use app_core::Transform;
use glam::{Quat, Vec2, Vec3};
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Pose of the emulated wand controller: sitting at the ray origin, rotated
/// so its local -Z pointing axis runs along the ray.
#[inline]
pub fn wand_pose(ray_origin: Vec3, ray_dir: Vec3) -> Transform {
    Transform {
        translation: ray_origin,
        rotation: Quat::from_rotation_arc(Vec3::NEG_Z, ray_dir),
        scale: Vec3::ONE,
    }
}

use crate::constants::{CAMERA_EYE, CAMERA_FOVY, CAMERA_TARGET, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec3, Vec4};
use web_sys as web;

#[inline]
pub fn view_proj(aspect: f32) -> Mat4 {
    let proj = Mat4::perspective_rh(CAMERA_FOVY, aspect, CAMERA_ZNEAR, CAMERA_ZFAR);
    let view = Mat4::look_at_rh(CAMERA_EYE, CAMERA_TARGET, Vec3::Y);
    proj * view
}

/// Compute a world-space ray from screen-space canvas coordinates.
///
/// - `canvas`: target canvas to derive dimensions/aspect
/// - `sx`, `sy`: pixel coordinates in the canvas' backing store space
///
/// Returns `(ray_origin, ray_direction)` in world space, under the app's
/// fixed camera.
pub fn screen_to_world_ray(canvas: &web::HtmlCanvasElement, sx: f32, sy: f32) -> (Vec3, Vec3) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let aspect = width / height.max(1.0);
    let inv = view_proj(aspect).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = CAMERA_EYE;
    let rd = (p1 - ro).normalize();
    (ro, rd)
}

use glam::Vec3;

// Fixed camera matching the original desktop view of the table.
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 1.6, 3.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.6, 0.0);
pub const CAMERA_FOVY: f32 = 50.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Where the emulated hammer hand sits, just right of the camera.
pub const HAMMER_HAND_POSE: Vec3 = Vec3::new(0.3, 1.3, 2.5);

// Background, close to the original's 0x505050 fog-grey.
pub const CLEAR_COLOR: [f64; 4] = [0.18, 0.19, 0.21, 1.0];

use glam::Vec3;

// Reference tuning constants for the whack-a-worm scene. Geometry sizes and
// colors mirror the original table layout; durations drive the worm lifecycle.

// Worm lifecycle
pub const SPAWN_INTERVAL_SEC: f64 = 1.0; // minimum gap between spawns
pub const MAX_LIVE_WORMS: usize = 2; // concurrency cap
pub const WORM_RISE_SEC: f64 = 1.5;
pub const WORM_FALL_SEC: f64 = 1.5;
pub const WORM_HEIGHT: f32 = 0.45; // travel range / rest depth below the hole
pub const WORM_REST_FRAC: f32 = 0.7; // share of the travel hidden at rest

// Worm body
pub const WORM_RADIUS: f32 = 0.05;
pub const WORM_BODY_LEN: f32 = 0.3;

// Table and holes
pub const TABLE_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.05, 1.0);
pub const TABLE_Y: f32 = 1.0;
pub const HOLE_RADIUS: f32 = 0.1;
pub const HOLE_GRID_STEP: f32 = 0.6; // 3x3 grid spacing on the tabletop
pub const HOLE_LIFT: f32 = 0.051; // just above the table surface

// Floor
pub const FLOOR_HALF: f32 = 5.0;

// Hammer
pub const HAMMER_HANDLE_RADIUS: f32 = 0.05;
pub const HAMMER_HANDLE_LEN: f32 = 0.7;
pub const HAMMER_HEAD_HALF_EXTENTS: Vec3 = Vec3::new(0.1, 0.05, 0.05);
pub const HAMMER_HEAD_OFFSET_Y: f32 = 0.35; // head sits at the handle tip
pub const HAMMER_REST_POSITION: Vec3 = Vec3::new(-1.5, 1.05, 0.0);
pub const HAMMER_GRIP_OFFSET: Vec3 = Vec3::new(0.0, -0.1, 0.05); // local, once attached

// Controllers
pub const CONTROLLER_COUNT: usize = 2;
pub const HAMMER_HAND: usize = 1; // the original's right-hand controller

// Palette
pub const TABLE_COLOR: [f32; 3] = [0.545, 0.271, 0.075];
pub const HOLE_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const FLOOR_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
pub const WORM_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const HAMMER_HEAD_COLOR: [f32; 3] = [0.333, 0.333, 0.333];

use glam::Vec3;

// Shared layout/animation tuning constants used by the core and the web frontend.

// Parameter defaults
pub const DEFAULT_BACKGROUND_COLOR: u32 = 0x723bf2;
pub const DEFAULT_TEXT_COLOR: u32 = 0xe85eb0;
pub const DEFAULT_NB_TEXT: u32 = 10;
pub const DEFAULT_MESSAGE: &str = "Infinite Loop";
pub const DEFAULT_Z_SPEED: f32 = -1.0;
pub const DEFAULT_Z_CAMERA: f32 = 2.0;

// Control ranges (inclusive)
pub const NB_TEXT_MIN: u32 = 10;
pub const NB_TEXT_MAX: u32 = 25;
pub const Z_SPEED_MIN: f32 = -10.0;
pub const Z_SPEED_MAX: f32 = 0.0;
pub const Z_CAMERA_MIN: f32 = 0.0;
pub const Z_CAMERA_MAX: f32 = 10.0;
pub const MESSAGE_MAX_CHARS: usize = 75;

// Scene layout
pub const RECYCLE_DEPTH: f32 = 20.0; // instances respawn once they pass z = -RECYCLE_DEPTH
pub const SCALE_Z: f32 = 0.05; // flattened extrusion depth of every instance

// Per-direction rotation axes: top, bottom, left, right
pub const TOP_AXIS: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const BOTTOM_AXIS: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
pub const LEFT_AXIS: Vec3 = Vec3::new(0.0, 0.0, -1.0);
pub const RIGHT_AXIS: Vec3 = Vec3::new(0.0, 0.0, 1.0);

// Per-direction unit base positions, scaled by the text bounding width
pub const TOP_BASE: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BOTTOM_BASE: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const LEFT_BASE: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
pub const RIGHT_BASE: Vec3 = Vec3::new(1.0, 0.0, 0.0);

// Text extrusion (world units)
pub const TEXT_SIZE: f32 = 0.5; // em height
pub const TEXT_DEPTH: f32 = 0.2; // extrusion along z
pub const TEXT_TOLERANCE: f32 = 0.002; // curve flattening tolerance

// Orbit camera
pub const ORBIT_MIN_RADIUS: f32 = 0.01; // look_at needs eye != target
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01; // stay off the poles

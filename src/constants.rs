/// Front-end tuning constants.
///
/// Parameter defaults and ranges live in `typeloop_core::constants`; these
/// cover the page, the camera lens, lighting, and frame pacing.
// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "panel";

// Font asset fetched at startup, relative to the page
pub const FONT_URL: &str = "fonts/DejaVuSans.ttf";

// Camera lens (position comes from the z-camera parameter)
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Point light
pub const POINT_LIGHT_COLOR: u32 = 0xf794ca;
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_RANGE: f32 = 25.0;
pub const POINT_LIGHT_POS: [f32; 3] = [0.0, 0.0, 1.0];

// Ambient light
pub const AMBIENT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.75;

// Frame pacing: a long pause (hidden tab, debugger) must not teleport every
// instance through several recycles at once
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Backing store resolution cap
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Instance buffer starts with room for the largest layout (4 directions x 25)
pub const INITIAL_INSTANCE_CAPACITY: usize = 100;

// Panel slider granularity
pub const SPEED_STEP: f32 = 0.1;
pub const CAMERA_STEP: f32 = 0.1;

// Wheel zoom: camera depth change per wheel event
pub const WHEEL_ZOOM_STEP: f32 = 0.25;

// Scene layout, animation and camera tuning shared by the web frontend and host tests.

// Donut field
pub const DONUT_COUNT: usize = 100;
pub const DONUT_SPREAD: f32 = 10.0; // positions span [-SPREAD/2, SPREAD/2] per axis
pub const DONUT_MAX_INITIAL_SCALE: f32 = 0.5; // exclusive upper bound

// Torus geometry shared by every donut
pub const TORUS_RADIUS: f32 = 0.3;
pub const TORUS_TUBE: f32 = 0.2;
pub const TORUS_RADIAL_SEGMENTS: u32 = 20;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 45;

// Per-frame animation
pub const ROTATION_STEP: f32 = 0.01; // radians per frame
pub const FREQUENCY_SCALE_DIVISOR: f32 = 192.0; // scale factor = 1 + magnitude / divisor
pub const ANALYSER_BINS: usize = 32;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 3.5;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.01;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Title text
pub const TITLE_TEXT: &str = "Developed by Exclsv";
pub const TEXT_SIZE: f32 = 0.5;
pub const TEXT_DEPTH: f32 = 0.1;
pub const TEXT_CURVE_SEGMENTS: u32 = 6;
pub const TEXT_BEVEL_THICKNESS: f32 = 0.03;
pub const TEXT_BEVEL_SIZE: f32 = 0.02;
pub const TEXT_BEVEL_OFFSET: f32 = 0.0;
pub const TEXT_BEVEL_SEGMENTS: u32 = 4;

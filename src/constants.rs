// Web frontend settings: DOM hooks, asset locations, audio levels.

// DOM
pub const CANVAS_SELECTOR: &str = ".webgl";
pub const START_OVERLAY_ID: &str = "start-overlay";

// Assets, fetched relative to the page
pub const MATCAP_TEXTURE_PATH: &str = "textures/matcaps/4.png";
pub const FONT_PATH: &str = "fonts/helvetiker_regular.typeface.json";
pub const AUDIO_PATH: &str = "Teddy Swims The Door.mp3";

// Audio
pub const AUDIO_VOLUME: f32 = 0.4;
pub const AUDIO_LOOP: bool = true;

// Rendering
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub const DEFAULT_MATCAP_RGBA: [u8; 4] = [200, 200, 200, 255]; // shown until the matcap loads

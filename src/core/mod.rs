pub mod camera;
pub mod constants;
pub mod font;
pub mod geometry;
pub mod scene;
pub mod text;
pub mod triangulate;
pub mod viewport;

pub use camera::*;
pub use constants::*;
pub use font::{FontError, Shape, Typeface};
pub use geometry::*;
pub use scene::*;
pub use text::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static MATCAP_WGSL: &str = include_str!("../shaders/matcap.wgsl");

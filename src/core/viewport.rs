// Viewport sizing: CSS size, clamped device pixel ratio and backing buffer size.
use super::camera::Camera;
use super::constants::MAX_PIXEL_RATIO;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// CSS pixels.
    pub width: f64,
    pub height: f64,
    /// Device pixel ratio clamped to [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Output size in CSS pixels.
    #[inline]
    pub fn output_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Backing buffer size in device pixels, never zero.
    #[inline]
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            ((self.width * self.pixel_ratio).floor() as u32).max(1),
            ((self.height * self.pixel_ratio).floor() as u32).max(1),
        )
    }

    /// Match the camera to this viewport and refresh its projection.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.aspect = self.aspect();
        camera.update_projection_matrix();
    }
}

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

// Host-side tests for the perspective camera, orbit controls and viewport sync.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod viewport {
    include!("../src/core/viewport.rs");
}

use camera::*;
use constants::*;
use glam::{Mat4, Vec3};
use viewport::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn default_camera_looks_at_origin() {
    let cam = Camera::scene_default(1.5);
    assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 3.5));
    assert_eq!(cam.target, Vec3::ZERO);
    assert!(approx(cam.fovy_radians, 75f32.to_radians(), 1e-6));
    let expected = Mat4::perspective_rh(75f32.to_radians(), 1.5, 0.1, 100.0);
    assert_eq!(cam.projection_matrix(), expected);
}

#[test]
fn idle_update_reports_no_motion() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    assert!(!controls.update(&mut cam));
}

#[test]
fn damped_rotation_applies_a_fraction_first() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    controls.rotate_left(0.5);
    assert!(controls.update(&mut cam));
    let theta = Spherical::from_offset(cam.eye - cam.target).theta;
    assert!(approx(theta, -0.5 * ORBIT_DAMPING_FACTOR, 1e-5));
}

#[test]
fn damped_rotation_converges_on_full_delta() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    controls.rotate_left(0.5);
    for _ in 0..3000 {
        controls.update(&mut cam);
    }
    let s = Spherical::from_offset(cam.eye - cam.target);
    assert!(approx(s.theta, -0.5, 1e-3), "theta {}", s.theta);
    assert!(approx(s.radius, CAMERA_Z, 1e-4));
}

#[test]
fn polar_angle_is_clamped() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    controls.enable_damping = false;
    controls.rotate_up(10.0);
    controls.update(&mut cam);
    assert!(cam.eye.is_finite());
    assert!(cam.eye.y > CAMERA_Z - 1e-3);
    assert!(approx((cam.eye - cam.target).length(), CAMERA_Z, 1e-4));
}

#[test]
fn wheel_dollies_by_fixed_ratio() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    controls.dolly_wheel(-100.0);
    controls.update(&mut cam);
    assert!(approx(cam.eye.length(), CAMERA_Z * 0.95, 1e-4));

    controls.dolly_wheel(100.0);
    controls.update(&mut cam);
    assert!(approx(cam.eye.length(), CAMERA_Z, 1e-4));
}

#[test]
fn pan_moves_target_and_eye_together() {
    let mut cam = Camera::scene_default(1.0);
    let mut controls = OrbitControls::new(cam.target);
    controls.enable_damping = false;
    controls.pan_drag(100.0, 0.0, 600.0, &cam);
    controls.update(&mut cam);
    assert!(cam.target.x < 0.0);
    assert!(approx(cam.eye.x, cam.target.x, 1e-5));
    assert!(approx(cam.eye.z, CAMERA_Z, 1e-5));
}

#[test]
fn spherical_round_trip() {
    let v = Vec3::new(1.0, 2.0, -0.5);
    let back = Spherical::from_offset(v).to_offset();
    assert!((back - v).length() < 1e-5);
}

#[test]
fn viewport_clamps_pixel_ratio() {
    let vp = Viewport::new(800.0, 600.0, 3.0);
    assert_eq!(vp.pixel_ratio, 2.0);
    assert_eq!(vp.output_size(), (800, 600));
    assert_eq!(vp.buffer_size(), (1600, 1200));
    assert!(approx(vp.aspect(), 800.0 / 600.0, 1e-6));

    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
}

#[test]
fn viewport_resize_updates_camera() {
    let mut cam = Camera::scene_default(1.0);
    let vp = Viewport::new(1280.0, 720.0, 1.0);
    vp.apply_to(&mut cam);
    assert!(approx(cam.aspect, 1280.0 / 720.0, 1e-6));
    let expected = Mat4::perspective_rh(cam.fovy_radians, cam.aspect, cam.znear, cam.zfar);
    assert_eq!(cam.projection_matrix(), expected);

    // same size again is a no-op
    vp.apply_to(&mut cam);
    assert_eq!(cam.projection_matrix(), expected);
}

#[test]
fn degenerate_viewport_stays_drawable() {
    let vp = Viewport::new(0.0, 0.0, 1.0);
    assert_eq!(vp.aspect(), 1.0);
    assert_eq!(vp.buffer_size(), (1, 1));
}

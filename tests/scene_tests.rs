// Host-side tests for donut population and the per-frame animation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod geometry {
    include!("../src/core/geometry.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}

use constants::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::*;

fn seeded_scene() -> SceneState {
    let mut rng = StdRng::seed_from_u64(7);
    SceneState::build(SceneConfig::default(), 16.0 / 9.0, &mut rng)
}

fn ramp_snapshot() -> FrequencySnapshot {
    FrequencySnapshot::new((0..ANALYSER_BINS).map(|i| (i * 8) as u8).collect())
}

#[test]
fn population_respects_ranges() {
    let scene = seeded_scene();
    assert_eq!(scene.donuts.len(), DONUT_COUNT);
    let pi = std::f32::consts::PI;
    for d in &scene.donuts {
        let p = d.transform.position;
        for c in [p.x, p.y, p.z] {
            assert!((-5.0..=5.0).contains(&c), "position {c} out of range");
        }
        let r = d.transform.rotation;
        assert!((0.0..=pi).contains(&r.x));
        assert!((0.0..=pi).contains(&r.y));
        assert_eq!(r.z, 0.0);
        let s = d.initial_scale;
        assert!(s.x >= 0.0 && s.x < DONUT_MAX_INITIAL_SCALE);
        assert_eq!(s.x, s.y);
        assert_eq!(s.y, s.z);
        assert_eq!(d.transform.scale, s);
    }
}

#[test]
fn same_seed_same_field() {
    let a = seeded_scene();
    let b = seeded_scene();
    assert_eq!(a.donuts, b.donuts);
}

#[test]
fn silent_snapshot_keeps_initial_scale() {
    let mut scene = seeded_scene();
    let silence = FrequencySnapshot::silent(ANALYSER_BINS);
    for _ in 0..3 {
        scene.tick(&silence);
    }
    for d in &scene.donuts {
        assert_eq!(d.transform.scale, d.initial_scale);
    }
}

#[test]
fn scale_tracks_bin_for_each_instance() {
    let mut scene = seeded_scene();
    let snapshot = ramp_snapshot();
    let used = scene.tick(&snapshot);
    assert_eq!(used, snapshot);
    for (i, d) in scene.donuts.iter().enumerate() {
        let magnitude = ((i % ANALYSER_BINS) * 8) as u8;
        let expected = d.initial_scale * (1.0 + magnitude as f32 / FREQUENCY_SCALE_DIVISOR);
        assert_eq!(d.transform.scale, expected, "instance {i}");
    }
}

#[test]
fn scale_uses_latest_snapshot_not_accumulated() {
    let mut scene = seeded_scene();
    scene.tick(&ramp_snapshot());
    scene.tick(&FrequencySnapshot::silent(ANALYSER_BINS));
    for d in &scene.donuts {
        assert_eq!(d.transform.scale, d.initial_scale);
    }
}

#[test]
fn loud_bins_are_not_clamped() {
    assert_eq!(scale_factor(0, FREQUENCY_SCALE_DIVISOR), 1.0);
    assert_eq!(scale_factor(192, FREQUENCY_SCALE_DIVISOR), 2.0);
    assert!(scale_factor(255, FREQUENCY_SCALE_DIVISOR) > 2.0);
}

#[test]
fn empty_snapshot_reads_as_silence() {
    let empty = FrequencySnapshot::default();
    assert!(empty.is_empty());
    assert_eq!(empty.magnitude_for(5), 0);
    let snap = ramp_snapshot();
    assert_eq!(snap.magnitude_for(33), snap.magnitude_for(1));
}

#[test]
fn rotation_sign_pattern() {
    assert_eq!(rotation_sign_x(0), -1.0);
    assert_eq!(rotation_sign_x(1), 1.0);
    assert_eq!(rotation_sign_y(0), 1.0);
    assert_eq!(rotation_sign_y(1), -1.0);
    assert_eq!(rotation_sign_y(2), -1.0);
    assert_eq!(rotation_sign_y(3), 1.0);
}

#[test]
fn rotation_accumulates_per_frame() {
    let mut scene = seeded_scene();
    let before: Vec<Vec3> = scene.donuts.iter().map(|d| d.transform.rotation).collect();
    let silence = FrequencySnapshot::silent(ANALYSER_BINS);
    scene.tick(&silence);
    scene.tick(&silence);

    let r0 = scene.donuts[0].transform.rotation;
    let r1 = scene.donuts[1].transform.rotation;
    assert!(r0.x < before[0].x);
    assert!(r1.x > before[1].x);
    assert!((r0.x - (before[0].x - 2.0 * ROTATION_STEP)).abs() < 1e-5);
    assert!((r0.y - (before[0].y + 2.0 * ROTATION_STEP)).abs() < 1e-5);
    assert!((r1.y - (before[1].y - 2.0 * ROTATION_STEP)).abs() < 1e-5);
    assert_eq!(r0.z, 0.0);
}

#[test]
fn ticks_without_text_or_audio() {
    let mut scene = seeded_scene();
    assert!(scene.text.is_none());
    for _ in 0..10 {
        scene.tick(&FrequencySnapshot::silent(ANALYSER_BINS));
    }
    assert!(scene.text.is_none());
    assert_eq!(scene.donut_matrices().len(), DONUT_COUNT);
}

#[test]
fn idle_controls_keep_default_camera() {
    let mut scene = seeded_scene();
    scene.tick(&FrequencySnapshot::silent(ANALYSER_BINS));
    assert!((scene.camera.eye - Vec3::new(0.0, 0.0, CAMERA_Z)).length() < 1e-5);
    assert_eq!(scene.camera.target, Vec3::ZERO);
}

#[test]
fn instance_matrix_applies_scale_and_translation() {
    let t = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::ZERO,
        scale: Vec3::splat(0.5),
    };
    let p = t.matrix().transform_point3(Vec3::X);
    assert!((p - Vec3::new(1.5, 2.0, 3.0)).length() < 1e-6);
}

// Scene state: donut instances, title text, camera, and the per-frame tick.
use super::camera::{Camera, OrbitControls};
use super::constants::*;
use super::geometry::Geometry;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

/// Position, Euler XYZ rotation (radians) and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// One donut. Geometry and material are shared by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshInstance {
    pub transform: Transform,
    /// Scale sampled at creation; every frame's scale derives from it.
    pub initial_scale: Vec3,
}

/// Byte magnitudes (0..=255) of one analyser read, one entry per bin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencySnapshot(Vec<u8>);

impl FrequencySnapshot {
    pub fn new(bins: Vec<u8>) -> Self {
        Self(bins)
    }

    pub fn silent(bins: usize) -> Self {
        Self(vec![0; bins])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn bins(&self) -> &[u8] {
        &self.0
    }

    /// Magnitude driving instance `index`; bins repeat every `len()` instances.
    #[inline]
    pub fn magnitude_for(&self, index: usize) -> u8 {
        if self.0.is_empty() {
            0
        } else {
            self.0[index % self.0.len()]
        }
    }
}

/// Anything that can produce a fresh frequency snapshot on demand.
pub trait FrequencySource {
    fn frequency_snapshot(&self) -> FrequencySnapshot;
}

// A fixed snapshot doubles as a source, e.g. silence before audio exists.
impl FrequencySource for FrequencySnapshot {
    fn frequency_snapshot(&self) -> FrequencySnapshot {
        self.clone()
    }
}

/// Tunables for building the donut field.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub donut_count: usize,
    pub spread: f32,
    pub max_initial_scale: f32,
    pub rotation_step: f32,
    pub frequency_divisor: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            donut_count: DONUT_COUNT,
            spread: DONUT_SPREAD,
            max_initial_scale: DONUT_MAX_INITIAL_SCALE,
            rotation_step: ROTATION_STEP,
            frequency_divisor: FREQUENCY_SCALE_DIVISOR,
        }
    }
}

/// Sample `config.donut_count` donuts with random placement, tilt and size.
pub fn populate_donuts<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Vec<MeshInstance> {
    let pi = std::f32::consts::PI;
    (0..config.donut_count)
        .map(|_| {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.spread,
                (rng.gen::<f32>() - 0.5) * config.spread,
                (rng.gen::<f32>() - 0.5) * config.spread,
            );
            let rotation = Vec3::new(rng.gen::<f32>() * pi, rng.gen::<f32>() * pi, 0.0);
            let s = rng.gen::<f32>() * config.max_initial_scale;
            let scale = Vec3::splat(s);
            MeshInstance {
                transform: Transform {
                    position,
                    rotation,
                    scale,
                },
                initial_scale: scale,
            }
        })
        .collect()
}

/// Rotation direction about X for instance `index`: even indices spin backwards.
#[inline]
pub fn rotation_sign_x(index: usize) -> f32 {
    if index % 2 == 0 {
        -1.0
    } else {
        1.0
    }
}

/// Rotation direction about Y for instance `index`: indices not divisible by 3 spin backwards.
#[inline]
pub fn rotation_sign_y(index: usize) -> f32 {
    if index % 3 != 0 {
        -1.0
    } else {
        1.0
    }
}

/// Audio-driven scale multiplier. No upper clamp.
#[inline]
pub fn scale_factor(magnitude: u8, divisor: f32) -> f32 {
    1.0 + magnitude as f32 / divisor
}

/// Spin every donut one step and rescale it from its initial scale and the snapshot.
pub fn animate_donuts(donuts: &mut [MeshInstance], snapshot: &FrequencySnapshot, config: &SceneConfig) {
    for (i, donut) in donuts.iter_mut().enumerate() {
        donut.transform.rotation.x += config.rotation_step * rotation_sign_x(i);
        donut.transform.rotation.y += config.rotation_step * rotation_sign_y(i);
        let factor = scale_factor(snapshot.magnitude_for(i), config.frequency_divisor);
        donut.transform.scale = donut.initial_scale * factor;
    }
}

/// Everything the frame loop mutates: camera, controls, donuts and the optional title.
pub struct SceneState {
    pub config: SceneConfig,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub donuts: Vec<MeshInstance>,
    pub text: Option<Geometry>,
}

impl SceneState {
    pub fn build<R: Rng + ?Sized>(config: SceneConfig, aspect: f32, rng: &mut R) -> Self {
        let camera = Camera::scene_default(aspect);
        let controls = OrbitControls::new(camera.target);
        let donuts = populate_donuts(&config, rng);
        log::info!(
            "[scene] {} donuts, camera at ({:.2},{:.2},{:.2})",
            donuts.len(),
            camera.eye.x,
            camera.eye.y,
            camera.eye.z
        );
        Self {
            config,
            camera,
            controls,
            donuts,
            text: None,
        }
    }

    pub fn set_text(&mut self, geometry: Geometry) {
        self.text = Some(geometry);
    }

    /// One frame of scene logic: controls, fresh snapshot, donut animation.
    ///
    /// Returns the snapshot that drove this frame.
    pub fn tick<S: FrequencySource + ?Sized>(&mut self, source: &S) -> FrequencySnapshot {
        self.controls.update(&mut self.camera);
        let snapshot = source.frequency_snapshot();
        animate_donuts(&mut self.donuts, &snapshot, &self.config);
        snapshot
    }

    /// Model matrices for every donut, in instance order.
    pub fn donut_matrices(&self) -> Vec<Mat4> {
        self.donuts.iter().map(|d| d.transform.matrix()).collect()
    }
}

// Perspective camera and damped orbit controls.
use super::constants::*;
use glam::{Mat4, Vec3};

const MIN_POLAR: f32 = 1e-6;
const CHANGE_EPS: f32 = 1e-6;

/// Right-handed, Y-up perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, fovy_radians: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// The scene camera: 75 degree FOV, looking at the origin from +Z.
    pub fn scene_default(aspect: f32) -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, CAMERA_Z),
            Vec3::ZERO,
            CAMERA_FOV_DEG.to_radians(),
            aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    /// Recompute the cached projection after changing aspect, FOV or clip planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Spherical coordinates around the Y axis: `theta` is azimuth from +Z, `phi` polar from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit controls with optional damping.
///
/// Input handlers accumulate deltas; [`OrbitControls::update`] applies them to
/// the camera once per frame. With damping enabled only `damping_factor` of the
/// pending rotation and pan is applied per update and the rest decays.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    #[inline]
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    #[inline]
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Pointer drag in CSS pixels; a drag across the full viewport height turns a full circle.
    pub fn rotate_drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let tau = std::f32::consts::TAU;
        self.rotate_left(tau * dx / h * self.rotate_speed);
        self.rotate_up(tau * dy / h * self.rotate_speed);
    }

    /// Pan in the camera plane so the content follows the pointer.
    pub fn pan_drag(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &Camera) {
        let h = viewport_height.max(1.0);
        let target_distance = (camera.eye - self.target).length() * (camera.fovy_radians * 0.5).tan();
        let view = camera.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        let left_amount = 2.0 * dx * target_distance / h * self.pan_speed;
        let up_amount = 2.0 * dy * target_distance / h * self.pan_speed;
        self.pan_offset += -right * left_amount + up * up_amount;
    }

    #[inline]
    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Wheel input: negative `delta_y` (scroll up) moves closer.
    pub fn dolly_wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.scale *= self.zoom_scale();
        } else if delta_y > 0.0 {
            self.scale /= self.zoom_scale();
        }
    }

    /// Apply pending input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - self.target;
        let mut spherical = Spherical::from_offset(offset);

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }
        spherical.phi = spherical.phi.clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let new_eye = self.target + spherical.to_offset();
        let moved = new_eye.distance_squared(camera.eye) > CHANGE_EPS * CHANGE_EPS
            || self.target.distance_squared(camera.target) > CHANGE_EPS * CHANGE_EPS;
        camera.eye = new_eye;
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
        moved
    }
}

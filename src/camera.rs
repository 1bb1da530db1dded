//! Orbit camera with damping and auto-rotation around the terrain centre.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::params::OrbitCameraParams;

/// Camera orbiting a target on a sphere of fixed radius
///
/// Rotation requests accumulate into a pending delta; each `update` applies
/// `damping_factor` of it and decays the remainder, so motion eases out over
/// several frames.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    params: OrbitCameraParams,
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X (radians)
    theta: f32,
    /// Polar angle from +Y (radians)
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
}

impl OrbitCamera {
    /// Place the camera from its configured eye and target
    pub fn new(params: OrbitCameraParams) -> Self {
        let target = Vec3::from_array(params.target);
        let offset = Vec3::from_array(params.position) - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            params,
            target,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
        }
    }

    /// Queue a rotation around the vertical axis (radians)
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Queue a rotation towards the pole (radians)
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Toggle auto-rotation; pending damped motion still settles
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.params.auto_rotate = enabled;
    }

    /// Whether auto-rotation is on
    pub fn auto_rotate(&self) -> bool {
        self.params.auto_rotate
    }

    /// Auto-rotation for a frame of `delta_s` seconds; speed 1.0 = one turn per minute
    fn auto_rotation_angle(&self, delta_s: f32) -> f32 {
        TAU / 60.0 * self.params.auto_rotate_speed * delta_s
    }

    /// Advance one frame: auto-rotate, apply and decay the damped delta
    pub fn update(&mut self, delta_s: f32) {
        if self.params.auto_rotate {
            self.rotate_left(self.auto_rotation_angle(delta_s.max(0.0)));
        }

        let damping = self.params.damping_factor;
        self.theta = (self.theta + self.delta_theta * damping).rem_euclid(TAU);
        self.phi = (self.phi + self.delta_phi * damping).clamp(
            self.params.polar_epsilon,
            PI - self.params.polar_epsilon,
        );

        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Orbit centre
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Azimuth in [0, 2π)
    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Polar angle from +Y, kept inside (ε, π − ε)
    pub fn polar(&self) -> f32 {
        self.phi
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn view_proj(&self, aspect_ratio: f32) -> (Mat4, Vec3) {
        let eye = self.eye();

        // Y stays up; the polar clamp keeps the view off the poles
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            aspect_ratio,
            self.params.near_plane,
            self.params.far_plane,
        );

        (proj * view, eye)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitCameraParams::default())
    }
}

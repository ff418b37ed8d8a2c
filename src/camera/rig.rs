use std::f32::consts::TAU;

use glam::Vec3;

use super::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Bounding sphere of everything currently drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Centroid of the drawn points.
    pub center: Vec3,
    /// Largest distance from `center` to any point.
    pub radius: f32,
}

impl Bounds {
    /// Bounds of a point set, or `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius = points
            .iter()
            .map(|p| (*p - center).length())
            .fold(0.0f32, f32::max);
        Some(Self { center, radius })
    }
}

/// Idle orbit around the scene.
///
/// The look-at target and orbit distance chase the drawn bounds with an
/// exponential ease, so the view follows debris and reassembly without
/// jumping. Pausing the orbit freezes the angle; resuming continues from
/// it.
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: Camera,
    options: CameraOptions,
    angle: f32,
    auto_rotate: bool,
    target: Vec3,
    distance: f32,
    framed: bool,
}

impl CameraRig {
    /// Rig looking at the origin from `min_distance`.
    #[must_use]
    pub fn new(options: CameraOptions, aspect: f32) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, options.min_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        let mut rig = Self {
            camera,
            auto_rotate: options.auto_rotate,
            distance: options.min_distance,
            options,
            angle: 0.0,
            target: Vec3::ZERO,
            framed: false,
        };
        rig.place_eye();
        rig
    }

    /// Advance the orbit by `dt` seconds and ease toward `bounds`.
    pub fn update(&mut self, dt: f32, bounds: Option<Bounds>) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.auto_rotate {
            self.angle = (self.angle + self.options.orbit_speed * dt).rem_euclid(TAU);
        }

        if let Some(bounds) = bounds {
            let distance = self.fit_distance(bounds.radius);
            if self.framed {
                let k = 1.0 - (-self.options.follow_rate * dt).exp();
                self.target = self.target.lerp(bounds.center, k);
                self.distance += (distance - self.distance) * k;
            } else {
                self.target = bounds.center;
                self.distance = distance;
                self.framed = true;
            }
        }
        self.place_eye();
    }

    /// Jump straight to `bounds` on the next frame instead of easing.
    pub fn reframe(&mut self) {
        self.framed = false;
    }

    /// Orbit distance that keeps a sphere of `radius` in view.
    #[must_use]
    pub fn fit_distance(&self, radius: f32) -> f32 {
        let half_fov = (self.options.fovy.to_radians() * 0.5).max(1e-3);
        (radius / half_fov.tan() * 1.5).max(self.options.min_distance)
    }

    fn place_eye(&mut self) {
        let (sin, cos) = self.angle.sin_cos();
        let offset = Vec3::new(
            sin * self.distance,
            self.options.elevation * self.distance,
            cos * self.distance,
        );
        self.camera.eye = self.target + offset;
        self.camera.target = self.target;
    }

    /// Pause or resume the orbit without touching the angle.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Whether the orbit is advancing.
    #[must_use]
    pub fn is_auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Current orbit angle in radians, in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Update the projection aspect. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Apply new camera options. Orbit angle and auto-rotate state survive.
    pub fn set_options(&mut self, options: CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.options = options;
        self.place_eye();
    }

    /// The camera as placed by the last update.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// GPU uniform for the current camera.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(CameraOptions::default(), 1.5)
    }

    #[test]
    fn orbit_advances_with_time() {
        let mut rig = rig();
        rig.update(1.0, None);
        assert!((rig.angle() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn pause_and_resume_preserve_angle() {
        let mut rig = rig();
        rig.update(2.0, None);
        let angle = rig.angle();
        let eye = rig.camera().eye;

        rig.set_auto_rotate(false);
        rig.update(5.0, None);
        assert_eq!(rig.angle(), angle);
        assert_eq!(rig.camera().eye, eye);

        rig.set_auto_rotate(true);
        rig.update(1.0, None);
        assert!((rig.angle() - (angle + 0.35)).abs() < 1e-5);
    }

    #[test]
    fn first_bounds_snap_then_ease() {
        let mut rig = rig();
        let a = Bounds {
            center: Vec3::new(10.0, 0.0, 0.0),
            radius: 1.0,
        };
        rig.update(0.016, Some(a));
        assert_eq!(rig.camera().target, a.center);

        let b = Bounds {
            center: Vec3::new(20.0, 0.0, 0.0),
            radius: 1.0,
        };
        rig.update(0.016, Some(b));
        let x = rig.camera().target.x;
        assert!(x > 10.0 && x < 20.0);

        for _ in 0..600 {
            rig.update(0.016, Some(b));
        }
        assert!((rig.camera().target.x - 20.0).abs() < 1e-3);
    }

    #[test]
    fn distance_never_below_minimum() {
        let rig = rig();
        assert_eq!(rig.fit_distance(0.0), 30.0);
        assert!(rig.fit_distance(100.0) > 100.0);
    }

    #[test]
    fn bounds_of_points() {
        assert_eq!(Bounds::from_points(&[]), None);
        let b = Bounds::from_points(&[Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)])
            .unwrap();
        assert_eq!(b.center, Vec3::ZERO);
        assert_eq!(b.radius, 1.0);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut rig = rig();
        rig.resize(0, 100);
        assert_eq!(rig.camera().aspect, 1.5);
        rig.resize(200, 100);
        assert_eq!(rig.camera().aspect, 2.0);
    }
}

use glam::{Quat, Vec3};

use crate::voxel::{color_to_rgb, Voxel};

/// The transient physical state of one voxel while it is in motion.
///
/// Created when a dismantle or rebuild starts and dropped when the
/// transition no longer needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The voxel this particle carries (its original cell and color).
    pub voxel: Voxel,
    /// Position at the start of the current transition.
    pub source: Vec3,
    /// Rotation (XYZ Euler radians) at the start of the current transition.
    pub source_rotation: Vec3,
    /// Current world-space center.
    pub position: Vec3,
    /// Current rotation as XYZ Euler radians.
    pub rotation: Vec3,
    /// Linear velocity (units/s).
    pub velocity: Vec3,
    /// Angular velocity per Euler axis (rad/s).
    pub angular_velocity: Vec3,
    /// Seconds to wait before moving (rebuild only).
    pub start_delay: f32,
    /// Seconds since the transition started.
    pub elapsed: f32,
    /// Destination voxel (rebuild only).
    pub target: Option<Voxel>,
    /// Normalized travel progress in [0, 1] (rebuild only).
    pub progress: f32,
    /// Whether the particle has touched the floor.
    pub grounded: bool,
    /// Whether vertical motion has damped out on the floor.
    pub settled: bool,
}

impl Particle {
    /// A particle at rest at the voxel's own cell.
    #[must_use]
    pub fn at_rest(voxel: Voxel) -> Self {
        Self::floating(voxel, voxel.position())
    }

    /// A particle at rest at an arbitrary position.
    #[must_use]
    pub fn floating(voxel: Voxel, position: Vec3) -> Self {
        Self {
            voxel,
            source: position,
            source_rotation: Vec3::ZERO,
            position,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            start_delay: 0.0,
            elapsed: 0.0,
            target: None,
            progress: 0.0,
            grounded: false,
            settled: false,
        }
    }

    /// Displacement from the voxel's grid cell.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.position - self.voxel.position()
    }

    /// Orientation as a quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Display color: the carried voxel's color, blending toward the target
    /// color as a rebuild progresses.
    #[must_use]
    pub fn display_rgb(&self) -> [f32; 3] {
        let from = color_to_rgb(self.voxel.color);
        let Some(target) = self.target else {
            return from;
        };
        let to = color_to_rgb(target.color);
        let t = self.progress;
        [
            from[0] + (to[0] - from[0]) * t,
            from[1] + (to[1] - from[1]) * t,
            from[2] + (to[2] - from[2]) * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_relative_to_grid_cell() {
        let mut p = Particle::at_rest(Voxel::new(1, 2, 3, 0));
        assert_eq!(p.offset(), Vec3::ZERO);
        p.position += Vec3::new(0.5, -1.0, 0.0);
        assert_eq!(p.offset(), Vec3::new(0.5, -1.0, 0.0));
    }

    #[test]
    fn display_color_blends_toward_target() {
        let mut p = Particle::at_rest(Voxel::new(0, 0, 0, 0xFF0000));
        p.target = Some(Voxel::new(0, 0, 0, 0x0000FF));
        p.progress = 0.0;
        assert_eq!(p.display_rgb(), [1.0, 0.0, 0.0]);
        p.progress = 1.0;
        assert_eq!(p.display_rgb(), [0.0, 0.0, 1.0]);
    }
}

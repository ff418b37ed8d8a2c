//! Projection of voxels and particles into GPU instance records.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::animation::{AnimationController, Motion, Particle};
use crate::camera::Bounds;
use crate::voxel::{color_to_rgb, Voxel, VoxelStore};

/// Vertices emitted per cube (6 faces, 2 triangles each).
pub const VERTICES_PER_CUBE: u32 = 36;

/// One drawn cube. Layout matches `VoxelInstance` in `voxel.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VoxelInstance {
    /// World-space center.
    pub position: [f32; 3],
    /// Edge length.
    pub scale: f32,
    /// Orientation quaternion `(x, y, z, w)`.
    pub rotation: [f32; 4],
    /// sRGB color in `[0, 1]`.
    pub color: [f32; 3],
    pub(crate) _pad: f32,
}

impl VoxelInstance {
    /// Unrotated cube on a grid cell.
    #[must_use]
    pub fn from_voxel(voxel: &Voxel, scale: f32) -> Self {
        Self {
            position: voxel.position().to_array(),
            scale,
            rotation: Quat::IDENTITY.to_array(),
            color: color_to_rgb(voxel.color),
            _pad: 0.0,
        }
    }

    /// Cube at a particle's current pose and blended color.
    #[must_use]
    pub fn from_particle(particle: &Particle, scale: f32) -> Self {
        Self {
            position: particle.position.to_array(),
            scale,
            rotation: particle.orientation().to_array(),
            color: particle.display_rgb(),
            _pad: 0.0,
        }
    }

    /// Center as a vector.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Rebuild `out` with everything that should be drawn this frame.
///
/// While idle the store is drawn; debris replaces the store entirely;
/// during assembly the landed voxels in the store are drawn alongside the
/// particles still in flight.
pub fn collect_instances(
    store: &VoxelStore,
    animation: &AnimationController,
    scale: f32,
    out: &mut Vec<VoxelInstance>,
) {
    out.clear();
    let draw_store = animation.motion() != Motion::Debris;
    if draw_store {
        out.reserve(store.count() + animation.particles().len());
        out.extend(store.iter().map(|v| VoxelInstance::from_voxel(&v, scale)));
    }
    out.extend(
        animation
            .particles()
            .iter()
            .map(|p| VoxelInstance::from_particle(p, scale)),
    );
}

/// Bounding sphere of a set of instances, or `None` when empty.
#[must_use]
pub fn instance_bounds(instances: &[VoxelInstance]) -> Option<Bounds> {
    let centers: Vec<Vec3> = instances.iter().map(VoxelInstance::center).collect();
    Bounds::from_points(&centers)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::AnimationOptions;

    fn controller() -> AnimationController {
        AnimationController::with_rng(AnimationOptions::default(), StdRng::seed_from_u64(5))
    }

    fn store_of(voxels: &[Voxel]) -> VoxelStore {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(voxels);
        store
    }

    #[test]
    fn instance_layout_is_48_bytes() {
        assert_eq!(size_of::<VoxelInstance>(), 48);
    }

    #[test]
    fn idle_draws_store() {
        let store = store_of(&[Voxel::new(1, 2, 3, 0xFF0000)]);
        let mut out = Vec::new();
        collect_instances(&store, &controller(), 0.9, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(out[0].scale, 0.9);
        assert_eq!(out[0].color, [1.0, 0.0, 0.0]);
        assert_eq!(out[0].rotation, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn debris_replaces_store() {
        let voxels = [Voxel::new(0, 0, 0, 0), Voxel::new(4, 0, 0, 0)];
        let store = store_of(&voxels);
        let mut anim = controller();
        anim.start_dismantle(&voxels);
        let mut out = vec![VoxelInstance::zeroed(); 9];
        collect_instances(&store, &anim, 1.0, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn assembly_draws_landed_and_in_flight() {
        let mut anim = controller();
        anim.start_dismantle(&[Voxel::new(0, 0, 0, 0)]);
        let _ = anim.start_rebuild(&[Voxel::new(0, 0, 0, 0), Voxel::new(1, 0, 0, 0)]);
        let landed = store_of(&[Voxel::new(7, 7, 7, 0)]);
        let mut out = Vec::new();
        collect_instances(&landed, &anim, 1.0, &mut out);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn bounds_cover_instances() {
        let store = store_of(&[Voxel::new(-2, 0, 0, 0), Voxel::new(2, 0, 0, 0)]);
        let mut out = Vec::new();
        collect_instances(&store, &controller(), 1.0, &mut out);
        let bounds = instance_bounds(&out).unwrap();
        assert_eq!(bounds.center, Vec3::ZERO);
        assert_eq!(bounds.radius, 2.0);
        assert_eq!(instance_bounds(&[]), None);
    }
}

//! Voxel data model: grid-aligned colored cubes and the authoritative store.

mod color;
mod key;
/// Coordinate-keyed voxel storage with last-write-wins insertion.
pub mod store;

pub use color::{color_to_hex, color_to_rgb, parse_hex_color, DEFAULT_COLOR};
pub use key::GridKey;
pub use store::VoxelStore;

use glam::Vec3;

/// A unit cube at an integer grid coordinate with a single solid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// Grid x coordinate.
    pub x: i32,
    /// Grid y coordinate (up).
    pub y: i32,
    /// Grid z coordinate.
    pub z: i32,
    /// Packed `0xRRGGBB` color.
    pub color: u32,
}

impl Voxel {
    /// Voxel at an integer coordinate. Colors wider than 24 bits fall back
    /// to [`DEFAULT_COLOR`].
    #[must_use]
    pub fn new(x: i32, y: i32, z: i32, color: u32) -> Self {
        let color = if color > 0x00FF_FFFF { DEFAULT_COLOR } else { color };
        Self { x, y, z, color }
    }

    /// Voxel from fractional generator output, rounding each coordinate to
    /// the nearest integer. Non-finite coordinates become 0.
    #[must_use]
    pub fn from_f64(x: f64, y: f64, z: f64, color: u32) -> Self {
        Self::new(round_axis(x), round_axis(y), round_axis(z), color)
    }

    /// Packed storage key of this voxel's coordinate.
    #[must_use]
    pub fn key(&self) -> GridKey {
        GridKey::pack(self.x, self.y, self.z)
    }

    /// World-space center of the voxel.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Round a coordinate to the nearest grid cell. Values beyond the `i32`
/// range saturate at its ends.
pub(crate) fn round_axis(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    v.round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Apply the last-write-wins coordinate rule to a voxel list.
///
/// The result keeps the order in which each coordinate first appears, with
/// the color of its last occurrence.
#[must_use]
pub fn dedup_voxels(voxels: &[Voxel]) -> Vec<Voxel> {
    let mut slots: rustc_hash::FxHashMap<GridKey, usize> =
        rustc_hash::FxHashMap::default();
    let mut out: Vec<Voxel> = Vec::with_capacity(voxels.len());
    for voxel in voxels {
        match slots.get(&voxel.key()) {
            Some(&idx) => out[idx].color = voxel.color,
            None => {
                let _ = slots.insert(voxel.key(), out.len());
                out.push(*voxel);
            }
        }
    }
    out
}

/// Mean position of a set of points, or the origin when empty.
#[must_use]
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let (sum, n) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(s, n), p| (s + p, n + 1));
    if n == 0 {
        Vec3::ZERO
    } else {
        sum / n as f32
    }
}

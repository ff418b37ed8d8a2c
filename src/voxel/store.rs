use rustc_hash::{FxHashMap, FxHashSet};

use super::{GridKey, Voxel};

/// The authoritative set of voxels currently in the scene.
///
/// Keyed by packed grid coordinate, so at most one voxel occupies a cell.
/// Inserting at an occupied cell replaces the previous occupant.
#[derive(Debug, Clone, Default)]
pub struct VoxelStore {
    cells: FxHashMap<GridKey, u32>,
}

impl VoxelStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the store and insert `voxels` with last-write-wins. Returns the
    /// new count.
    pub fn replace_all(&mut self, voxels: &[Voxel]) -> usize {
        self.cells.clear();
        self.cells.reserve(voxels.len());
        for voxel in voxels {
            let _ = self.cells.insert(voxel.key(), voxel.color);
        }
        self.cells.len()
    }

    /// Insert (or overwrite) a single voxel.
    pub fn insert(&mut self, voxel: Voxel) {
        let _ = self.cells.insert(voxel.key(), voxel.color);
    }

    /// Remove every voxel.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the store holds no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Color at a coordinate, if occupied.
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<u32> {
        self.cells.get(&GridKey::pack(x, y, z)).copied()
    }

    /// Iterate voxels in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.cells.iter().map(|(key, &color)| {
            let (x, y, z) = key.unpack();
            Voxel { x, y, z, color }
        })
    }

    /// Copy of the current voxels in unspecified order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Voxel> {
        self.iter().collect()
    }

    /// Distinct packed colors in use.
    #[must_use]
    pub fn distinct_colors(&self) -> FxHashSet<u32> {
        self.cells.values().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_all_applies_last_write_wins() {
        let mut store = VoxelStore::new();
        let count = store.replace_all(&[
            Voxel::new(0, 0, 0, 0xFF0000),
            Voxel::new(0, 0, 0, 0x00FF00),
            Voxel::new(1, 0, 0, 0x0000FF),
        ]);
        assert_eq!(count, 2);
        assert_eq!(store.get(0, 0, 0), Some(0x00FF00));
        assert_eq!(store.get(1, 0, 0), Some(0x0000FF));
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[Voxel::new(5, 5, 5, 0x123456)]);
        let _ = store.replace_all(&[Voxel::new(1, 1, 1, 0x654321)]);
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(5, 5, 5), None);
    }

    #[test]
    fn empty_input_yields_empty_store() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[Voxel::new(0, 0, 0, 1)]);
        assert_eq!(store.replace_all(&[]), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn distinct_colors_collapses_repeats() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[
            Voxel::new(0, 0, 0, 0xAA0000),
            Voxel::new(1, 0, 0, 0xAA0000),
            Voxel::new(2, 0, 0, 0x00BB00),
        ]);
        let colors = store.distinct_colors();
        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&0xAA0000));
        assert!(colors.contains(&0x00BB00));
    }

    #[test]
    fn snapshot_round_trips_coordinates() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[Voxel::new(-4, 7, -9, 0x010203)]);
        assert_eq!(store.snapshot(), vec![Voxel::new(-4, 7, -9, 0x010203)]);
    }
}

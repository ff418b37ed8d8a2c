//! Per-voxel trajectories for the dismantle and rebuild transitions.

mod controller;
mod dismantle;
pub mod easing;
mod particle;
mod rebuild;

pub use controller::{AnimationController, Motion, TickOutcome};
pub use easing::EasingFunction;
pub use particle::Particle;
pub use rebuild::RebuildPlan;

use rand::rngs::StdRng;
use rand::Rng;

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
pub(crate) fn sample_range(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn degenerate_range_returns_lower_bound() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_range(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(sample_range(&mut rng, 3.0, 1.0), 3.0);
        let v = sample_range(&mut rng, -1.0, 1.0);
        assert!((-1.0..1.0).contains(&v));
    }
}

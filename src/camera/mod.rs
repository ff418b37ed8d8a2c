//! Camera math and the idle orbit rig.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Orbit rig that follows the scene bounds.
pub mod rig;

pub use rig::{Bounds, CameraRig};

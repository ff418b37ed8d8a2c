//! The engine's complete host-facing vocabulary.
//!
//! Every operation a host can trigger, whether from a key press, a UI
//! button, or a script, is an `EngineCommand`. Pass them to
//! [`VoxelEngine::execute`](super::VoxelEngine::execute).

use crate::voxel::Voxel;

/// A request to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Hard reset to a new model from any phase.
    LoadModel(Vec<Voxel>),
    /// Reassemble into a new target list.
    Rebuild(Vec<Voxel>),
    /// Blow the current structure apart.
    Dismantle,
    /// Pause or resume the idle orbit.
    SetAutoRotate(bool),
    /// Flip the idle orbit.
    ToggleAutoRotate,
    /// The render target changed size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

//! Real-time voxel scene engine built on wgpu.
//!
//! A scene is a set of unit cubes on an integer grid. It can be blown apart
//! into physically simulated debris and then reassembled, piece by piece,
//! into a different shape.
//!
//! # Key entry points
//!
//! - [`engine::VoxelEngine`] - the stateful, time-stepped scene
//! - [`scene::ScenePhase`] - `STABLE` / `DISMANTLING` / `REBUILDING`
//! - [`scene_io`] - the JSON voxel data contract
//! - [`options::Options`] - runtime configuration (camera, animation,
//!   display, lighting, keybindings)
//!
//! # Frame order
//!
//! Each [`engine::VoxelEngine::update`] advances the animation, folds landed
//! voxels into the store, lets the render bridge derive instances from the
//! store and particles, and finally moves the camera toward what will be
//! drawn. [`engine::VoxelEngine::render`] then draws that frame.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod scene_io;
#[cfg(feature = "viewer")]
mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
pub mod voxel;

pub use engine::{EngineCommand, VoxelEngine};
pub use error::VoxelError;
pub use options::Options;
pub use scene::{CallbackObserver, SceneObserver, ScenePhase};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
pub use voxel::Voxel;

//! Read-only projections, host controls, and teardown.

use super::VoxelEngine;
use crate::animation::Particle;
use crate::camera::core::Camera;
use crate::error::VoxelError;
use crate::options::Options;
use crate::renderer::VoxelInstance;
use crate::scene::{NullObserver, ScenePhase};
use crate::scene_io;
use crate::voxel::Voxel;

impl VoxelEngine {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ScenePhase {
        self.state.phase()
    }

    /// Number of voxels in the store.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.store.count()
    }

    /// Copy of the stored voxels in unspecified order.
    #[must_use]
    pub fn voxels(&self) -> Vec<Voxel> {
        self.store.snapshot()
    }

    /// The store serialized to the JSON data contract.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::Export`] if serialization fails.
    pub fn json_data(&self) -> Result<String, VoxelError> {
        scene_io::to_json(&self.store)
    }

    /// Distinct stored colors as sorted `#RRGGBB` strings.
    #[must_use]
    pub fn unique_colors(&self) -> Vec<String> {
        scene_io::unique_colors(&self.store)
    }

    /// Particles in flight or resting as debris.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.animation.particles()
    }

    /// Whether every debris particle has come to rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.animation.is_settled()
    }

    /// Instances drawn by the last frame.
    #[must_use]
    pub fn instances(&self) -> &[VoxelInstance] {
        self.bridge.instances()
    }

    /// Camera as placed by the last frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    /// Current orbit angle in radians.
    #[must_use]
    pub fn orbit_angle(&self) -> f32 {
        self.camera.angle()
    }

    /// Pause or resume the idle orbit without losing its angle.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.camera.set_auto_rotate(enabled);
    }

    /// Whether the idle orbit is advancing.
    #[must_use]
    pub fn is_auto_rotate(&self) -> bool {
        self.camera.is_auto_rotate()
    }

    /// The render target changed size. Updates the projection aspect and
    /// surface; voxel state is untouched. Zero sizes are ignored.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if self.bridge.resize(width, height) {
            self.camera.resize(width, height);
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options. Transitions in flight keep their drawn
    /// trajectories; new parameters apply to the next transition.
    pub fn set_options(&mut self, options: Options) {
        self.animation.set_options(options.animation.clone());
        self.camera.set_options(options.camera.clone());
        self.bridge.set_display(options.display.clone());
        self.bridge.set_lighting(&options.lighting);
        self.options = options;
    }

    /// Release GPU resources and detach the observer.
    ///
    /// Safe to call more than once. Afterwards every operation is a no-op.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.animation.cancel();
        self.bridge.teardown();
        self.observer = Box::new(NullObserver);
        self.cleaned_up = true;
        log::info!("engine cleaned up");
    }

    /// Whether [`cleanup`](Self::cleanup) has run.
    #[must_use]
    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }
}

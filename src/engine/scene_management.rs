//! Scene operations: load, dismantle, rebuild, import.

use super::VoxelEngine;
use crate::error::VoxelError;
use crate::scene::{SceneEvent, ScenePhase};
use crate::scene_io::{self, ImportReport};
use crate::voxel::Voxel;

impl VoxelEngine {
    /// Hard reset to `voxels` from any phase.
    ///
    /// Cancels any in-flight transition, replaces the store (duplicate
    /// coordinates resolve last-write-wins) and forces
    /// [`ScenePhase::Stable`]. Returns the resulting voxel count.
    pub fn load_initial_model(&mut self, voxels: &[Voxel]) -> usize {
        if self.cleaned_up {
            log::warn!("load ignored: engine has been cleaned up");
            return 0;
        }
        self.animation.cancel();
        let count = self.store.replace_all(voxels);
        let verdict = self.state.apply(SceneEvent::Load);
        self.camera.reframe();
        log::info!("loaded model: {count} voxels ({} entries)", voxels.len());

        self.notify_count();
        self.notify_phase(verdict);
        count
    }

    /// Blow the current structure apart. Only legal while stable; otherwise
    /// a no-op that returns `false`.
    pub fn dismantle(&mut self) -> bool {
        if self.cleaned_up || !self.state.allows(SceneEvent::Dismantle) {
            log::debug!("dismantle ignored while {}", self.state.phase());
            return false;
        }
        let voxels = self.store.snapshot();
        self.animation.start_dismantle(&voxels);
        let verdict = self.state.apply(SceneEvent::Dismantle);
        log::info!("dismantling {} voxels", voxels.len());
        self.notify_phase(verdict);
        true
    }

    /// Reassemble into `voxels`.
    ///
    /// While dismantled the debris flies into the new shape and the phase
    /// moves to [`ScenePhase::Rebuilding`]; the store starts empty and
    /// fills as particles land. While stable there is nothing to animate,
    /// so the store is swapped immediately and the phase stays put. While
    /// already rebuilding the request is ignored and `false` is returned.
    pub fn rebuild(&mut self, voxels: &[Voxel]) -> bool {
        if self.cleaned_up {
            return false;
        }
        match self.state.phase() {
            ScenePhase::Stable => {
                let _ = self.state.apply(SceneEvent::Rebuild);
                let count = self.store.replace_all(voxels);
                log::info!("rebuild while stable: swapped in {count} voxels");
                self.notify_count();
                true
            }
            ScenePhase::Dismantling => {
                let plan = self.animation.start_rebuild(voxels);
                self.store.clear();
                let verdict = self.state.apply(SceneEvent::Rebuild);
                log::info!(
                    "rebuilding into {} voxels ({} new particles, {} dropped)",
                    plan.reused + plan.spawned,
                    plan.spawned,
                    plan.discarded
                );
                self.notify_count();
                self.notify_phase(verdict);
                true
            }
            ScenePhase::Rebuilding => {
                log::debug!("rebuild ignored while {}", ScenePhase::Rebuilding);
                false
            }
        }
    }

    /// Parse the JSON data contract and load the result as a new model.
    ///
    /// Bad entries degrade individually (see [`scene_io::parse_json`]).
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::Import`] when the payload is not a JSON array;
    /// the current scene is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<ImportReport, VoxelError> {
        let report = scene_io::parse_json(text)?;
        let _ = self.load_initial_model(&report.voxels);
        Ok(report)
    }
}

//! The voxel scene engine.
//!
//! [`VoxelEngine`] owns the authoritative store, the phase machine, the
//! animation controller, the render bridge and the camera rig. Hosts drive
//! it through the scene operations and call [`VoxelEngine::update`] and
//! [`VoxelEngine::render`] once per display frame.

pub mod command;
mod queries;
mod scene_management;

pub use command::EngineCommand;

use crate::animation::AnimationController;
use crate::camera::CameraRig;
use crate::error::VoxelError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::RenderBridge;
use crate::scene::{SceneEvent, SceneObserver, SceneStateMachine, Verdict};
use crate::voxel::VoxelStore;

/// Viewport assumed by headless engines until the first resize.
const HEADLESS_SIZE: (u32, u32) = (1280, 720);

/// Stateful, time-stepped voxel scene.
///
/// Single-threaded: every mutation happens inside a call on `&mut self`,
/// and observer callbacks run synchronously once store and phase agree.
pub struct VoxelEngine {
    store: VoxelStore,
    state: SceneStateMachine,
    animation: AnimationController,
    bridge: RenderBridge,
    camera: CameraRig,
    observer: Box<dyn SceneObserver>,
    options: Options,
    reported_count: usize,
    cleaned_up: bool,
}

impl VoxelEngine {
    /// Create an engine that renders into `window`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::Gpu`] if the surface, adapter, or device cannot
    /// be acquired.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
        observer: impl SceneObserver + 'static,
    ) -> Result<Self, VoxelError> {
        let context = RenderContext::new(window, size).await?;
        let bridge =
            RenderBridge::with_gpu(context, options.display.clone(), &options.lighting);
        Ok(Self::from_parts(bridge, options, Box::new(observer)))
    }

    /// Create an engine with no GPU. Everything except drawing works.
    #[must_use]
    pub fn headless(options: Options, observer: impl SceneObserver + 'static) -> Self {
        let bridge = RenderBridge::headless(HEADLESS_SIZE, options.display.clone());
        Self::from_parts(bridge, options, Box::new(observer))
    }

    fn from_parts(
        bridge: RenderBridge,
        options: Options,
        observer: Box<dyn SceneObserver>,
    ) -> Self {
        let camera = CameraRig::new(options.camera.clone(), bridge.aspect());
        let animation = AnimationController::new(options.animation.clone());
        Self {
            store: VoxelStore::new(),
            state: SceneStateMachine::new(),
            animation,
            bridge,
            camera,
            observer,
            options,
            reported_count: 0,
            cleaned_up: false,
        }
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// Animation advances first, then the render bridge reads the new
    /// positions, then the camera follows what will be drawn.
    pub fn update(&mut self, dt: f32) {
        if self.cleaned_up {
            return;
        }

        let outcome = self.animation.advance(dt);
        for voxel in &outcome.landed {
            self.store.insert(*voxel);
        }
        if outcome.newly_settled {
            log::info!("dismantle: debris settled");
        }
        if let Some(targets) = outcome.assembled {
            let _ = self.store.replace_all(&targets);
            let verdict = self.state.apply(SceneEvent::AssemblyComplete);
            log::info!("rebuild: complete with {} voxels", self.store.count());
            self.notify_count();
            self.notify_phase(verdict);
        } else if !outcome.landed.is_empty() {
            self.notify_count();
        }

        let bounds = self.bridge.prepare(&self.store, &self.animation);
        self.camera.update(dt, bounds);
    }

    /// Draw the frame prepared by the last [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// Returns the surface error when a frame cannot be acquired. Hosts
    /// recover `Lost`/`Outdated` by calling
    /// [`handle_resize`](Self::handle_resize) with the current size.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.cleaned_up {
            return Ok(());
        }
        self.bridge.render(&self.camera.uniform())
    }

    /// Run a host command.
    pub fn execute(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::LoadModel(voxels) => {
                let _ = self.load_initial_model(&voxels);
            }
            EngineCommand::Rebuild(voxels) => {
                let _ = self.rebuild(&voxels);
            }
            EngineCommand::Dismantle => {
                let _ = self.dismantle();
            }
            EngineCommand::SetAutoRotate(enabled) => self.set_auto_rotate(enabled),
            EngineCommand::ToggleAutoRotate => {
                self.set_auto_rotate(!self.is_auto_rotate());
            }
            EngineCommand::Resize { width, height } => {
                self.handle_resize(width, height);
            }
        }
    }

    fn notify_phase(&mut self, verdict: Verdict) {
        if let Some(phase) = verdict.changed() {
            self.observer.on_phase_changed(phase);
        }
    }

    fn notify_count(&mut self) {
        let count = self.store.count();
        if count != self.reported_count {
            self.reported_count = count;
            self.observer.on_voxel_count_changed(count);
        }
    }
}

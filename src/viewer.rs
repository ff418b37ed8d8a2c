//! Standalone voxel window backed by winit.
//!
//! ```no_run
//! # use voxel_morph::{Viewer, Voxel};
//! Viewer::builder()
//!     .with_model(vec![Voxel::new(0, 0, 0, 0xFF0000)])
//!     .with_target(vec![Voxel::new(0, 1, 0, 0x00FF00)])
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::VoxelError, input::KeyAction, options::Options,
    scene::CallbackObserver, util::frame_timing::FrameTiming, Voxel,
    VoxelEngine,
};

/// Longest frame delta handed to the engine.
const MAX_FRAME_DT: f32 = 0.25;

/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f32 = 5.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    model: Vec<Voxel>,
    targets: Vec<Vec<Voxel>>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            model: Vec::new(),
            targets: Vec::new(),
            options: None,
            title: "Voxel Morph".into(),
        }
    }

    /// Set the model shown on startup and restored by the reset key.
    #[must_use]
    pub fn with_model(mut self, voxels: Vec<Voxel>) -> Self {
        self.model = voxels;
        self
    }

    /// Add a rebuild target. The rebuild key cycles through targets in the
    /// order they were added.
    #[must_use]
    pub fn with_target(mut self, voxels: Vec<Voxel>) -> Self {
        self.targets.push(voxels);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            model: self.model,
            targets: self.targets,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that shows a voxel model and lets the user dismantle and
/// rebuild it from the keyboard.
pub struct Viewer {
    model: Vec<Voxel>,
    targets: Vec<Vec<Voxel>>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), VoxelError> {
        let event_loop =
            EventLoop::new().map_err(|e| VoxelError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            timing: FrameTiming::new(MAX_FRAME_DT),
            since_fps_log: 0.0,
            model: self.model,
            targets: self.targets,
            next_target: 0,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VoxelError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<VoxelEngine>,
    timing: FrameTiming,
    since_fps_log: f32,
    model: Vec<Voxel>,
    targets: Vec<Vec<Voxel>>,
    next_target: usize,
    options: Option<Options>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Next rebuild target, cycling; the initial model when none were given.
    fn take_next_target(&mut self) -> Vec<Voxel> {
        if self.targets.is_empty() {
            return self.model.clone();
        }
        let target = self.targets[self.next_target % self.targets.len()].clone();
        self.next_target = (self.next_target + 1) % self.targets.len();
        target
    }

    fn handle_action(&mut self, action: KeyAction) {
        let target = (action == KeyAction::Rebuild).then(|| self.take_next_target());
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match action {
            KeyAction::Dismantle => {
                let _ = engine.dismantle();
            }
            KeyAction::Rebuild => {
                if let Some(target) = target {
                    let _ = engine.rebuild(&target);
                }
            }
            KeyAction::ToggleAutoRotate => {
                engine.set_auto_rotate(!engine.is_auto_rotate());
            }
            KeyAction::ResetModel => {
                let _ = engine.load_initial_model(&self.model);
            }
            KeyAction::ExportJson => match engine.json_data() {
                Ok(json) => log::info!("scene export:\n{json}"),
                Err(e) => log::error!("export failed: {e}"),
            },
        }
    }

    fn redraw(&mut self) {
        let dt = self.timing.tick();
        self.since_fps_log += dt;
        if self.since_fps_log >= FPS_LOG_INTERVAL {
            self.since_fps_log = 0.0;
            log::debug!("{:.0} fps", self.timing.fps());
        }

        let (Some(window), Some(engine)) = (&self.window, &mut self.engine) else {
            return;
        };
        engine.update(dt);
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (w, h) = viewport_size(window.inner_size());
                engine.handle_resize(w, h);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let observer = CallbackObserver::new(
            |phase| log::info!("phase: {phase}"),
            |count| log::info!("voxels: {count}"),
        );
        let size = viewport_size(window.inner_size());
        let engine_result =
            pollster::block_on(VoxelEngine::new(window.clone(), size, options, observer));
        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        let _ = engine.load_initial_model(&self.model);
        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.cleanup();
            }
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                if let Some(engine) = &mut self.engine {
                    engine.handle_resize(w, h);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                let action = self
                    .engine
                    .as_ref()
                    .and_then(|engine| engine.options().keybindings.lookup(&key));
                if let Some(action) = action {
                    self.handle_action(action);
                }
            }
            _ => (),
        }
    }
}

//! Projection of scene state into draw calls.
//!
//! [`RenderBridge`] rebuilds the instance list every frame from the store
//! and the animation controller. With a GPU attached it uploads the list
//! and draws it in one instanced call; headless it only tracks instances
//! and viewport size, which keeps the engine testable without a window.

pub mod instance;
pub mod voxel_pass;

pub use instance::{collect_instances, instance_bounds, VoxelInstance};
use voxel_pass::VoxelPass;

use crate::animation::AnimationController;
use crate::camera::core::CameraUniform;
use crate::camera::Bounds;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::options::{DisplayOptions, LightingOptions};
use crate::voxel::VoxelStore;

/// Live GPU state behind a bridge.
struct GpuRenderer {
    context: RenderContext,
    depth: DepthTexture,
    pass: VoxelPass,
}

/// Turns the store plus in-flight particles into rendered frames.
pub struct RenderBridge {
    instances: Vec<VoxelInstance>,
    display: DisplayOptions,
    size: (u32, u32),
    gpu: Option<GpuRenderer>,
    torn_down: bool,
}

impl RenderBridge {
    /// Bridge with no GPU backend.
    #[must_use]
    pub fn headless(size: (u32, u32), display: DisplayOptions) -> Self {
        Self {
            instances: Vec::new(),
            display,
            size: (size.0.max(1), size.1.max(1)),
            gpu: None,
            torn_down: false,
        }
    }

    /// Bridge drawing through `context`.
    #[must_use]
    pub fn with_gpu(
        context: RenderContext,
        display: DisplayOptions,
        lighting: &LightingOptions,
    ) -> Self {
        let size = context.size();
        let depth = DepthTexture::new(&context.device, size.0, size.1);
        let pass = VoxelPass::new(&context.device, context.format(), lighting);
        Self {
            instances: Vec::new(),
            display,
            size,
            gpu: Some(GpuRenderer {
                context,
                depth,
                pass,
            }),
            torn_down: false,
        }
    }

    /// Rebuild this frame's instances and upload them. Returns the bounds
    /// of everything drawn.
    pub fn prepare(
        &mut self,
        store: &VoxelStore,
        animation: &AnimationController,
    ) -> Option<Bounds> {
        if self.torn_down {
            return None;
        }
        collect_instances(store, animation, self.display.voxel_scale, &mut self.instances);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.pass.write_instances(
                &gpu.context.device,
                &gpu.context.queue,
                &self.instances,
            );
        }
        instance_bounds(&self.instances)
    }

    /// Draw the prepared instances from `camera`.
    ///
    /// Headless or torn-down bridges do nothing.
    ///
    /// # Errors
    ///
    /// Returns the surface error if the next frame cannot be acquired; the
    /// caller recovers `Lost`/`Outdated` by resizing.
    pub fn render(&mut self, camera: &CameraUniform) -> Result<(), wgpu::SurfaceError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Ok(());
        };
        gpu.pass.write_camera(&gpu.context.queue, camera);

        let frame = gpu.context.next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = self.display.background;
        let mut encoder = gpu.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("voxel render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            gpu.pass.draw(&mut rp);
        }
        gpu.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Track a new viewport size and reconfigure the surface and depth
    /// buffer. Zero dimensions are ignored; returns whether anything
    /// changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || self.torn_down {
            return false;
        }
        self.size = (width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            if gpu.context.resize(width, height) {
                gpu.depth = DepthTexture::new(&gpu.context.device, width, height);
            }
        }
        true
    }

    /// Width over height of the current viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.size.0 as f32 / self.size.1 as f32
    }

    /// Current viewport size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Instances built by the last [`prepare`](Self::prepare).
    #[must_use]
    pub fn instances(&self) -> &[VoxelInstance] {
        &self.instances
    }

    /// Apply new display options (voxel size, background).
    pub fn set_display(&mut self, display: DisplayOptions) {
        self.display = display;
    }

    /// Upload new lighting parameters.
    pub fn set_lighting(&self, lighting: &LightingOptions) {
        if let Some(gpu) = self.gpu.as_ref() {
            gpu.pass.write_lighting(&gpu.context.queue, lighting);
        }
    }

    /// Whether a GPU backend is attached.
    #[must_use]
    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Release every GPU resource. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if self.gpu.take().is_some() {
            log::debug!("render bridge: GPU resources released");
        }
        self.instances = Vec::new();
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::AnimationOptions;
    use crate::voxel::Voxel;

    fn bridge() -> RenderBridge {
        RenderBridge::headless((800, 600), DisplayOptions::default())
    }

    #[test]
    fn headless_prepare_builds_instances() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[Voxel::new(0, 0, 0, 0), Voxel::new(2, 0, 0, 0)]);
        let animation =
            AnimationController::with_rng(AnimationOptions::default(), StdRng::seed_from_u64(1));
        let mut bridge = bridge();
        let bounds = bridge.prepare(&store, &animation).unwrap();
        assert_eq!(bridge.instances().len(), 2);
        assert_eq!(bounds.radius, 1.0);
        assert!(bridge.render(&CameraUniform::new()).is_ok());
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut bridge = bridge();
        assert!(!bridge.resize(0, 300));
        assert!(!bridge.resize(300, 0));
        assert_eq!(bridge.size(), (800, 600));
        assert!(bridge.resize(1000, 500));
        assert_eq!(bridge.aspect(), 2.0);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut bridge = bridge();
        bridge.teardown();
        bridge.teardown();
        assert!(bridge.is_torn_down());
        assert!(!bridge.has_gpu());
        assert!(!bridge.resize(10, 10));
        assert!(bridge.render(&CameraUniform::new()).is_ok());
    }
}

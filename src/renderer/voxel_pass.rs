//! The single instanced cube pass.
//!
//! One storage buffer of [`VoxelInstance`]s, one bind group for camera and
//! lighting uniforms, one pipeline, and a `draw(0..36, 0..n)` call.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::instance::{VoxelInstance, VERTICES_PER_CUBE};
use crate::camera::core::CameraUniform;
use crate::gpu::dynamic_buffer::InstanceBuffer;
use crate::gpu::texture::DepthTexture;
use crate::options::LightingOptions;

/// Initial instance capacity; grows on demand.
const INITIAL_INSTANCES: usize = 4096;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
/// GPU copy of [`LightingOptions`]. Layout matches `Lighting` in
/// `voxel.wgsl`.
pub struct LightingUniform {
    /// Direction the key light travels.
    pub key_direction: [f32; 3],
    /// Key light strength.
    pub key_intensity: f32,
    /// Camera-aligned fill strength.
    pub fill_intensity: f32,
    /// Constant ambient term.
    pub ambient: f32,
    pub(crate) _pad: [f32; 2],
}

impl From<&LightingOptions> for LightingUniform {
    fn from(options: &LightingOptions) -> Self {
        Self {
            key_direction: options.key_direction,
            key_intensity: options.key_intensity,
            fill_intensity: options.fill_intensity,
            ambient: options.ambient,
            _pad: [0.0; 2],
        }
    }
}

/// Pipeline plus per-frame buffers for drawing voxel cubes.
pub struct VoxelPass {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: InstanceBuffer<VoxelInstance>,
    instance_layout: wgpu::BindGroupLayout,
    instance_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl VoxelPass {
    /// Build the pipeline for a surface of the given format.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        lighting: &LightingOptions,
    ) -> Self {
        let instance_buffer = InstanceBuffer::with_capacity(
            device,
            "Voxel Instances",
            INITIAL_INSTANCES,
            wgpu::BufferUsages::STORAGE,
        );
        let instance_layout = Self::create_instance_layout(device);
        let instance_bind_group =
            Self::create_instance_bind_group(device, &instance_layout, &instance_buffer);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[LightingUniform::from(lighting)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Voxel Frame Layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Voxel Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline = Self::create_pipeline(device, format, &instance_layout, &frame_layout);

        Self {
            pipeline,
            instance_buffer,
            instance_layout,
            instance_bind_group,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            instance_count: 0,
        }
    }

    fn create_instance_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Voxel Instance Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_instance_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &InstanceBuffer<VoxelInstance>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Voxel Instance Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        instance_layout: &wgpu::BindGroupLayout,
        frame_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/voxel.wgsl"));

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Voxel Pipeline Layout"),
            bind_group_layouts: &[instance_layout, frame_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Voxel Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Upload this frame's instances. Recreates the bind group if the buffer
    /// had to grow.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[VoxelInstance],
    ) {
        if self.instance_buffer.write(device, queue, instances) {
            self.instance_bind_group = Self::create_instance_bind_group(
                device,
                &self.instance_layout,
                &self.instance_buffer,
            );
        }
        self.instance_count = u32::try_from(instances.len()).unwrap_or(u32::MAX);
    }

    /// Upload the camera uniform.
    pub fn write_camera(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    /// Upload new lighting parameters.
    pub fn write_lighting(&self, queue: &wgpu::Queue, lighting: &LightingOptions) {
        let uniform = LightingUniform::from(lighting);
        queue.write_buffer(&self.lighting_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Number of cubes the next draw will emit.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Record the draw call.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.instance_bind_group, &[]);
        render_pass.set_bind_group(1, &self.frame_bind_group, &[]);
        render_pass.draw(0..VERTICES_PER_CUBE, 0..self.instance_count);
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_uniform_layout() {
        assert_eq!(size_of::<LightingUniform>(), 32);
        let u = LightingUniform::from(&LightingOptions::default());
        assert_eq!(u.ambient, 0.35);
    }
}

//! GPU resource management: device/surface setup, growable instance
//! buffers, and the depth target.

/// Growable typed storage buffers.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment.
pub mod texture;

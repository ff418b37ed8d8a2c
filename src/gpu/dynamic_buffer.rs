//! Growable storage buffer for per-frame instance uploads.
//!
//! Capacity doubles whenever an upload does not fit; the buffer never
//! shrinks, so a steady scene stops allocating after its first frames.

use std::marker::PhantomData;

/// A typed GPU buffer that reallocates on overflow.
pub struct InstanceBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> InstanceBuffer<T> {
    /// Buffer with room for `capacity` items (at least one).
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &'static str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label,
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * size_of::<T>()) as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `items`, growing first if needed.
    ///
    /// Returns `true` if the buffer was reallocated, in which case bind
    /// groups referencing it must be recreated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) -> bool {
        let reallocated = if items.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, items.len());
            self.buffer = Self::allocate(device, self.label, self.capacity, self.usage);
            log::debug!("{}: grew to {} items", self.label, self.capacity);
            true
        } else {
            false
        };

        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }
        self.len = items.len();
        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items written by the last upload.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last upload was empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Next capacity for `needed` items: double, or exactly `needed` if that is
/// still larger.
fn grown_capacity(current: usize, needed: usize) -> usize {
    current.saturating_mul(2).max(needed)
}

//! Small helpers for the windowed viewer.

/// Frame delta and FPS tracking.
pub(crate) mod frame_timing;

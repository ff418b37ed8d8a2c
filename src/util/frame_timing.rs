use web_time::Instant;

/// Frame clock for the viewer loop: per-frame delta with a ceiling, and a
/// smoothed FPS for logging.
pub(crate) struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Longest delta handed to the engine; stalls (window drags, debugger
    /// pauses) are clamped to this.
    max_dt: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start timing now. Deltas are clamped to `max_dt` seconds.
    pub(crate) fn new(max_dt: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Mark a frame boundary and return the clamped seconds since the last
    /// one.
    pub(crate) fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        clamp_dt(frame_time, self.max_dt)
    }

    /// Get the current FPS (smoothed)
    pub(crate) fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn clamp_dt(frame_time: f32, max_dt: f32) -> f32 {
    frame_time.clamp(0.0, max_dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalls_are_clamped() {
        assert_eq!(clamp_dt(3.0, 0.25), 0.25);
        assert_eq!(clamp_dt(0.016, 0.25), 0.016);
    }

    #[test]
    fn tick_never_exceeds_ceiling() {
        let mut timing = FrameTiming::new(0.1);
        assert!(timing.tick() <= 0.1);
        assert!(timing.fps() > 0.0);
    }
}

use crate::constants::physics::MAX_TIMESTEP;

/// Turns frame timestamps into simulation timesteps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    fps: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp` (seconds) and return the clamped timestep.
    ///
    /// The first frame yields 0. Timestamps going backwards yield 0 as well.
    pub fn advance(&mut self, timestamp: f64) -> f32 {
        let elapsed = match self.last_timestamp {
            Some(last) => (timestamp - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        self.frames += 1;

        if elapsed > 0.0 {
            self.fps = 1.0 / elapsed;
        }
        clamp_timestep(elapsed)
    }

    /// Instantaneous frames per second of the last advance
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// Clamp a timestep to `[0, MAX_TIMESTEP]`
pub fn clamp_timestep(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_TIMESTEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12.0), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.advance(1.0);
        let dt = clock.advance(1.0 + 1.0 / 60.0);
        assert!((dt - 1.0 / 60.0).abs() < 1e-5);
        assert!((clock.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(5.0), MAX_TIMESTEP);
        assert!((clock.fps() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_timestep_range() {
        assert_eq!(clamp_timestep(-1.0), 0.0);
        assert_eq!(clamp_timestep(f32::NAN), 0.0);
        assert_eq!(clamp_timestep(0.05), 0.05);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.advance(3.0);
        assert_eq!(clock.advance(2.0), 0.0);
    }
}

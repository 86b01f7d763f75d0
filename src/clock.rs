use std::time::{Duration, Instant};

/// Produces clamped per-frame deltas for the host loop.
///
/// The maximum clamp keeps a long stall (window drag, debugger) from
/// teleporting obstacles through the player.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock::with_max(Duration::from_millis(250))
    }

    pub fn with_max(dt_max: Duration) -> Self {
        FrameClock {
            last: Instant::now(),
            frame_index: 0,
            dt_max,
        }
    }

    /// Milliseconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        self.frame_index += 1;
        clamp_delta(elapsed, self.dt_max)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}

pub fn clamp_delta(elapsed: Duration, dt_max: Duration) -> f32 {
    elapsed.min(dt_max).as_secs_f32() * 1000.0
}

/// Time left to sleep so a frame lasts `1 / target_fps`.
pub fn frame_budget_remaining(frame_start: Instant, target_fps: u32) -> Option<Duration> {
    let budget = Duration::from_secs(1) / target_fps.max(1);
    budget.checked_sub(frame_start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delta() {
        let max = Duration::from_millis(250);
        assert!((clamp_delta(Duration::from_millis(16), max) - 16.0).abs() < 1e-3);
        assert!((clamp_delta(Duration::from_secs(3), max) - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        clock.tick();
        assert!(dt >= 0.0 && dt <= 250.0);
        assert_eq!(clock.frame_index(), 2);
    }
}

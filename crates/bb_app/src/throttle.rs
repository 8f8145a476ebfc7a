use std::time::{Duration, Instant};

/// Minimum time between two analysed live frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(1000);

/// Drops frames that arrive sooner than `min_interval` after the last accepted one.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns `true` when the frame should be analysed and records it as accepted.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_always_accepted() {
        let mut t = FrameThrottle::default();
        assert!(t.try_accept(Instant::now()));
    }

    #[test]
    fn frames_inside_interval_are_dropped() {
        let t0 = Instant::now();
        let mut t = FrameThrottle::default();
        assert!(t.try_accept(t0));
        assert!(!t.try_accept(t0 + Duration::from_millis(400)));
        assert!(!t.try_accept(t0 + Duration::from_millis(999)));
        assert!(t.try_accept(t0 + Duration::from_millis(1000)));
        // The interval restarts from the last accepted frame.
        assert!(!t.try_accept(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn reset_accepts_next_frame() {
        let t0 = Instant::now();
        let mut t = FrameThrottle::default();
        assert!(t.try_accept(t0));
        t.reset();
        assert!(t.try_accept(t0 + Duration::from_millis(1)));
    }
}

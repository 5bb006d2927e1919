//! Leading-edge throttle for high-frequency signals.

/// Lets the first call in each window through and drops the rest.
///
/// Dropped calls are not queued: a burst of scroll events inside one window
/// produces exactly one recomputation, at the start of the burst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    window_ms: u64,
    opened_at: Option<u64>,
}

impl Throttle {
    /// Creates a throttle with the given window.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            opened_at: None,
        }
    }

    /// Window length in milliseconds.
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Returns `true` if a call at `now_ms` may run.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        let open = match self.opened_at {
            None => true,
            Some(opened_at) => now_ms >= opened_at.saturating_add(self.window_ms),
        };

        if open {
            self.opened_at = Some(now_ms);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_passes() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.try_acquire(0));
    }

    #[test]
    fn test_burst_inside_window_is_dropped() {
        let mut throttle = Throttle::new(100);
        let passed = (0..50).filter(|i| throttle.try_acquire(i * 2)).count();
        assert_eq!(passed, 1);
    }

    #[test]
    fn test_reopens_after_window() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.try_acquire(10));
        assert!(!throttle.try_acquire(109));
        assert!(throttle.try_acquire(110));
        assert!(!throttle.try_acquire(150));
    }

    #[test]
    fn test_zero_window_never_drops() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.try_acquire(5));
        assert!(throttle.try_acquire(5));
    }
}

#![forbid(unsafe_code)]

//! Host-driven time.
//!
//! Nothing in this crate reads a system clock. The host reports the current
//! monotonic time (milliseconds since page load in the browser, a virtual
//! counter in tests) and the state machines compare it against their own
//! deadlines.

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Earliest of two optional deadlines.
#[must_use]
pub fn earliest(a: Option<Duration>, b: Option<Duration>) -> Option<Duration> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Minimum-interval gate for pointer recomputation.
///
/// Browsers already deliver pointer moves at frame cadence, so the page
/// default is a zero interval (every event passes). Hosts without that
/// guarantee configure a non-zero interval.
#[derive(Debug, Clone, Default)]
pub struct PointerThrottle {
    interval: Duration,
    last: Option<Duration>,
}

impl PointerThrottle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether an event at `now` should be processed. Records it if so.
    pub fn admit(&mut self, now: Duration) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last admitted event so the next one always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn clock_is_monotonic() {
        let mut clock = DeterministicClock::new();
        clock.set(MS * 50);
        clock.set(MS * 10);
        assert_eq!(clock.now(), MS * 50);
        clock.advance(MS * 5);
        assert_eq!(clock.now(), MS * 55);
    }

    #[test]
    fn earliest_prefers_present_values() {
        assert_eq!(earliest(None, None), None);
        assert_eq!(earliest(Some(MS), None), Some(MS));
        assert_eq!(earliest(Some(MS * 3), Some(MS * 2)), Some(MS * 2));
    }

    #[test]
    fn zero_interval_throttle_admits_everything() {
        let mut throttle = PointerThrottle::default();
        assert!(throttle.admit(MS));
        assert!(throttle.admit(MS));
    }

    #[test]
    fn throttle_drops_events_inside_the_interval() {
        let mut throttle = PointerThrottle::new(MS * 16);
        assert!(throttle.admit(MS * 100));
        assert!(!throttle.admit(MS * 110));
        assert!(throttle.admit(MS * 116));
        throttle.reset();
        assert!(throttle.admit(MS * 117));
    }
}

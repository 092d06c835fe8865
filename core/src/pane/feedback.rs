//! Short-lived status flags such as "Cleared" and "Copied".

use std::time::Duration;
use tokio::time::Instant;

/// A flag that stays raised for a fixed duration after each trigger.
///
/// Time is passed in rather than read, so callers decide the clock and
/// tests can use Tokio's paused time.
#[derive(Debug, Clone, Copy)]
pub struct TransientIndicator {
    duration: Duration,
    until: Option<Instant>,
}

impl TransientIndicator {
    /// Creates a lowered indicator.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
        }
    }

    /// Raises the indicator, restarting its timer.
    pub fn trigger(&mut self, now: Instant) {
        self.until = Some(now + self.duration);
    }

    /// Lowers the indicator immediately.
    pub fn reset(&mut self) {
        self.until = None;
    }

    /// True until `duration` has elapsed since the last trigger.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// When the indicator lowers, if raised.
    #[must_use]
    pub const fn expires_at(&self) -> Option<Instant> {
        self.until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_and_expire() {
        let now = Instant::now();
        let mut indicator = TransientIndicator::new(Duration::from_secs(2));
        assert!(!indicator.is_active(now));

        indicator.trigger(now);
        assert!(indicator.is_active(now + Duration::from_millis(1999)));
        assert!(!indicator.is_active(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_retrigger_restarts_timer() {
        let now = Instant::now();
        let mut indicator = TransientIndicator::new(Duration::from_secs(2));
        indicator.trigger(now);
        indicator.trigger(now + Duration::from_secs(1));
        assert!(indicator.is_active(now + Duration::from_millis(2500)));
        assert_eq!(indicator.expires_at(), Some(now + Duration::from_secs(3)));
    }
}

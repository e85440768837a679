//! A periodic timer on a virtual millisecond clock.

/// A periodic timer. A stopped timer is never due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Milliseconds between two firings, at least 1.
    interval_ms: u64,
    /// When the timer fires next, if it is running.
    next_ms: Option<u64>,
}

impl Timer {
    /// Creates a stopped timer.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_ms: None,
        }
    }

    /// Get the interval.
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Set the interval. A running timer keeps its next firing time.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Start, or restart, the timer so that it first fires one interval after `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.next_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    /// Stop the timer.
    pub fn stop(&mut self) {
        self.next_ms = None;
    }

    /// Whether the timer is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_ms.is_some()
    }

    /// When the timer fires next, if it is running.
    #[must_use]
    pub const fn next_due_ms(&self) -> Option<u64> {
        self.next_ms
    }

    /// Whether the timer is due at `now_ms`.
    #[must_use]
    pub fn due(&self, now_ms: u64) -> bool {
        self.next_ms.is_some_and(|t| t <= now_ms)
    }

    /// Schedule the firing after the current one.
    pub fn rearm(&mut self) {
        if let Some(t) = self.next_ms {
            self.next_ms = Some(t.saturating_add(self.interval_ms));
        }
    }
}

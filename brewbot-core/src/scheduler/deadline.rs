//! One-shot millisecond deadlines
//!
//! Time is a monotonic millisecond count supplied by the caller, so the
//! core never reads a clock itself.

/// A one-shot deadline that is either armed at an instant or idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline(Option<u64>);

impl Deadline {
    /// An idle deadline
    pub const fn idle() -> Self {
        Self(None)
    }

    /// Arm the deadline `delay_ms` after `now`
    pub fn arm(&mut self, now: u64, delay_ms: u32) {
        self.0 = Some(now.saturating_add(delay_ms as u64));
    }

    /// Disarm the deadline
    pub fn cancel(&mut self) {
        self.0 = None;
    }

    /// Check if the deadline is armed
    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    /// Check if the deadline is armed and has passed
    pub fn expired(&self, now: u64) -> bool {
        matches!(self.0, Some(at) if now >= at)
    }
}

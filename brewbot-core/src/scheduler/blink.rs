//! Focus blink scheduler
//!
//! Toggles the field with input focus between drawn and cleared on a
//! fixed half-period. The scheduler only tracks what should be visible;
//! the executor renders each [`Blink`] through the display.

use super::deadline::Deadline;
use crate::state::Focus;

/// A blink toggle to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    /// Field to draw or clear
    pub focus: Focus,
    /// True to draw the field, false to clear it
    pub visible: bool,
}

/// Repeating blink deadline for a single focus target
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkScheduler {
    interval_ms: u32,
    focus: Option<Focus>,
    deadline: Deadline,
    visible: bool,
}

impl BlinkScheduler {
    /// Create an idle scheduler with the given half-period
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            focus: None,
            deadline: Deadline::idle(),
            visible: true,
        }
    }

    /// Start blinking a field, replacing any previous target
    ///
    /// The field is assumed drawn; the first toggle clears it.
    pub fn start(&mut self, focus: Focus, now: u64) {
        self.focus = Some(focus);
        self.visible = true;
        self.deadline.arm(now, self.interval_ms);
    }

    /// Stop blinking
    ///
    /// Returns the target that was blinking so the caller can redraw it.
    pub fn stop(&mut self) -> Option<Focus> {
        self.deadline.cancel();
        self.visible = true;
        self.focus.take()
    }

    /// Keep the field drawn for one more interval
    ///
    /// Used while a held key auto-repeats so the edited value stays
    /// readable. The caller redraws the field.
    pub fn postpone(&mut self, now: u64) {
        if self.focus.is_some() {
            self.visible = true;
            self.deadline.arm(now, self.interval_ms);
        }
    }

    /// Toggle the target if its deadline passed
    pub fn poll(&mut self, now: u64) -> Option<Blink> {
        let focus = self.focus?;
        if !self.deadline.expired(now) {
            return None;
        }

        self.visible = !self.visible;
        self.deadline.arm(now, self.interval_ms);

        Some(Blink {
            focus,
            visible: self.visible,
        })
    }
}

//! Step table
//!
//! Steps are independent (time, temperature) pairs. Both fields saturate
//! at their limits on every mutation; there are no cross-step invariants.

use crate::config::{
    BrewConfig, MAX_FUNCTIONS, MAX_STEPS, TEMP_DEFAULT, TEMP_MAX, TEMP_MIN, TIME_DEFAULT,
    TIME_MAX, TIME_MIN,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clamp a step time (minutes) to its limits
pub fn clamp_time(minutes: i32) -> u16 {
    minutes.clamp(TIME_MIN as i32, TIME_MAX as i32) as u16
}

/// Clamp a target temperature (°C) to its limits
///
/// NaN saturates to the lower limit.
pub fn clamp_temperature(celsius: f32) -> f32 {
    if celsius.is_nan() {
        return TEMP_MIN;
    }
    celsius.clamp(TEMP_MIN, TEMP_MAX)
}

/// One program step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Minutes remaining; zero marks a disabled step
    time_remaining: u16,
    /// Target temperature in °C
    target: f32,
}

impl Default for Step {
    fn default() -> Self {
        Self::new(TIME_DEFAULT, TEMP_DEFAULT)
    }
}

impl Step {
    /// Create a step, clamping both fields
    pub fn new(minutes: u16, celsius: f32) -> Self {
        Self {
            time_remaining: clamp_time(minutes as i32),
            target: clamp_temperature(celsius),
        }
    }

    /// Minutes remaining
    pub fn time(&self) -> u16 {
        self.time_remaining
    }

    /// Target temperature (°C)
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the step has time left to run
    pub fn is_active(&self) -> bool {
        self.time_remaining != 0
    }

    /// Set the time, saturating at the limits
    pub fn set_time(&mut self, minutes: i32) -> u16 {
        self.time_remaining = clamp_time(minutes);
        self.time_remaining
    }

    /// Add a signed number of minutes, saturating at the limits
    pub fn adjust_time(&mut self, delta: i32) -> u16 {
        self.set_time((self.time_remaining as i32).saturating_add(delta))
    }

    /// Set the target, saturating at the limits
    pub fn set_target(&mut self, celsius: f32) -> f32 {
        self.target = clamp_temperature(celsius);
        self.target
    }

    /// Add a signed temperature delta, saturating at the limits
    pub fn adjust_target(&mut self, delta: f32) -> f32 {
        self.set_target(self.target + delta)
    }

    /// Count down one time unit; returns true if the time changed
    pub fn tick(&mut self) -> bool {
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            true
        } else {
            false
        }
    }
}

/// Per-function step table
///
/// Indexed by (function, step). Out-of-range indexes read as a default
/// step and ignore writes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTable {
    steps: [[Step; MAX_STEPS]; MAX_FUNCTIONS],
    /// Active step count per function
    active: [u8; MAX_FUNCTIONS],
}

impl StepTable {
    /// Create a table with default steps sized for the configured functions
    pub fn new(config: &BrewConfig) -> Self {
        let mut active = [0u8; MAX_FUNCTIONS];
        for (slot, function) in active.iter_mut().zip(config.functions.iter()) {
            *slot = function.num_steps;
        }

        Self {
            steps: [[Step::default(); MAX_STEPS]; MAX_FUNCTIONS],
            active,
        }
    }

    /// Number of active steps for a function
    pub fn num_steps(&self, function: usize) -> usize {
        self.active.get(function).copied().unwrap_or(0) as usize
    }

    /// Read a step
    pub fn step(&self, function: usize, step: usize) -> Step {
        self.get(function, step).copied().unwrap_or_default()
    }

    /// Mutable access to an active step
    pub fn get_mut(&mut self, function: usize, step: usize) -> Option<&mut Step> {
        if step >= self.num_steps(function) {
            return None;
        }
        self.steps.get_mut(function)?.get_mut(step)
    }

    fn get(&self, function: usize, step: usize) -> Option<&Step> {
        if step >= self.num_steps(function) {
            return None;
        }
        self.steps.get(function)?.get(step)
    }

    /// Minutes remaining on a step
    pub fn time(&self, function: usize, step: usize) -> u16 {
        self.step(function, step).time()
    }

    /// Target temperature of a step
    pub fn target(&self, function: usize, step: usize) -> f32 {
        self.step(function, step).target()
    }

    /// Set a step's time, saturating; returns the stored value
    pub fn set_time(&mut self, function: usize, step: usize, minutes: i32) -> u16 {
        self.get_mut(function, step)
            .map(|s| s.set_time(minutes))
            .unwrap_or(TIME_DEFAULT)
    }

    /// Adjust a step's time, saturating; returns the stored value
    pub fn adjust_time(&mut self, function: usize, step: usize, delta: i32) -> u16 {
        self.get_mut(function, step)
            .map(|s| s.adjust_time(delta))
            .unwrap_or(TIME_DEFAULT)
    }

    /// Set a step's target, saturating; returns the stored value
    pub fn set_target(&mut self, function: usize, step: usize, celsius: f32) -> f32 {
        self.get_mut(function, step)
            .map(|s| s.set_target(celsius))
            .unwrap_or(TEMP_DEFAULT)
    }

    /// Adjust a step's target, saturating; returns the stored value
    pub fn adjust_target(&mut self, function: usize, step: usize, delta: f32) -> f32 {
        self.get_mut(function, step)
            .map(|s| s.adjust_target(delta))
            .unwrap_or(TEMP_DEFAULT)
    }

    /// First step with time left, if any
    pub fn first_active_step(&self, function: usize) -> Option<usize> {
        self.find_active(function, 0)
    }

    /// First step after `after` with time left, if any
    pub fn next_active_step(&self, function: usize, after: usize) -> Option<usize> {
        self.find_active(function, after + 1)
    }

    fn find_active(&self, function: usize, from: usize) -> Option<usize> {
        (from..self.num_steps(function)).find(|&i| self.step(function, i).is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> StepTable {
        StepTable::new(&BrewConfig::default())
    }

    #[test]
    fn test_defaults() {
        let t = table();
        assert_eq!(t.num_steps(0), 3);
        assert_eq!(t.num_steps(2), 1);
        assert_eq!(t.num_steps(4), 0);

        for i in 0..3 {
            assert_eq!(t.time(0, i), TIME_DEFAULT);
            assert_eq!(t.target(0, i), TEMP_DEFAULT);
        }
        assert_eq!(t.first_active_step(0), None);
    }

    #[test]
    fn test_time_saturates() {
        let mut t = table();
        assert_eq!(t.set_time(0, 0, 595), 595);
        assert_eq!(t.adjust_time(0, 0, 10), TIME_MAX);
        assert_eq!(t.set_time(0, 0, 5), 5);
        assert_eq!(t.adjust_time(0, 0, -10), TIME_MIN);
    }

    #[test]
    fn test_target_saturates() {
        let mut t = table();
        assert_eq!(t.set_target(0, 1, 5.0), 5.0);
        assert_eq!(t.adjust_target(0, 1, -10.0), TEMP_MIN);
        assert_eq!(t.set_target(0, 1, 115.0), 115.0);
        assert_eq!(t.adjust_target(0, 1, 10.0), TEMP_MAX);
        assert_eq!(t.set_target(0, 1, f32::NAN), TEMP_MIN);
    }

    #[test]
    fn test_inactive_step_writes_ignored() {
        let mut t = table();
        // Boil has a single step
        t.set_time(2, 1, 30);
        assert_eq!(t.time(2, 1), TIME_DEFAULT);
        assert!(t.get_mut(2, 1).is_none());
        assert!(t.get_mut(7, 0).is_none());
    }

    #[test]
    fn test_first_and_next_active() {
        let mut t = table();
        t.set_time(0, 1, 20);
        t.set_time(0, 2, 10);

        assert_eq!(t.first_active_step(0), Some(1));
        assert_eq!(t.next_active_step(0, 1), Some(2));
        assert_eq!(t.next_active_step(0, 2), None);

        // Zero-time steps are skipped
        t.set_time(0, 1, 0);
        assert_eq!(t.first_active_step(0), Some(2));
        assert_eq!(t.next_active_step(0, 0), Some(2));
    }

    #[test]
    fn test_step_tick() {
        let mut step = Step::new(2, 65.0);
        assert!(step.tick());
        assert!(step.tick());
        assert_eq!(step.time(), 0);
        assert!(!step.tick());
        assert_eq!(step.time(), 0);
    }

    #[test]
    fn test_adjust_time_extreme_delta() {
        let mut step = Step::new(5, 65.0);
        assert_eq!(step.adjust_time(i32::MAX), TIME_MAX);
        assert_eq!(step.adjust_time(i32::MIN), TIME_MIN);

        let mut t = table();
        t.set_time(0, 0, 30);
        assert_eq!(t.adjust_time(0, 0, i32::MAX), TIME_MAX);
        assert_eq!(t.adjust_time(0, 0, i32::MIN), TIME_MIN);
    }

    proptest! {
        #[test]
        fn prop_time_clamp_idempotent(minutes in any::<i32>()) {
            let once = clamp_time(minutes);
            prop_assert!(once <= TIME_MAX);
            prop_assert_eq!(clamp_time(once as i32), once);
        }

        #[test]
        fn prop_temperature_clamp_idempotent(celsius in any::<f32>()) {
            let once = clamp_temperature(celsius);
            prop_assert!((TEMP_MIN..=TEMP_MAX).contains(&once));
            prop_assert_eq!(clamp_temperature(once), once);
        }

        #[test]
        fn prop_edits_stay_in_bounds(deltas in proptest::collection::vec(-700i32..700, 0..50)) {
            let mut t = table();
            for delta in deltas {
                let minutes = t.adjust_time(0, 0, delta);
                prop_assert!(minutes <= TIME_MAX);
                let celsius = t.adjust_target(0, 0, delta as f32 / 4.0);
                prop_assert!((TEMP_MIN..=TEMP_MAX).contains(&celsius));
            }
        }
    }
}

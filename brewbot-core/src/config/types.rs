//! Configuration type definitions
//!
//! These types describe the brewing functions and the UI timing. They are
//! built at boot from the defaults below; nothing is persisted.

use core::fmt::Write;

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of brewing functions
pub const MAX_FUNCTIONS: usize = 5;

/// Maximum steps per function
pub const MAX_STEPS: usize = 3;

/// Width of a function label on the display
pub const LABEL_LEN: usize = 6;

/// Width of a label with its step suffix (`"Mash 2"` plus padding)
pub const LABEL_DISPLAY_LEN: usize = LABEL_LEN + 2;

/// Step time limits in minutes (9h59m max)
pub const TIME_MIN: u16 = 0;
pub const TIME_MAX: u16 = 599;
pub const TIME_DEFAULT: u16 = 0;

/// Target temperature limits in °C
pub const TEMP_MIN: f32 = 0.0;
pub const TEMP_MAX: f32 = 120.0;
pub const TEMP_DEFAULT: f32 = 25.0;

/// Full-scale PID setpoint
pub const ACTUATOR_MAX: f32 = 1024.0;

/// Single-press time adjustment (minutes)
pub const TIME_STEP: u16 = 1;

/// Single-press temperature adjustment (°C)
pub const TEMP_STEP: f32 = 0.5;

/// Adjustment applied per auto-repeat while a key is held
pub const HELD_TIME_STEP: u16 = 10;
pub const HELD_TEMP_STEP: f32 = 10.0;

/// Temperature probe identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProbeId {
    /// Probe in the RIMS tube (mash/sparge liquor)
    Rims,
    /// Probe in the boil kettle
    Kettle,
}

/// PID actuator identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorId {
    /// RIMS heating element
    Rims,
    /// Boil kettle element
    Kettle,
}

/// Fixed-width display label for a function
///
/// Labels longer than [`LABEL_LEN`] are truncated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(String<LABEL_LEN>);

impl Label {
    /// Create a label, truncating to [`LABEL_LEN`] characters
    pub fn new(text: &str) -> Self {
        let mut label = String::new();
        for c in text.chars().take(LABEL_LEN) {
            if label.push(c).is_err() {
                break;
            }
        }
        Self(label)
    }

    /// The bare label text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Render the label for the function screen
    ///
    /// Multi-step functions get a space and the 1-based step number after
    /// the label; single-step functions are padded to the same width so a
    /// previous suffix is overwritten.
    pub fn with_step(&self, step: usize, num_steps: usize) -> String<LABEL_DISPLAY_LEN> {
        let mut out = String::new();
        let _ = out.push_str(self.as_str());
        if num_steps > 1 {
            let _ = write!(out, " {}", (step + 1) % 10);
        }
        while out.len() < LABEL_DISPLAY_LEN {
            if out.push(' ').is_err() {
                break;
            }
        }
        out
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Label {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Brewing function configuration (Mash, Sparge, Boil)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionConfig {
    /// Display label
    pub label: Label,
    /// Probe whose reading is shown and fed to the actuator
    pub probe: ProbeId,
    /// PID actuator driven while the program runs
    pub actuator: ActuatorId,
    /// Number of editable steps (1..=MAX_STEPS)
    pub num_steps: u8,
    /// Run the fan while executing (boil only)
    pub fan: bool,
}

impl FunctionConfig {
    /// Create a function, clamping `num_steps` to 1..=MAX_STEPS
    pub fn new(label: &str, probe: ProbeId, actuator: ActuatorId, num_steps: u8) -> Self {
        Self {
            label: Label::new(label),
            probe,
            actuator,
            num_steps: num_steps.clamp(1, MAX_STEPS as u8),
            fan: false,
        }
    }

    /// Enable the fan while this function executes
    pub fn with_fan(mut self) -> Self {
        self.fan = true;
        self
    }

    /// Number of active steps as an index bound
    pub fn steps(&self) -> usize {
        self.num_steps as usize
    }
}

/// UI and countdown timing, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// Focus blink half-period
    pub blink_ms: u32,
    /// Buzzer pulse width
    pub beep_ms: u32,
    /// Countdown tick (one time unit)
    pub tick_ms: u32,
    /// Interval between reminder beeps once done
    pub reminder_ms: u32,
    /// Beeps sounded when the program completes
    pub done_beeps: u8,
    /// Beeps sounded at each reminder
    pub reminder_beeps: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            blink_ms: 500,
            beep_ms: 500,
            tick_ms: 60_000, // step times are in minutes
            reminder_ms: 10_000,
            done_beeps: 6,
            reminder_beeps: 2,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrewConfig {
    /// Brewing functions in menu order
    pub functions: Vec<FunctionConfig, MAX_FUNCTIONS>,
    /// UI timing
    pub timing: Timing,
}

impl BrewConfig {
    /// Look up a function by index
    pub fn function(&self, index: usize) -> Option<&FunctionConfig> {
        self.functions.get(index)
    }
}

impl Default for BrewConfig {
    fn default() -> Self {
        let mut functions = Vec::new();
        let _ = functions.push(FunctionConfig::new("Mash", ProbeId::Rims, ActuatorId::Rims, 3));
        let _ = functions.push(FunctionConfig::new(
            "Sparge",
            ProbeId::Rims,
            ActuatorId::Rims,
            1,
        ));
        let _ = functions.push(
            FunctionConfig::new("Boil", ProbeId::Kettle, ActuatorId::Kettle, 1).with_fan(),
        );

        Self {
            functions,
            timing: Timing::default(),
        }
    }
}

/// Normalize a target temperature to the PID setpoint range
///
/// `setpoint = (temp - TEMP_MIN) / (TEMP_MAX - TEMP_MIN) * ACTUATOR_MAX`
pub fn normalized_setpoint(celsius: f32) -> f32 {
    let celsius = celsius.clamp(TEMP_MIN, TEMP_MAX);
    (celsius - TEMP_MIN) / (TEMP_MAX - TEMP_MIN) * ACTUATOR_MAX
}

/// Convert a normalized setpoint back to °C
pub fn setpoint_celsius(setpoint: f32) -> f32 {
    let setpoint = setpoint.clamp(0.0, ACTUATOR_MAX);
    TEMP_MIN + setpoint / ACTUATOR_MAX * (TEMP_MAX - TEMP_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_truncates() {
        let label = Label::new("Whirlpool");
        assert_eq!(label.as_str(), "Whirlp");
    }

    #[test]
    fn test_label_step_suffix() {
        let label = Label::new("Mash");
        assert_eq!(label.with_step(0, 3).as_str(), "Mash 1  ");
        assert_eq!(label.with_step(2, 3).as_str(), "Mash 3  ");

        let label = Label::new("Sparge");
        assert_eq!(label.with_step(0, 3).as_str(), "Sparge 1");
    }

    #[test]
    fn test_label_single_step_padded() {
        let label = Label::new("Boil");
        let shown = label.with_step(0, 1);
        assert_eq!(shown.as_str(), "Boil    ");
        assert_eq!(shown.len(), LABEL_DISPLAY_LEN);
    }

    #[test]
    fn test_default_functions() {
        let config = BrewConfig::default();
        assert_eq!(config.functions.len(), 3);

        let mash = config.function(0).unwrap();
        assert_eq!(mash.label.as_str(), "Mash");
        assert_eq!(mash.steps(), MAX_STEPS);
        assert!(!mash.fan);

        let boil = config.function(2).unwrap();
        assert_eq!(boil.probe, ProbeId::Kettle);
        assert_eq!(boil.steps(), 1);
        assert!(boil.fan);

        assert!(config.function(3).is_none());
    }

    #[test]
    fn test_num_steps_clamped() {
        let f = FunctionConfig::new("Test", ProbeId::Rims, ActuatorId::Rims, 9);
        assert_eq!(f.steps(), MAX_STEPS);
        let f = FunctionConfig::new("Test", ProbeId::Rims, ActuatorId::Rims, 0);
        assert_eq!(f.steps(), 1);
    }

    #[test]
    fn test_setpoint_normalization() {
        assert_eq!(normalized_setpoint(TEMP_MIN), 0.0);
        assert_eq!(normalized_setpoint(TEMP_MAX), ACTUATOR_MAX);
        assert!((normalized_setpoint(60.0) - 512.0).abs() < 0.01);

        // Out of range input saturates
        assert_eq!(normalized_setpoint(150.0), ACTUATOR_MAX);
        assert!((setpoint_celsius(normalized_setpoint(65.5)) - 65.5).abs() < 0.01);
    }

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.blink_ms, 500);
        assert_eq!(timing.done_beeps, 6);
        assert_eq!(timing.reminder_beeps, 2);
    }
}

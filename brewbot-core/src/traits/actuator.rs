//! Actuator and binary output traits

/// Trait for on/off outputs (indicator light, fan, buzzer pin)
pub trait BinaryOutput {
    /// Drive the output on or off
    fn write(&mut self, on: bool);

    /// Check if the output is currently on
    fn is_on(&self) -> bool;
}

/// Buzzer with a blocking pulse
///
/// `pulse` stalls the caller: no input or probe is serviced while it runs.
/// Implementations may replace the stall with a scheduled callback without
/// changing the executor.
pub trait Beeper: BinaryOutput {
    /// Sound the buzzer for `on_ms`, then stay silent until `hold_ms` has
    /// elapsed since the pulse started
    fn pulse(&mut self, on_ms: u32, hold_ms: u32);
}

/// PID-controlled heating element
///
/// The PID loop itself lives in the implementation; the executor only
/// writes a normalized setpoint in `0..=ACTUATOR_MAX` and gates it.
pub trait Actuator {
    /// Write the normalized setpoint
    fn write_setpoint(&mut self, setpoint: f32);

    /// Enable or disable the controller
    ///
    /// When disabled, the element output is forced off.
    fn enable(&mut self, enabled: bool);

    /// Check if the controller is enabled
    fn is_enabled(&self) -> bool;

    /// Check if the element is currently energized
    fn is_output_on(&self) -> bool;
}

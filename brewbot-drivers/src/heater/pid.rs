//! PID relay actuator
//!
//! Implements proportional-integral-derivative control with time-proportioning
//! output for an on/off heating element relay. The setpoint arrives
//! normalized to `0..=ACTUATOR_MAX`; the loop itself runs in °C.

use brewbot_core::config::{setpoint_celsius, ACTUATOR_MAX};
use brewbot_core::traits::{Actuator, BinaryOutput};

/// PID coefficients, in duty fraction per °C
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidCoefficients {
    /// Proportional gain (Kp)
    pub kp: f32,
    /// Integral gain (Ki), per second
    pub ki: f32,
    /// Derivative gain (Kd), seconds
    pub kd: f32,
}

impl PidCoefficients {
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for PidCoefficients {
    fn default() -> Self {
        // Full power 10 °C below target, slow integral
        Self::new(0.1, 0.0005, 0.0)
    }
}

/// PID controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidConfig {
    /// PID coefficients
    pub coefficients: PidCoefficients,
    /// Time-proportioning window in milliseconds
    ///
    /// Longer windows reduce relay wear but decrease response.
    pub window_ms: u32,
    /// Element is forced off at or above this temperature (°C)
    pub max_temp: f32,
    /// Integral windup limit, as a duty fraction
    pub integral_limit: f32,
    /// Errors smaller than this (°C) are treated as zero
    pub deadband: f32,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            coefficients: PidCoefficients::default(),
            window_ms: 5_000,
            max_temp: 110.0,
            integral_limit: 0.5,
            deadband: 0.2,
        }
    }
}

/// PID controller internal state
#[derive(Debug, Clone, Copy, Default)]
struct PidState {
    /// Accumulated integral term
    integral: f32,
    /// Previous error for derivative calculation
    prev_error: Option<f32>,
    /// Time of the previous update
    last_update: Option<u64>,
    /// Current duty cycle (0.0..=1.0)
    duty: f32,
    /// Start of the current time-proportioning window
    window_start: u64,
}

/// PID-controlled heating element relay
///
/// Since the element is on/off, this controller uses time-proportioning:
/// the relay is closed for a portion of each window proportional to the
/// PID output.
pub struct PidRelay<H> {
    relay: H,
    config: PidConfig,
    /// Normalized setpoint
    setpoint: f32,
    enabled: bool,
    state: PidState,
    last_temp: Option<f32>,
}

impl<H: BinaryOutput> PidRelay<H> {
    /// Create a disabled controller with the relay open
    pub fn new(mut relay: H, config: PidConfig) -> Self {
        relay.write(false);
        Self {
            relay,
            config,
            setpoint: 0.0,
            enabled: false,
            state: PidState::default(),
            last_temp: None,
        }
    }

    /// Target temperature in °C
    pub fn target(&self) -> f32 {
        setpoint_celsius(self.setpoint)
    }

    /// Current duty cycle (0.0..=1.0)
    pub fn duty(&self) -> f32 {
        self.state.duty
    }

    /// Last temperature fed to the loop
    pub fn last_temperature(&self) -> Option<f32> {
        self.last_temp
    }

    /// Get access to the relay output
    pub fn relay(&self) -> &H {
        &self.relay
    }

    /// Run one control step
    ///
    /// Call at a steady rate with the latest probe temperature and the
    /// current time. Does nothing to the relay while disabled.
    pub fn update(&mut self, celsius: f32, now_ms: u64) {
        self.last_temp = Some(celsius);

        if !self.enabled {
            return;
        }

        // Safety check: never exceed max temperature
        if celsius >= self.config.max_temp {
            self.state.duty = 0.0;
            self.set_relay(false);
            return;
        }

        let dt_s = match self.state.last_update {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => {
                self.state.window_start = now_ms;
                0.0
            }
        };
        self.state.last_update = Some(now_ms);

        self.state.duty = self.calculate_output(celsius, dt_s);
        self.apply_window(now_ms);
    }

    /// Force the element off after a failed probe reading
    ///
    /// The loop restarts from scratch on the next good sample.
    pub fn probe_fault(&mut self) {
        self.reset_state();
        self.set_relay(false);
    }

    /// Reset internal PID state
    fn reset_state(&mut self) {
        self.state = PidState::default();
    }

    /// Calculate PID output as a duty fraction
    fn calculate_output(&mut self, celsius: f32, dt_s: f32) -> f32 {
        let error = self.target() - celsius;

        // Apply deadband
        let deadband = self.config.deadband;
        let error = if error > -deadband && error < deadband {
            0.0
        } else {
            error
        };

        let coeffs = self.config.coefficients;

        // Proportional term: P = Kp * error
        let p_term = coeffs.kp * error;

        // Integral term with anti-windup clamp
        let limit = self.config.integral_limit;
        self.state.integral = (self.state.integral + coeffs.ki * error * dt_s).clamp(-limit, limit);

        // Derivative on error; skipped until there is a previous sample
        let d_term = match self.state.prev_error {
            Some(prev) if dt_s > 0.0 => coeffs.kd * (error - prev) / dt_s,
            _ => 0.0,
        };
        self.state.prev_error = Some(error);

        (p_term + self.state.integral + d_term).clamp(0.0, 1.0)
    }

    /// Apply time-proportioning within the current window
    fn apply_window(&mut self, now_ms: u64) {
        let window = self.config.window_ms.max(1) as u64;
        while now_ms.saturating_sub(self.state.window_start) >= window {
            self.state.window_start += window;
        }

        let elapsed = (now_ms - self.state.window_start) as f32;
        let on_time = self.state.duty * window as f32;
        self.set_relay(elapsed < on_time);
    }

    fn set_relay(&mut self, on: bool) {
        if on != self.relay.is_on() {
            self.relay.write(on);
        }
    }
}

impl<H: BinaryOutput> Actuator for PidRelay<H> {
    fn write_setpoint(&mut self, setpoint: f32) {
        let setpoint = setpoint.clamp(0.0, ACTUATOR_MAX);

        // Reset integral on a significant target change
        let change = setpoint_celsius(setpoint) - self.target();
        if change > 2.0 || change < -2.0 {
            self.state.integral = 0.0;
        }

        self.setpoint = setpoint;
    }

    fn enable(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("pid relay enabled: {}", enabled);

        self.enabled = enabled;
        self.reset_state();
        if !enabled {
            self.set_relay(false);
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_output_on(&self) -> bool {
        self.relay.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewbot_core::config::normalized_setpoint;

    #[derive(Default)]
    struct MockRelay {
        on: bool,
        switches: u32,
    }

    impl BinaryOutput for MockRelay {
        fn write(&mut self, on: bool) {
            self.on = on;
            self.switches += 1;
        }

        fn is_on(&self) -> bool {
            self.on
        }
    }

    fn relay(config: PidConfig) -> PidRelay<MockRelay> {
        PidRelay::new(MockRelay::default(), config)
    }

    #[test]
    fn test_setpoint_denormalizes() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(66.5));
        assert!((pid.target() - 66.5).abs() < 0.01);

        // Out of range setpoints saturate
        pid.write_setpoint(5_000.0);
        assert!((pid.target() - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_disabled_never_switches() {
        let mut pid = relay(PidConfig::default());
        let initial = pid.relay().switches;
        pid.write_setpoint(normalized_setpoint(100.0));

        for t in 0..100u64 {
            pid.update(20.0, t * 100);
        }

        assert!(!pid.is_output_on());
        assert_eq!(pid.relay().switches, initial);
        assert_eq!(pid.last_temperature(), Some(20.0));
    }

    #[test]
    fn test_full_power_far_below_target() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(66.0));
        pid.enable(true);

        pid.update(20.0, 0);
        assert_eq!(pid.duty(), 1.0);
        assert!(pid.is_output_on());

        // Stays on across window boundaries
        pid.update(20.0, 7_500);
        assert!(pid.is_output_on());
    }

    #[test]
    fn test_off_above_target() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(60.0));
        pid.enable(true);

        pid.update(70.0, 0);
        assert_eq!(pid.duty(), 0.0);
        assert!(!pid.is_output_on());
    }

    #[test]
    fn test_time_proportioning() {
        let config = PidConfig {
            coefficients: PidCoefficients::new(0.1, 0.0, 0.0),
            deadband: 0.0,
            ..Default::default()
        };
        let mut pid = relay(config);
        pid.write_setpoint(normalized_setpoint(60.0));
        pid.enable(true);

        // 5 °C below target → 50 % duty over a 5 s window
        pid.update(55.0, 0);
        assert!((pid.duty() - 0.5).abs() < 0.01);
        assert!(pid.is_output_on());

        pid.update(55.0, 2_000);
        assert!(pid.is_output_on());

        pid.update(55.0, 3_000);
        assert!(!pid.is_output_on());

        // Next window starts on again
        pid.update(55.0, 5_100);
        assert!(pid.is_output_on());
    }

    #[test]
    fn test_safety_cutoff() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(120.0));
        pid.enable(true);

        pid.update(100.0, 0);
        assert!(pid.is_output_on());

        pid.update(112.0, 100);
        assert!(!pid.is_output_on());
    }

    #[test]
    fn test_disable_opens_relay() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(66.0));
        pid.enable(true);
        pid.update(20.0, 0);
        assert!(pid.is_output_on());

        pid.enable(false);
        assert!(!pid.is_output_on());
        assert!(!pid.is_enabled());
        assert_eq!(pid.duty(), 0.0);
    }

    #[test]
    fn test_probe_fault_opens_relay() {
        let mut pid = relay(PidConfig::default());
        pid.write_setpoint(normalized_setpoint(66.0));
        pid.enable(true);
        pid.update(20.0, 0);
        assert!(pid.is_output_on());

        pid.probe_fault();
        assert!(!pid.is_output_on());
        assert!(pid.is_enabled());

        // Recovers on the next good sample
        pid.update(20.0, 1_000);
        assert!(pid.is_output_on());
    }

    #[test]
    fn test_integral_bounded() {
        let config = PidConfig {
            coefficients: PidCoefficients::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let mut pid = relay(config);
        pid.write_setpoint(normalized_setpoint(100.0));
        pid.enable(true);

        for t in 0..50u64 {
            pid.update(20.0, t * 1_000);
        }
        assert!(pid.duty() <= config.integral_limit + f32::EPSILON);
    }
}

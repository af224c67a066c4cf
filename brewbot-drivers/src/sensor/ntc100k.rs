//! NTC 100K thermistor probe
//!
//! The board samples the ADC on its own schedule and hands raw counts to
//! [`NtcProbe::record_sample`]. Each sample is converted through a lookup
//! table and raises the probe's new-reading flag.

use brewbot_core::traits::{SensorError, TemperatureProbe};

/// NTC 100K thermistor temperature lookup table
///
/// Table format: (resistance_ohms, temperature_x10)
/// Generated using beta equation with:
/// - R0 = 100,000 ohms at T0 = 25°C
/// - Beta = 3950K (typical for 100K NTC)
///
/// Temperature range: -20°C to 150°C
const TEMP_TABLE: &[(u32, i16)] = &[
    (1_750_000, -200), // -20°C (very cold)
    (1_000_000, -100), // -10°C
    (600_000, 0),      // 0°C
    (350_000, 100),    // 10°C
    (200_000, 200),    // 20°C
    (100_000, 250),    // 25°C (R0)
    (80_000, 300),     // 30°C
    (55_000, 400),     // 40°C
    (40_000, 450),     // 45°C (protein rest)
    (30_000, 500),     // 50°C
    (25_000, 550),     // 55°C
    (18_000, 600),     // 60°C
    (12_000, 700),     // 70°C
    (8_000, 800),      // 80°C
    (5_500, 900),      // 90°C
    (4_000, 1000),     // 100°C (boil)
    (2_000, 1200),     // 120°C
    (1_000, 1500),     // 150°C
];

/// NTC probe configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NtcConfig {
    /// Pull-up resistor value in ohms
    pub pullup_ohms: u32,
    /// ADC full scale (4096 for 12-bit)
    pub adc_max: u16,
    /// Counts from either rail treated as open or short circuit
    pub rail_margin: u16,
}

impl Default for NtcConfig {
    fn default() -> Self {
        Self {
            pullup_ohms: 4_700,
            adc_max: 4_096,
            rail_margin: 10,
        }
    }
}

/// NTC 100K thermistor with B=3950
///
/// Uses lookup table with linear interpolation for temperature calculation.
pub struct NtcProbe {
    config: NtcConfig,
    /// Latest converted sample
    last: Result<f32, SensorError>,
    fresh: bool,
}

impl NtcProbe {
    /// Create a probe with no samples yet
    pub fn new(config: NtcConfig) -> Self {
        Self {
            config,
            last: Err(SensorError::ConversionError),
            fresh: false,
        }
    }

    /// Convert and store a raw ADC sample, raising the new-reading flag
    pub fn record_sample(&mut self, adc_value: u16) {
        self.last = self
            .adc_to_resistance(adc_value)
            .and_then(Self::resistance_to_temp_x10)
            .map(|t| t as f32 / 10.0);
        self.fresh = true;

        #[cfg(feature = "defmt")]
        if let Err(e) = self.last {
            defmt::warn!("ntc sample {} rejected: {}", adc_value, e);
        }
    }

    /// Record a failed ADC conversion
    pub fn record_error(&mut self) {
        self.last = Err(SensorError::ConversionError);
        self.fresh = true;
    }

    /// Convert ADC reading to resistance
    ///
    /// Circuit: VCC -- pullup -- ADC_PIN -- NTC -- GND
    /// R_ntc = R_pullup * adc_value / (adc_max - adc_value)
    pub fn adc_to_resistance(&self, adc_value: u16) -> Result<u32, SensorError> {
        let margin = self.config.rail_margin;

        // Check for open circuit (ADC at max)
        if adc_value >= self.config.adc_max.saturating_sub(margin) {
            return Err(SensorError::OpenCircuit);
        }

        // Check for short circuit (ADC at zero)
        if adc_value < margin {
            return Err(SensorError::ShortCircuit);
        }

        let numerator = self.config.pullup_ohms as u64 * adc_value as u64;
        let denominator = (self.config.adc_max - adc_value) as u64;

        Ok((numerator / denominator) as u32)
    }

    /// Calculate temperature from resistance using lookup table
    ///
    /// Returns temperature in 0.1°C units (e.g., 250 = 25.0°C).
    /// Uses linear interpolation between table entries.
    pub fn resistance_to_temp_x10(resistance: u32) -> Result<i16, SensorError> {
        let (r_coldest, _) = TEMP_TABLE[0];
        let (r_hottest, _) = TEMP_TABLE[TEMP_TABLE.len() - 1];
        if resistance > r_coldest || resistance < r_hottest {
            return Err(SensorError::OutOfRange);
        }

        // Table is sorted by decreasing resistance (increasing temperature)
        for pair in TEMP_TABLE.windows(2) {
            let (r_high, t_low) = pair[0];
            let (r_low, t_high) = pair[1];

            if resistance <= r_high && resistance >= r_low {
                // temp = t_low + (t_high - t_low) * (r_high - r) / (r_high - r_low)
                let r_range = (r_high - r_low) as i64;
                let t_range = (t_high - t_low) as i64;
                let r_offset = (r_high - resistance) as i64;

                let temp = t_low as i64 + t_range * r_offset / r_range;
                return Ok(temp as i16);
            }
        }

        Err(SensorError::OutOfRange)
    }
}

impl TemperatureProbe for NtcProbe {
    fn has_new_reading(&self) -> bool {
        self.fresh
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.last
    }

    fn clear_new_reading(&mut self) {
        self.fresh = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe() -> NtcProbe {
        NtcProbe::new(NtcConfig::default())
    }

    #[test]
    fn test_resistance_to_temp() {
        // 100K ohms = 25°C (reference point)
        assert_eq!(NtcProbe::resistance_to_temp_x10(100_000).unwrap(), 250);

        // Table points convert exactly
        assert_eq!(NtcProbe::resistance_to_temp_x10(18_000).unwrap(), 600);
        assert_eq!(NtcProbe::resistance_to_temp_x10(4_000).unwrap(), 1000);

        // Mash-range calibration points
        assert_eq!(NtcProbe::resistance_to_temp_x10(40_000).unwrap(), 450);
        assert_eq!(NtcProbe::resistance_to_temp_x10(25_000).unwrap(), 550);

        // Interpolated: halfway between 30K (50°C) and 25K (55°C)
        assert_eq!(NtcProbe::resistance_to_temp_x10(27_500).unwrap(), 525);

        // Interpolated: halfway between 18K (60°C) and 12K (70°C)
        assert_eq!(NtcProbe::resistance_to_temp_x10(15_000).unwrap(), 650);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            NtcProbe::resistance_to_temp_x10(2_000_000),
            Err(SensorError::OutOfRange)
        );
        assert_eq!(
            NtcProbe::resistance_to_temp_x10(500),
            Err(SensorError::OutOfRange)
        );
    }

    #[test]
    fn test_adc_to_resistance() {
        let p = probe();
        // Mid-scale ADC reads the pull-up value
        assert_eq!(p.adc_to_resistance(2048).unwrap(), 4_700);
    }

    #[test]
    fn test_rail_faults() {
        let p = probe();
        assert_eq!(p.adc_to_resistance(4095), Err(SensorError::OpenCircuit));
        assert_eq!(p.adc_to_resistance(0), Err(SensorError::ShortCircuit));
    }

    #[test]
    fn test_sample_raises_flag() {
        let mut p = probe();
        assert!(!p.has_new_reading());
        assert_eq!(p.take_reading(), None);

        // 2048 counts → 4.7K → about 95°C
        p.record_sample(2048);
        assert!(p.has_new_reading());
        let celsius = p.take_reading().unwrap();
        assert!((celsius - 95.3).abs() < 0.05);
        assert!(!p.has_new_reading());
    }

    #[test]
    fn test_bad_sample_consumed_without_value() {
        let mut p = probe();
        p.record_sample(4095);
        assert!(p.has_new_reading());
        assert_eq!(p.read_celsius(), Err(SensorError::OpenCircuit));
        assert_eq!(p.take_reading(), None);
        assert!(!p.has_new_reading());

        p.record_error();
        assert_eq!(p.read_celsius(), Err(SensorError::ConversionError));
    }
}

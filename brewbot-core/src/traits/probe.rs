//! Temperature probe trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// Reading out of expected range
    OutOfRange,
    /// Conversion or bus error
    ConversionError,
}

/// Trait for temperature probes
///
/// Probes are sampled by the board on their own schedule. Each new sample
/// raises a "new reading" flag that the executor polls and clears, so
/// repeated polls between samples are cheap no-ops.
pub trait TemperatureProbe {
    /// Check whether a sample arrived since the flag was last cleared
    fn has_new_reading(&self) -> bool;

    /// Read the latest sample in degrees Celsius
    fn read_celsius(&mut self) -> Result<f32, SensorError>;

    /// Clear the new-reading flag
    fn clear_new_reading(&mut self);

    /// Consume a new sample if one is available
    ///
    /// Returns `None` when nothing new arrived or the sample is invalid; the
    /// caller keeps its cached value in both cases.
    fn take_reading(&mut self) -> Option<f32> {
        if !self.has_new_reading() {
            return None;
        }
        let reading = self.read_celsius();
        self.clear_new_reading();
        reading.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProbe {
        value: Result<f32, SensorError>,
        fresh: bool,
        reads: u32,
    }

    impl TemperatureProbe for MockProbe {
        fn has_new_reading(&self) -> bool {
            self.fresh
        }

        fn read_celsius(&mut self) -> Result<f32, SensorError> {
            self.reads += 1;
            self.value
        }

        fn clear_new_reading(&mut self) {
            self.fresh = false;
        }
    }

    #[test]
    fn test_take_reading_consumes_flag() {
        let mut probe = MockProbe {
            value: Ok(64.5),
            fresh: true,
            reads: 0,
        };

        assert_eq!(probe.take_reading(), Some(64.5));
        assert_eq!(probe.take_reading(), None);
        assert_eq!(probe.reads, 1);
    }

    #[test]
    fn test_take_reading_error_is_stale() {
        let mut probe = MockProbe {
            value: Err(SensorError::OpenCircuit),
            fresh: true,
            reads: 0,
        };

        assert_eq!(probe.take_reading(), None);
        // Flag is still cleared so the bad sample is not re-read every poll
        assert!(!probe.has_new_reading());
    }
}

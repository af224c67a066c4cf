//! GPIO binary output
//!
//! On/off control of a GPIO pin (directly or via SSR/MOSFET/transistor).
//! Used for the indicator light, the fan and the element relays.

use brewbot_core::traits::BinaryOutput;
use embedded_hal::digital::OutputPin;

/// GPIO binary output
///
/// Controls a load via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
pub struct GpioOutput<P> {
    pin: P,
    /// If true, output ON = pin LOW
    inverted: bool,
    /// Current logical state (true = on)
    on: bool,
    /// Pin writes that failed
    faults: u32,
}

impl<P: OutputPin> GpioOutput<P> {
    /// Create a new GPIO output, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the load is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut output = Self {
            pin,
            inverted,
            on: false,
            faults: 0,
        };
        output.write(false);
        output
    }

    /// Create a new GPIO output with active-high drive
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO output with active-low drive
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Number of pin writes that failed
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> BinaryOutput for GpioOutput<P> {
    fn write(&mut self, on: bool) {
        self.on = on;

        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        if result.is_err() {
            self.faults = self.faults.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("gpio output write failed");
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    /// Pin whose writes always fail
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_active_high_output() {
        let mut output = GpioOutput::new_active_high(MockPin { high: true });

        // Initially off
        assert!(!output.is_on());
        assert!(!output.pin.high);

        output.write(true);
        assert!(output.is_on());
        assert!(output.pin.high);

        output.write(false);
        assert!(!output.is_on());
        assert!(!output.pin.high);
    }

    #[test]
    fn test_active_low_output() {
        let mut output = GpioOutput::new_active_low(MockPin { high: false });

        // Initially off (pin is high for active-low)
        assert!(!output.is_on());
        assert!(output.pin.high);

        // Turn on (pin goes low for active-low)
        output.write(true);
        assert!(output.is_on());
        assert!(!output.pin.high);
    }

    #[test]
    fn test_faults_counted() {
        let mut output = GpioOutput::new_active_high(BrokenPin);
        assert_eq!(output.faults(), 1);

        output.write(true);
        assert_eq!(output.faults(), 2);
        // Logical state still tracks the request
        assert!(output.is_on());
    }
}

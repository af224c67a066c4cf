//! Blocking buzzer
//!
//! A buzzer on a GPIO pin. Pulses stall the caller on an `embedded-hal`
//! delay; nothing else runs until the pulse and its hold time are over.

use brewbot_core::traits::{Beeper, BinaryOutput};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::gpio::GpioOutput;

/// Buzzer driven by a GPIO pin with a blocking delay
pub struct BlockingBeeper<P, D> {
    output: GpioOutput<P>,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> BlockingBeeper<P, D> {
    /// Create a beeper on an active-high pin, initially silent
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            output: GpioOutput::new_active_high(pin),
            delay,
        }
    }

    /// Sound the buzzer `count` times, `on_ms` on and `on_ms` off
    pub fn chirp(&mut self, count: u8, on_ms: u32) {
        for _ in 0..count {
            self.pulse(on_ms, on_ms.saturating_mul(2));
        }
    }
}

impl<P: OutputPin, D: DelayNs> BinaryOutput for BlockingBeeper<P, D> {
    fn write(&mut self, on: bool) {
        self.output.write(on);
    }

    fn is_on(&self) -> bool {
        self.output.is_on()
    }
}

impl<P: OutputPin, D: DelayNs> Beeper for BlockingBeeper<P, D> {
    fn pulse(&mut self, on_ms: u32, hold_ms: u32) {
        self.output.write(true);
        self.delay.delay_ms(on_ms);
        self.output.write(false);
        self.delay.delay_ms(hold_ms.saturating_sub(on_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
        rising_edges: u32,
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
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    /// Delay that only accumulates the requested time
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn beeper() -> BlockingBeeper<MockPin, MockDelay> {
        BlockingBeeper::new(
            MockPin {
                high: false,
                rising_edges: 0,
            },
            MockDelay::default(),
        )
    }

    #[test]
    fn test_pulse_blocks_for_hold_time() {
        let mut b = beeper();
        b.pulse(500, 1_000);

        assert!(!b.is_on());
        assert_eq!(b.output.into_inner().rising_edges, 1);
    }

    #[test]
    fn test_pulse_duration() {
        let mut b = beeper();
        b.pulse(500, 1_000);
        assert_eq!(b.delay.total_ns, 1_000 * 1_000_000);

        // Hold shorter than the pulse only waits for the pulse
        let mut b = beeper();
        b.pulse(500, 100);
        assert_eq!(b.delay.total_ns, 500 * 1_000_000);
    }

    #[test]
    fn test_write_toggles() {
        let mut b = beeper();
        b.write(true);
        assert!(b.is_on());
        b.write(false);
        assert!(!b.is_on());
    }

    #[test]
    fn test_chirp() {
        let mut b = beeper();
        b.chirp(2, 100);
        assert_eq!(b.delay.total_ns, 2 * 200 * 1_000_000);
        assert_eq!(b.output.into_inner().rising_edges, 2);
    }
}

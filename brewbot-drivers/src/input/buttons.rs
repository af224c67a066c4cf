//! Analog button ladder
//!
//! All five front panel buttons share one ADC pin through a resistor
//! ladder; each button pulls the pin into its own narrow band. The
//! decoder debounces the band, reports a press once it is stable, and
//! repeats it as a held event while the button stays down.

use brewbot_core::state::{Key, KeyEvent};

/// ADC band for one button (10-bit counts, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    pub key: Key,
    pub low: u16,
    pub high: u16,
}

impl Band {
    pub const fn new(key: Key, low: u16, high: u16) -> Self {
        Self { key, low, high }
    }

    fn contains(&self, raw: u16) -> bool {
        raw >= self.low && raw <= self.high
    }
}

/// Ladder calibration and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLadder {
    /// Button bands
    pub bands: [Band; 5],
    /// A reading must be stable this long to count
    pub debounce_ms: u32,
    /// Press duration before the first held event
    pub hold_ms: u32,
    /// Interval between held events
    pub repeat_ms: u32,
}

impl Default for ButtonLadder {
    fn default() -> Self {
        Self {
            bands: [
                Band::new(Key::Right, 0, 2),
                Band::new(Key::Up, 144, 148),
                Band::new(Key::Down, 332, 336),
                Band::new(Key::Left, 505, 509),
                Band::new(Key::Select, 740, 744),
            ],
            debounce_ms: 100,
            hold_ms: 1_000,
            repeat_ms: 1_000,
        }
    }
}

impl ButtonLadder {
    /// Decode a raw reading; readings outside every band are `Key::None`
    pub fn decode(&self, raw: u16) -> Key {
        self.bands
            .iter()
            .find(|band| band.contains(raw))
            .map(|band| band.key)
            .unwrap_or(Key::None)
    }
}

/// Debouncing decoder for the button ladder
pub struct AnalogButtons {
    ladder: ButtonLadder,
    /// Key seen on the most recent reading
    candidate: Key,
    candidate_since: u64,
    /// Key currently reported as down
    pressed: Key,
    next_repeat: u64,
}

impl AnalogButtons {
    pub fn new(ladder: ButtonLadder) -> Self {
        Self {
            ladder,
            candidate: Key::None,
            candidate_since: 0,
            pressed: Key::None,
            next_repeat: 0,
        }
    }

    /// Key currently held down, after debouncing
    pub fn pressed(&self) -> Key {
        self.pressed
    }

    /// Feed one ADC reading
    ///
    /// Returns a press when a key becomes stable and held events while it
    /// stays down. Releases produce nothing.
    pub fn update(&mut self, raw: u16, now_ms: u64) -> Option<KeyEvent> {
        let key = self.ladder.decode(raw);

        if key != self.candidate {
            self.candidate = key;
            self.candidate_since = now_ms;
            return None;
        }

        let stable_for = now_ms.saturating_sub(self.candidate_since);
        if stable_for < self.ladder.debounce_ms as u64 {
            return None;
        }

        if key != self.pressed {
            self.pressed = key;
            if key == Key::None {
                return None;
            }
            self.next_repeat = now_ms + self.ladder.hold_ms as u64;
            return Some(KeyEvent::pressed(key));
        }

        if key != Key::None && now_ms >= self.next_repeat {
            self.next_repeat = now_ms + self.ladder.repeat_ms as u64;
            return Some(KeyEvent::held(key));
        }

        None
    }
}

impl Default for AnalogButtons {
    fn default() -> Self {
        Self::new(ButtonLadder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IDLE: u16 = 1_023;
    const UP: u16 = 146;

    /// Feed a constant reading every 10 ms, collecting events
    fn feed(buttons: &mut AnalogButtons, raw: u16, from: u64, to: u64) -> Vec<KeyEvent> {
        (from..to)
            .step_by(10)
            .filter_map(|t| buttons.update(raw, t))
            .collect()
    }

    #[test]
    fn test_decode_bands() {
        let ladder = ButtonLadder::default();
        assert_eq!(ladder.decode(0), Key::Right);
        assert_eq!(ladder.decode(146), Key::Up);
        assert_eq!(ladder.decode(336), Key::Down);
        assert_eq!(ladder.decode(505), Key::Left);
        assert_eq!(ladder.decode(742), Key::Select);
        assert_eq!(ladder.decode(1_023), Key::None);
        assert_eq!(ladder.decode(400), Key::None);
    }

    #[test]
    fn test_press_after_debounce() {
        let mut buttons = AnalogButtons::default();
        assert!(feed(&mut buttons, IDLE, 0, 200).is_empty());

        let events = feed(&mut buttons, UP, 200, 400);
        assert_eq!(events, [KeyEvent::pressed(Key::Up)]);
        assert_eq!(buttons.pressed(), Key::Up);

        // Release is silent
        assert!(feed(&mut buttons, IDLE, 400, 600).is_empty());
        assert_eq!(buttons.pressed(), Key::None);
    }

    #[test]
    fn test_glitch_rejected() {
        let mut buttons = AnalogButtons::default();
        feed(&mut buttons, IDLE, 0, 200);

        // 50 ms blip is shorter than the debounce
        assert!(feed(&mut buttons, UP, 200, 250).is_empty());
        assert!(feed(&mut buttons, IDLE, 250, 500).is_empty());
        assert_eq!(buttons.pressed(), Key::None);
    }

    #[test]
    fn test_hold_repeats() {
        let mut buttons = AnalogButtons::default();
        feed(&mut buttons, IDLE, 0, 100);

        // Press lands at 200 ms, held events at 1.2 s, 2.2 s and 3.2 s
        let events = feed(&mut buttons, UP, 100, 3_500);
        assert_eq!(
            events,
            [
                KeyEvent::pressed(Key::Up),
                KeyEvent::held(Key::Up),
                KeyEvent::held(Key::Up),
                KeyEvent::held(Key::Up),
            ]
        );
    }

    #[test]
    fn test_switching_keys() {
        let mut buttons = AnalogButtons::default();
        let mut events = feed(&mut buttons, UP, 0, 200);
        events.extend(feed(&mut buttons, 742, 200, 400));
        assert_eq!(
            events,
            [KeyEvent::pressed(Key::Up), KeyEvent::pressed(Key::Select)]
        );
    }

    proptest! {
        #[test]
        fn prop_out_of_band_is_none(raw in 0u16..1024) {
            let ladder = ButtonLadder::default();
            let key = ladder.decode(raw);
            let in_band = ladder.bands.iter().any(|b| b.contains(raw));
            prop_assert_eq!(key == Key::None, !in_band);
        }

        #[test]
        fn prop_single_reading_never_fires(raws in proptest::collection::vec(0u16..1024, 1..50)) {
            // Readings that change every sample never settle
            let mut buttons = AnalogButtons::default();
            let mut last = None;
            for (i, raw) in raws.into_iter().enumerate() {
                let key = buttons.ladder.decode(raw);
                if last == Some(key) {
                    continue;
                }
                last = Some(key);
                prop_assert_eq!(buttons.update(raw, i as u64 * 10), None);
            }
        }
    }
}

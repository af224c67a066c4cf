//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use brewbot_core::state::KeyEvent;

/// Channel capacity for key events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Debounced key events from the button ladder
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, KeyEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Raw probe samples, RIMS then kettle
///
/// `None` marks a failed ADC conversion.
pub type ProbeSamples = [Option<u16>; 2];

/// Latest probe samples (updated by the ADC task once per second)
pub static PROBE_SAMPLES: Signal<CriticalSectionRawMutex, ProbeSamples> = Signal::new();

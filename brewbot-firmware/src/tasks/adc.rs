//! ADC sampling task
//!
//! The button ladder and both thermistors share the RP2040 ADC. Buttons
//! are sampled every 10 ms and decoded into key events; probes are
//! sampled once per second and handed to the controller as raw counts.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Instant, Ticker};

use brewbot_drivers::input::AnalogButtons;

use crate::channels::{ProbeSamples, INPUT_CHANNEL, PROBE_SAMPLES};

/// Button sampling interval
const BUTTON_INTERVAL_MS: u64 = 10;

/// Probe sampling interval
const PROBE_INTERVAL_MS: u64 = 1_000;

/// ADC task - decodes buttons and samples probes
#[embassy_executor::task]
pub async fn adc_task(
    mut adc: Adc<'static, Async>,
    mut buttons_channel: Channel<'static>,
    mut probe_channels: [Channel<'static>; 2],
) {
    info!("ADC task started");

    let mut buttons = AnalogButtons::default();
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_INTERVAL_MS));
    let mut next_probe_sample = 0u64;

    loop {
        ticker.next().await;
        let now = Instant::now().as_millis();

        match adc.read(&mut buttons_channel).await {
            // Ladder bands are calibrated for a 10-bit converter
            Ok(raw) => {
                if let Some(event) = buttons.update(raw >> 2, now) {
                    debug!("Key: {}", event);
                    if INPUT_CHANNEL.try_send(event).is_err() {
                        warn!("Input channel full, dropping {}", event);
                    }
                }
            }
            Err(e) => warn!("Button ADC read failed: {}", e),
        }

        if now >= next_probe_sample {
            next_probe_sample = now + PROBE_INTERVAL_MS;

            let mut samples: ProbeSamples = [None; 2];
            for (sample, channel) in samples.iter_mut().zip(probe_channels.iter_mut()) {
                match adc.read(channel).await {
                    Ok(raw) => *sample = Some(raw),
                    Err(e) => warn!("Probe ADC read failed: {}", e),
                }
            }
            trace!("Probe samples: {}", samples);
            PROBE_SAMPLES.signal(samples);
        }
    }
}

//! Main controller task
//!
//! Owns the program executor. Key events are dispatched as they arrive;
//! every tick feeds new probe samples to the board, polls the executor
//! and runs the PID relays.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Instant;

use crate::board::BrewExecutor;
use crate::channels::{INPUT_CHANNEL, PROBE_SAMPLES};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut executor: BrewExecutor) {
    info!("Controller task started");

    executor.begin(Instant::now().as_millis());
    info!("Menu shown, mode {}", executor.mode());

    loop {
        match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(event) => {
                let before = executor.mode();
                executor.handle_key(event, Instant::now().as_millis());

                let after = executor.mode();
                if after != before {
                    debug!("Mode {} -> {}", before, after);
                }
            }

            Either::Second(now_ms) => {
                if let Some(samples) = PROBE_SAMPLES.try_take() {
                    executor.devices_mut().record_samples(samples);
                }

                executor.poll(now_ms);
                executor.devices_mut().regulate(now_ms);
            }
        }
    }
}

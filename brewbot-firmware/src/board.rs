//! Board wiring
//!
//! Binds the driver implementations to RP2040 pins and exposes them to
//! the executor through the [`Devices`] facade.
//!
//! | Signal          | Pin    |
//! |-----------------|--------|
//! | LCD RS, E       | GPIO2, GPIO3 |
//! | LCD D4-D7       | GPIO4-GPIO7  |
//! | RIMS relay      | GPIO10 |
//! | Kettle relay    | GPIO11 |
//! | Indicator       | GPIO12 |
//! | Fan             | GPIO13 |
//! | Buzzer          | GPIO14 |
//! | Buttons (ADC0)  | GPIO26 |
//! | RIMS probe      | GPIO27 |
//! | Kettle probe    | GPIO28 |

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use brewbot_core::config::{ActuatorId, ProbeId};
use brewbot_core::scheduler::Executor;
use brewbot_core::traits::{Actuator, Beeper, BinaryOutput, Devices, TemperatureProbe};
use brewbot_display::Panel;
use brewbot_drivers::heater::{PidConfig, PidRelay};
use brewbot_drivers::lcd::Hd44780;
use brewbot_drivers::output::{BlockingBeeper, GpioOutput};
use brewbot_drivers::sensor::{NtcConfig, NtcProbe};

use crate::channels::ProbeSamples;

type Pin = Output<'static>;

/// Element relay under PID control
pub type Relay = PidRelay<GpioOutput<Pin>>;

/// Character LCD on the front panel
pub type Lcd = Hd44780<Pin, Delay>;

/// The executor as wired on this board
pub type BrewExecutor = Executor<Board, Panel<Lcd>>;

/// Output pins, already configured low
pub struct BoardPins {
    pub rims_relay: Pin,
    pub kettle_relay: Pin,
    pub indicator: Pin,
    pub fan: Pin,
    pub buzzer: Pin,
}

/// Everything the executor drives
pub struct Board {
    rims_probe: NtcProbe,
    kettle_probe: NtcProbe,
    rims: Relay,
    kettle: Relay,
    indicator: GpioOutput<Pin>,
    fan: GpioOutput<Pin>,
    beeper: BlockingBeeper<Pin, Delay>,
}

impl Board {
    pub fn new(pins: BoardPins) -> Self {
        let probe_config = NtcConfig::default();
        let pid_config = PidConfig::default();

        Self {
            rims_probe: NtcProbe::new(probe_config),
            kettle_probe: NtcProbe::new(probe_config),
            rims: PidRelay::new(GpioOutput::new_active_high(pins.rims_relay), pid_config),
            kettle: PidRelay::new(GpioOutput::new_active_high(pins.kettle_relay), pid_config),
            indicator: GpioOutput::new_active_high(pins.indicator),
            fan: GpioOutput::new_active_high(pins.fan),
            beeper: BlockingBeeper::new(pins.buzzer, Delay),
        }
    }

    /// Boot chirp
    pub fn chirp(&mut self, count: u8, on_ms: u32) {
        self.beeper.chirp(count, on_ms);
    }

    /// Hand fresh ADC samples to the probes
    pub fn record_samples(&mut self, samples: ProbeSamples) {
        let [rims, kettle] = samples;
        Self::record(&mut self.rims_probe, rims);
        Self::record(&mut self.kettle_probe, kettle);
    }

    fn record(probe: &mut NtcProbe, sample: Option<u16>) {
        match sample {
            Some(raw) => probe.record_sample(raw),
            None => probe.record_error(),
        }
    }

    /// Run one control step on both element relays
    pub fn regulate(&mut self, now_ms: u64) {
        Self::regulate_one(&mut self.rims_probe, &mut self.rims, now_ms);
        Self::regulate_one(&mut self.kettle_probe, &mut self.kettle, now_ms);
    }

    fn regulate_one(probe: &mut NtcProbe, relay: &mut Relay, now_ms: u64) {
        match probe.read_celsius() {
            Ok(celsius) => relay.update(celsius, now_ms),
            Err(e) => {
                if relay.is_enabled() && relay.is_output_on() {
                    warn!("Probe fault {}, element off", e);
                }
                relay.probe_fault();
            }
        }
    }
}

impl Devices for Board {
    fn probe(&mut self, id: ProbeId) -> &mut dyn TemperatureProbe {
        match id {
            ProbeId::Rims => &mut self.rims_probe,
            ProbeId::Kettle => &mut self.kettle_probe,
        }
    }

    fn actuator(&mut self, id: ActuatorId) -> &mut dyn Actuator {
        match id {
            ActuatorId::Rims => &mut self.rims,
            ActuatorId::Kettle => &mut self.kettle,
        }
    }

    fn indicator(&mut self) -> &mut dyn BinaryOutput {
        &mut self.indicator
    }

    fn fan(&mut self) -> &mut dyn BinaryOutput {
        &mut self.fan
    }

    fn beeper(&mut self) -> &mut dyn Beeper {
        &mut self.beeper
    }
}

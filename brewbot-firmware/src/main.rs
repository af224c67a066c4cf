//! BrewBot - Brewing Controller Firmware
//!
//! Main firmware binary for RP2040-based brewing controllers. Runs a
//! multi-step, timed, temperature-regulated program for each brewing
//! function (mash, sparge, boil) on a 16x2 LCD with five buttons.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use brewbot_core::config::BrewConfig;
use brewbot_core::scheduler::Executor;
use brewbot_display::Panel;
use brewbot_drivers::lcd::{Hd44780, Hd44780Pins};

use crate::board::{Board, BoardPins};

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Beep length of the boot chirp
const BOOT_BEEP_MS: u32 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BrewBot firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // LCD in 4-bit mode
    let lcd_pins = Hd44780Pins {
        rs: Output::new(p.PIN_2, Level::Low),
        enable: Output::new(p.PIN_3, Level::Low),
        data: [
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
        ],
    };
    let mut lcd = Hd44780::new(lcd_pins, Delay);
    if let Err(e) = lcd.init() {
        error!("LCD init failed: {}", e);
    }
    let mut panel = Panel::new(lcd);
    panel.show_message("BrewBot", env!("CARGO_PKG_VERSION"));
    info!("Display initialized");

    // Relays, indicator, fan and buzzer
    let mut board = Board::new(BoardPins {
        rims_relay: Output::new(p.PIN_10, Level::Low),
        kettle_relay: Output::new(p.PIN_11, Level::Low),
        indicator: Output::new(p.PIN_12, Level::Low),
        fan: Output::new(p.PIN_13, Level::Low),
        buzzer: Output::new(p.PIN_14, Level::Low),
    });
    board.chirp(1, BOOT_BEEP_MS);
    info!("Outputs initialized");

    // ADC: button ladder and both thermistors
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let buttons = Channel::new_pin(p.PIN_26, Pull::None);
    let probes = [
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
    ];
    info!("ADC initialized");

    let config = BrewConfig::default();
    info!(
        "{} functions, tick {} ms",
        config.functions.len(),
        config.timing.tick_ms
    );
    let executor = Executor::new(config, board, panel);

    // Spawn tasks
    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::adc_task(adc, buttons, probes)));
    unwrap!(spawner.spawn(tasks::controller_task(executor)));

    info!("All tasks spawned, firmware running");
}

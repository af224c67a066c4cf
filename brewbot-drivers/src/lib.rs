//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in brewbot-core and brewbot-display, on top of `embedded-hal` 1.0:
//!
//! - Binary outputs (indicator, fan, relays) and the blocking beeper
//! - PID relay actuator with time-proportioning output
//! - Temperature probes (NTC thermistor)
//! - Analog button ladder decoder
//! - HD44780 character LCD in 4-bit mode

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod heater;
pub mod input;
pub mod lcd;
pub mod output;
pub mod sensor;

//! Heater controller implementations

pub mod pid;

pub use pid::{PidCoefficients, PidConfig, PidRelay};

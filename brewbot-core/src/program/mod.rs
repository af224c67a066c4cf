//! Brewing programs
//!
//! Each function owns a small table of (time, target temperature) steps.
//! The table is pure data; the executor decides when steps change.

pub mod step;

pub use step::{clamp_temperature, clamp_time, Step, StepTable};

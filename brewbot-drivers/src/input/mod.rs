//! Front panel input

pub mod buttons;

pub use buttons::{AnalogButtons, ButtonLadder};

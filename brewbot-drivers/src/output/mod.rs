//! On/off outputs: indicator, fan, element relays and the buzzer

pub mod beeper;
pub mod gpio;

pub use beeper::BlockingBeeper;
pub use gpio::GpioOutput;

//! Hardware abstraction traits
//!
//! These traits define the interface between the program executor and
//! the board-specific collaborators. The executor only ever talks to
//! hardware through them.

pub mod actuator;
pub mod devices;
pub mod display;
pub mod probe;

pub use actuator::{Actuator, Beeper, BinaryOutput};
pub use devices::Devices;
pub use display::{Display, Region};
pub use probe::{SensorError, TemperatureProbe};

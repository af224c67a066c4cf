//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod adc;
pub mod controller;
pub mod tick;

pub use adc::adc_task;
pub use controller::controller_task;
pub use tick::tick_task;

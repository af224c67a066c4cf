//! Program scheduling
//!
//! Millisecond deadlines, the focus blink scheduler, and the program
//! executor that ties the step table, mode machine and devices together.

pub mod blink;
pub mod deadline;
pub mod executor;

pub use blink::{Blink, BlinkScheduler};
pub use deadline::Deadline;
pub use executor::Executor;

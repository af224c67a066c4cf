//! Board-agnostic core logic for the BrewBot brewing controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits for probes, actuators, outputs and the display
//! - Step table holding each function's (time, temperature) program
//! - Mode state machine and input routing
//! - Program executor driving countdown, reminders and blinking
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod program;
pub mod scheduler;
pub mod state;
pub mod traits;

//! Configuration types
//!
//! Compile-time limits, timing constants and the function set. All types
//! have `Default` impls matching the stock BrewBot hardware.

pub mod types;

pub use types::*;

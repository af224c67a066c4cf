//! Character display layer for BrewBot
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 LCD, in-memory)
//! - `Screen`, a 16x2 in-memory backend used for tests and mirroring
//! - `Panel`, which implements the core `Display` trait on top of any
//!   backend using the fixed 16x2 field layout
//!
//! # Layout
//!
//! ```text
//!  0123456789012345
//! +----------------+
//! |Mash 2     64.25|   name, probe temperature
//! |1:30   *   66.00|   time, element status, target temperature
//! +----------------+
//! ```

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod panel;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use panel::{Field, Panel};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

//! Mode state machine and input routing
//!
//! Defines the authoritative UI modes of the controller. The machine is
//! explicit, finite, and deterministic.

pub mod events;
pub mod input;
pub mod machine;

pub use events::Event;
pub use input::{route, Handler, Key, KeyEvent};
pub use machine::{Focus, Mode, ProgramState};

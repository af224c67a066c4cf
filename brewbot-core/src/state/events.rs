//! Events that trigger mode transitions
//!
//! Guards (step bounds, zero-time checks) are evaluated by the executor
//! before an event is raised; the mode machine itself is unconditional.

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Menu events
    /// User picked the function under the menu cursor
    Enter,
    /// User left the function screen
    ExitToMenu,

    // Edit navigation events
    /// Focus moves from time to temperature
    FocusTemperature,
    /// Focus moves from temperature back to time
    FocusTime,
    /// Move to the following step
    NextStep,
    /// Move to the preceding step
    PreviousStep,
    /// Transient step move finished
    StepSettled,

    // Execution events
    /// User started the program
    Start,
    /// User interrupted a running program
    Abort,
    /// Last step counted down to zero
    Finish,
    /// User acknowledged completion
    Acknowledge,
}

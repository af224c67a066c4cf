//! Mode state machine
//!
//! Key handling and blinking are a function of the
//! current mode and an event.

use super::events::Event;

/// UI modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Function menu visible
    Menu,
    /// Editing the current step's time
    TimeEdit,
    /// Editing the current step's target temperature
    TempEdit,
    /// Moving to the next step (transient)
    StepNext,
    /// Moving to the previous step (transient)
    StepPrev,
    /// Program running, countdown active
    Exec,
    /// All steps finished, reminding the user
    Done,
}

/// UI field that has input focus and blinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Focus {
    /// Top menu entry
    MenuItem,
    /// Step time
    Time,
    /// Step target temperature
    Temperature,
    /// Run indicator inside the time
    Indicator,
}

impl Mode {
    /// Check if this mode only exists for the duration of a transition
    pub fn is_transient(&self) -> bool {
        matches!(self, Mode::StepNext | Mode::StepPrev)
    }

    /// Check if the function screen (rather than the menu) is shown
    pub fn shows_function(&self) -> bool {
        !matches!(self, Mode::Menu)
    }

    /// Field that blinks in this mode, if any
    pub fn blink_focus(&self) -> Option<Focus> {
        match self {
            Mode::Menu => Some(Focus::MenuItem),
            Mode::TimeEdit => Some(Focus::Time),
            Mode::TempEdit => Some(Focus::Temperature),
            Mode::Exec => Some(Focus::Indicator),
            Mode::StepNext | Mode::StepPrev | Mode::Done => None,
        }
    }

    /// Process an event and return the next mode
    ///
    /// Events that do not apply to the current mode leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            // Menu transitions
            (Menu, Enter) => TimeEdit,

            // TimeEdit transitions
            (TimeEdit, FocusTemperature) => TempEdit,
            (TimeEdit, PreviousStep) => StepPrev,
            (TimeEdit, ExitToMenu) => Menu,
            (TimeEdit, Start) => Exec,

            // TempEdit transitions
            (TempEdit, FocusTime) => TimeEdit,
            (TempEdit, NextStep) => StepNext,
            (TempEdit, Start) => Exec,

            // Transient step moves always land on the time field
            (StepNext, StepSettled) => TimeEdit,
            (StepPrev, StepSettled) => TimeEdit,

            // Exec transitions
            (Exec, Abort) => TimeEdit,
            (Exec, Finish) => Done,

            // Done transitions
            (Done, Acknowledge) => TimeEdit,
            (Done, ExitToMenu) => Menu,

            // Default: stay in current mode
            _ => self,
        }
    }
}

/// Program cursor: which function, which step, which mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramState {
    /// Function index
    pub function: usize,
    /// Step index within the function
    pub step: usize,
    /// Current UI mode
    pub mode: Mode,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            function: 0,
            step: 0,
            mode: Mode::Menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ProgramState::default();
        assert_eq!(state.function, 0);
        assert_eq!(state.step, 0);
        assert_eq!(state.mode, Mode::Menu);
    }

    #[test]
    fn test_edit_flow() {
        let time = Mode::Menu.transition(Event::Enter);
        assert_eq!(time, Mode::TimeEdit);

        let temp = time.transition(Event::FocusTemperature);
        assert_eq!(temp, Mode::TempEdit);

        let next = temp.transition(Event::NextStep);
        assert_eq!(next, Mode::StepNext);
        assert_eq!(next.transition(Event::StepSettled), Mode::TimeEdit);

        let prev = Mode::TimeEdit.transition(Event::PreviousStep);
        assert_eq!(prev, Mode::StepPrev);
        assert_eq!(prev.transition(Event::StepSettled), Mode::TimeEdit);

        assert_eq!(Mode::TempEdit.transition(Event::FocusTime), Mode::TimeEdit);
        assert_eq!(Mode::TimeEdit.transition(Event::ExitToMenu), Mode::Menu);
    }

    #[test]
    fn test_run_flow() {
        for editing in [Mode::TimeEdit, Mode::TempEdit] {
            assert_eq!(editing.transition(Event::Start), Mode::Exec);
        }

        assert_eq!(Mode::Exec.transition(Event::Abort), Mode::TimeEdit);
        let done = Mode::Exec.transition(Event::Finish);
        assert_eq!(done, Mode::Done);
        assert_eq!(done.transition(Event::Acknowledge), Mode::TimeEdit);
        assert_eq!(done.transition(Event::ExitToMenu), Mode::Menu);
    }

    #[test]
    fn test_unrelated_events_ignored() {
        assert_eq!(Mode::Menu.transition(Event::Start), Mode::Menu);
        assert_eq!(Mode::Exec.transition(Event::Enter), Mode::Exec);
        assert_eq!(Mode::Done.transition(Event::Finish), Mode::Done);
        assert_eq!(Mode::TempEdit.transition(Event::PreviousStep), Mode::TempEdit);
        assert_eq!(Mode::TimeEdit.transition(Event::NextStep), Mode::TimeEdit);
    }

    #[test]
    fn test_blink_focus() {
        assert_eq!(Mode::Menu.blink_focus(), Some(Focus::MenuItem));
        assert_eq!(Mode::TimeEdit.blink_focus(), Some(Focus::Time));
        assert_eq!(Mode::TempEdit.blink_focus(), Some(Focus::Temperature));
        assert_eq!(Mode::Exec.blink_focus(), Some(Focus::Indicator));
        assert_eq!(Mode::Done.blink_focus(), None);
        assert_eq!(Mode::StepNext.blink_focus(), None);
    }
}

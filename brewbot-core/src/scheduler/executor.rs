//! Program executor
//!
//! Owns the step table and the program cursor, routes keys to the
//! per-mode handlers, and drives the countdown, completion reminders and
//! focus blinking. Everything it touches outside its own state goes
//! through the [`Devices`] facade and the [`Display`] trait.
//!
//! The executor is driven by two entry points: [`Executor::handle_key`]
//! for debounced key events and [`Executor::poll`] from the main loop.
//! Both take the current monotonic time in milliseconds.

use super::blink::{Blink, BlinkScheduler};
use super::deadline::Deadline;
use crate::config::{
    normalized_setpoint, ActuatorId, BrewConfig, ProbeId, HELD_TEMP_STEP, HELD_TIME_STEP,
    TEMP_STEP, TIME_DEFAULT, TIME_STEP,
};
use crate::program::StepTable;
use crate::state::{route, Event, Focus, Handler, Key, KeyEvent, Mode, ProgramState};
use crate::traits::display::{DisplayExt, FunctionScreen};
use crate::traits::{Devices, Display, Region};

/// Number of distinct probes cached by the executor
const PROBE_COUNT: usize = 2;

fn probe_slot(id: ProbeId) -> usize {
    match id {
        ProbeId::Rims => 0,
        ProbeId::Kettle => 1,
    }
}

fn focus_region(focus: Focus) -> Region {
    match focus {
        Focus::MenuItem => Region::MenuItem,
        Focus::Time => Region::Time,
        Focus::Temperature => Region::TargetTemperature,
        Focus::Indicator => Region::Indicator,
    }
}

/// Device bindings of the selected function
#[derive(Debug, Clone, Copy)]
struct Binding {
    probe: ProbeId,
    actuator: ActuatorId,
    fan: bool,
}

/// Brewing program executor
pub struct Executor<D, S> {
    config: BrewConfig,
    table: StepTable,
    state: ProgramState,
    /// Function under the menu cursor
    menu_position: usize,
    devices: D,
    display: S,
    blink: BlinkScheduler,
    /// Countdown tick while executing
    tick: Deadline,
    /// Reminder burst while done
    reminder: Deadline,
    /// Buzzer toggle while done
    beeper: Deadline,
    beeps_remaining: u8,
    /// Last good reading per probe
    probe_temps: [f32; PROBE_COUNT],
    /// Element glyph currently drawn
    element_on: bool,
}

impl<D: Devices, S: Display> Executor<D, S> {
    /// Create an executor in the menu with default steps
    pub fn new(config: BrewConfig, devices: D, display: S) -> Self {
        let table = StepTable::new(&config);
        let blink = BlinkScheduler::new(config.timing.blink_ms);

        Self {
            config,
            table,
            state: ProgramState::default(),
            menu_position: 0,
            devices,
            display,
            blink,
            tick: Deadline::idle(),
            reminder: Deadline::idle(),
            beeper: Deadline::idle(),
            beeps_remaining: 0,
            probe_temps: [0.0; PROBE_COUNT],
            element_on: false,
        }
    }

    /// Draw the menu and start blinking the focused entry
    pub fn begin(&mut self, now: u64) {
        self.state = ProgramState::default();
        self.draw_menu();
        self.blink.start(Focus::MenuItem, now);
    }

    /// Current program cursor
    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Function under the menu cursor
    pub fn menu_position(&self) -> usize {
        self.menu_position
    }

    /// Controller configuration
    pub fn config(&self) -> &BrewConfig {
        &self.config
    }

    /// Step table
    pub fn table(&self) -> &StepTable {
        &self.table
    }

    /// Mutable step table, for preloading programs
    pub fn table_mut(&mut self) -> &mut StepTable {
        &mut self.table
    }

    /// Reminder beeps left to sound
    pub fn beeps_remaining(&self) -> u8 {
        self.beeps_remaining
    }

    /// Cached temperature of the selected function's probe
    pub fn probe_temperature(&self) -> f32 {
        self.binding()
            .map(|b| self.probe_temps[probe_slot(b.probe)])
            .unwrap_or(0.0)
    }

    /// Check if the countdown deadline is armed
    pub fn is_counting_down(&self) -> bool {
        self.tick.is_armed()
    }

    pub fn devices(&self) -> &D {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut D {
        &mut self.devices
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut S {
        &mut self.display
    }

    /// Handle a debounced key event
    pub fn handle_key(&mut self, event: KeyEvent, now: u64) {
        match route(self.state.mode, event.key) {
            Some(Handler::Menu) => self.key_press_menu(event, now),
            Some(Handler::Time) => self.key_press_time(event, now),
            Some(Handler::Temp) => self.key_press_temp(event, now),
            Some(Handler::Exec) => self.key_press_exec(now),
            Some(Handler::Done) => self.key_press_done(event, now),
            None => {}
        }
    }

    /// Service blinking, probes, countdown and reminders
    ///
    /// Call once per main loop pass.
    pub fn poll(&mut self, now: u64) {
        if let Some(blink) = self.blink.poll(now) {
            self.render_blink(blink);
        }

        self.refresh_probes();

        match self.state.mode {
            Mode::Exec => {
                self.refresh_element();
                if self.tick.expired(now) {
                    self.count_down(now);
                }
            }
            Mode::Done => self.remind(now),
            _ => {}
        }
    }

    // Key handlers

    fn key_press_menu(&mut self, event: KeyEvent, now: u64) {
        match event.key {
            Key::Up => {
                if self.menu_position > 0 {
                    self.menu_position -= 1;
                    self.draw_menu();
                    self.blink.start(Focus::MenuItem, now);
                }
            }
            Key::Down => {
                if self.menu_position + 1 < self.config.functions.len() {
                    self.menu_position += 1;
                    self.draw_menu();
                    self.blink.start(Focus::MenuItem, now);
                }
            }
            Key::Select | Key::Right => {
                if self.menu_position < self.config.functions.len() {
                    self.state.function = self.menu_position;
                    self.state.step = 0;
                    self.set_mode(Event::Enter, now);
                }
            }
            _ => {}
        }
    }

    fn key_press_time(&mut self, event: KeyEvent, now: u64) {
        let (function, step) = (self.state.function, self.state.step);

        match event.key {
            Key::Up | Key::Down => {
                let amount = if event.held { HELD_TIME_STEP } else { TIME_STEP };
                let delta = amount as i32 * event.key.adjust_delta() as i32;
                let minutes = self.table.adjust_time(function, step, delta);
                self.display.draw_time(minutes);
                if event.held {
                    self.blink.postpone(now);
                }
            }
            Key::Right => self.set_mode(Event::FocusTemperature, now),
            Key::Left => {
                if step > 0 {
                    self.set_mode(Event::PreviousStep, now);
                } else {
                    self.set_mode(Event::ExitToMenu, now);
                }
            }
            Key::Select => self.try_start(now),
            Key::None => {}
        }
    }

    fn key_press_temp(&mut self, event: KeyEvent, now: u64) {
        let (function, step) = (self.state.function, self.state.step);

        match event.key {
            Key::Up | Key::Down => {
                let amount = if event.held { HELD_TEMP_STEP } else { TEMP_STEP };
                let delta = amount * event.key.adjust_delta() as f32;
                let celsius = self.table.adjust_target(function, step, delta);
                self.display
                    .draw_temperature(Region::TargetTemperature, celsius);
                self.write_setpoint(celsius);
                if event.held {
                    self.blink.postpone(now);
                }
            }
            Key::Right => {
                if step + 1 < self.table.num_steps(function) {
                    self.set_mode(Event::NextStep, now);
                }
            }
            Key::Left => self.set_mode(Event::FocusTime, now),
            Key::Select => self.try_start(now),
            Key::None => {}
        }
    }

    fn key_press_exec(&mut self, now: u64) {
        self.set_mode(Event::Abort, now);
    }

    fn key_press_done(&mut self, event: KeyEvent, now: u64) {
        match event.key {
            Key::Left => self.set_mode(Event::ExitToMenu, now),
            _ => self.set_mode(Event::Acknowledge, now),
        }
    }

    fn try_start(&mut self, now: u64) {
        if self.table.time(self.state.function, self.state.step) != 0 {
            self.set_mode(Event::Start, now);
        }
    }

    // Transitions

    fn set_mode(&mut self, event: Event, now: u64) {
        let from = self.state.mode;
        let to = from.transition(event);
        if to == from {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("mode {} -> {} on {}", from, to, event);

        self.leave(from, to);
        self.state.mode = to;
        self.enter(from, to, now);
    }

    fn leave(&mut self, from: Mode, to: Mode) {
        if let Some(focus) = self.blink.stop() {
            self.draw_focus(focus);
        }

        match from {
            Mode::Exec => {
                self.tick.cancel();
                self.release_outputs();
                if to == Mode::TimeEdit {
                    self.beep();
                }
            }
            Mode::Done => {
                self.reminder.cancel();
                self.beeper.cancel();
                self.beeps_remaining = 0;
                self.devices.beeper().write(false);
                if to == Mode::TimeEdit {
                    self.state.step = 0;
                    self.table
                        .set_time(self.state.function, 0, TIME_DEFAULT as i32);
                    self.beep();
                }
            }
            _ => {}
        }
    }

    fn enter(&mut self, from: Mode, to: Mode, now: u64) {
        match to {
            Mode::Menu => self.draw_menu(),
            Mode::TimeEdit => {
                if from != Mode::TempEdit {
                    self.draw_function();
                }
            }
            Mode::TempEdit => {}
            Mode::StepNext => {
                self.state.step += 1;
                self.set_mode(Event::StepSettled, now);
            }
            Mode::StepPrev => {
                self.state.step = self.state.step.saturating_sub(1);
                self.set_mode(Event::StepSettled, now);
            }
            Mode::Exec => self.start_program(now),
            Mode::Done => self.finish_program(now),
        }

        if let Some(focus) = to.blink_focus() {
            self.blink.start(focus, now);
        }
    }

    fn start_program(&mut self, now: u64) {
        let function = self.state.function;
        if let Some(first) = self.table.first_active_step(function) {
            self.state.step = first;
        }

        if let Some(binding) = self.binding() {
            let target = self.table.target(function, self.state.step);
            let actuator = self.devices.actuator(binding.actuator);
            actuator.write_setpoint(normalized_setpoint(target));
            actuator.enable(true);
            self.devices.indicator().write(true);
            if binding.fan {
                self.devices.fan().write(true);
            }
        }

        self.element_on = false;
        self.draw_function();
        self.tick.arm(now, self.config.timing.tick_ms);
        self.beep();
    }

    fn finish_program(&mut self, now: u64) {
        #[cfg(feature = "defmt")]
        defmt::info!("program complete");

        let timing = self.config.timing;
        self.release_outputs();
        self.display.draw_indicator();
        self.beeps_remaining = timing.done_beeps;
        self.reminder.arm(now, timing.reminder_ms);
        self.beeper.arm(now, timing.beep_ms);
    }

    /// Turn off everything a run switched on
    fn release_outputs(&mut self) {
        if let Some(binding) = self.binding() {
            self.devices.actuator(binding.actuator).enable(false);
        }
        self.devices.indicator().write(false);
        self.devices.fan().write(false);

        if self.element_on {
            self.element_on = false;
            self.display.clear(Region::ElementStatus);
        }
    }

    // Periodic work

    fn count_down(&mut self, now: u64) {
        let (function, step) = (self.state.function, self.state.step);
        let minutes = match self.table.get_mut(function, step) {
            Some(current) => {
                current.tick();
                current.time()
            }
            None => 0,
        };

        self.display.draw_time(minutes);
        self.tick.arm(now, self.config.timing.tick_ms);

        if minutes == 0 {
            self.advance(now);
        }
    }

    /// Move to the next step with time left, or finish
    fn advance(&mut self, now: u64) {
        let function = self.state.function;
        let Some(next) = self.table.next_active_step(function, self.state.step) else {
            self.set_mode(Event::Finish, now);
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::info!("advancing to step {}", next);

        let timing = self.config.timing;
        self.state.step = next;
        self.write_setpoint(self.table.target(function, next));

        // Countdown holds for two beep widths, then ticks on as usual
        let stall_ms = timing.beep_ms.saturating_mul(2);
        self.tick.arm(now, stall_ms.saturating_add(timing.tick_ms));
        self.devices
            .beeper()
            .pulse(timing.beep_ms, timing.beep_ms.saturating_mul(2));

        self.draw_function();
    }

    fn remind(&mut self, now: u64) {
        let timing = self.config.timing;

        if self.reminder.expired(now) {
            self.beeps_remaining = timing.reminder_beeps;
            self.reminder.arm(now, timing.reminder_ms);
        }

        if self.beeper.expired(now) {
            self.beeper.arm(now, timing.beep_ms);

            let beeper = self.devices.beeper();
            if self.beeps_remaining > 0 || beeper.is_on() {
                let on = !beeper.is_on();
                beeper.write(on);
                if !on {
                    self.beeps_remaining = self.beeps_remaining.saturating_sub(1);
                }
            }
        }
    }

    fn refresh_probes(&mut self) {
        for id in [ProbeId::Rims, ProbeId::Kettle] {
            if let Some(celsius) = self.devices.probe(id).take_reading() {
                self.probe_temps[probe_slot(id)] = celsius;

                let bound = self.binding().map(|b| b.probe) == Some(id);
                if bound && self.state.mode.shows_function() {
                    self.display
                        .draw_temperature(Region::ProbeTemperature, celsius);
                }
            }
        }
    }

    fn refresh_element(&mut self) {
        let Some(binding) = self.binding() else {
            return;
        };

        let on = self.devices.actuator(binding.actuator).is_output_on();
        if on == self.element_on {
            return;
        }

        self.element_on = on;
        if on {
            self.display.draw_element_status();
        } else {
            self.display.clear(Region::ElementStatus);
        }
    }

    // Helpers

    fn binding(&self) -> Option<Binding> {
        self.config.function(self.state.function).map(|f| Binding {
            probe: f.probe,
            actuator: f.actuator,
            fan: f.fan,
        })
    }

    fn write_setpoint(&mut self, celsius: f32) {
        if let Some(binding) = self.binding() {
            self.devices
                .actuator(binding.actuator)
                .write_setpoint(normalized_setpoint(celsius));
        }
    }

    fn beep(&mut self) {
        let beep_ms = self.config.timing.beep_ms;
        self.devices.beeper().pulse(beep_ms, beep_ms);
    }

    fn draw_menu(&mut self) {
        let items = self.config.functions.iter().map(|f| f.label.as_str());
        self.display.draw_menu(items, self.menu_position);
    }

    fn draw_function(&mut self) {
        let (function, step) = (self.state.function, self.state.step);
        let Some(config) = self.config.function(function) else {
            return;
        };

        let name = config.label.with_step(step, config.steps());
        let probe = self.probe_temps[probe_slot(config.probe)];
        let current = self.table.step(function, step);

        self.display.draw_function(&FunctionScreen {
            name: name.as_str(),
            target: current.target(),
            probe,
            minutes: current.time(),
            element_on: self.element_on,
        });
    }

    fn draw_focus(&mut self, focus: Focus) {
        let (function, step) = (self.state.function, self.state.step);

        match focus {
            Focus::MenuItem => {
                if let Some(config) = self.config.function(self.menu_position) {
                    self.display.draw_text(0, 0, config.label.as_str());
                }
            }
            Focus::Time => self.display.draw_time(self.table.time(function, step)),
            Focus::Temperature => self.display.draw_temperature(
                Region::TargetTemperature,
                self.table.target(function, step),
            ),
            Focus::Indicator => self.display.draw_indicator(),
        }
    }

    fn render_blink(&mut self, blink: Blink) {
        if blink.visible {
            self.draw_focus(blink.focus);
        } else {
            self.display.clear(focus_region(blink.focus));
        }
    }
}

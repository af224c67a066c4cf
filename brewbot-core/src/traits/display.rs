//! Character display trait
//!
//! The executor draws through these primitives only. Field positions are
//! owned by the implementation; the executor names fields by [`Region`].

/// Named display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Function label (with step suffix)
    Name,
    /// Step time, `H:MM`
    Time,
    /// Step target temperature
    TargetTemperature,
    /// Live probe temperature
    ProbeTemperature,
    /// The `:` inside the time, blinked while running
    Indicator,
    /// Single-character heating element glyph
    ElementStatus,
    /// Focused (top) menu entry
    MenuItem,
}

/// Trait for the character display
///
/// Drawing is infallible from the executor's point of view: the UI has no
/// error channel, so implementations deal with transport errors themselves.
pub trait Display {
    /// Clear the whole screen
    fn clear_all(&mut self);

    /// Blank a single field
    fn clear(&mut self, region: Region);

    /// Draw text at a character position
    fn draw_text(&mut self, col: u8, row: u8, text: &str);

    /// Draw a step time given in minutes as `H:MM`
    fn draw_time(&mut self, minutes: u16);

    /// Draw a temperature into [`Region::TargetTemperature`] or
    /// [`Region::ProbeTemperature`]
    fn draw_temperature(&mut self, region: Region, celsius: f32);

    /// Draw the run indicator (`:`)
    fn draw_indicator(&mut self);

    /// Draw the element status glyph
    fn draw_element_status(&mut self);
}

/// Snapshot of what the function screen shows
#[derive(Debug, Clone, Copy)]
pub struct FunctionScreen<'a> {
    /// Label with step suffix
    pub name: &'a str,
    /// Step target temperature
    pub target: f32,
    /// Cached probe temperature
    pub probe: f32,
    /// Step time remaining (minutes)
    pub minutes: u16,
    /// Heating element energized
    pub element_on: bool,
}

/// Helper trait for drawing whole screens
pub trait DisplayExt: Display {
    /// Draw the function screen from scratch
    fn draw_function(&mut self, screen: &FunctionScreen<'_>) {
        self.clear_all();
        self.draw_text(0, 0, screen.name);
        self.draw_temperature(Region::TargetTemperature, screen.target);
        self.draw_temperature(Region::ProbeTemperature, screen.probe);
        self.draw_time(screen.minutes);
        self.draw_indicator();
        if screen.element_on {
            self.draw_element_status();
        } else {
            self.clear(Region::ElementStatus);
        }
    }

    /// Draw the function menu with `items[position]` on the top row
    fn draw_menu<'a, I>(&mut self, items: I, position: usize)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.clear_all();
        for (row, item) in items.into_iter().skip(position).take(2).enumerate() {
            self.draw_text(0, row as u8, item);
        }
    }
}

// Blanket implementation for all Display types
impl<T: Display + ?Sized> DisplayExt for T {}

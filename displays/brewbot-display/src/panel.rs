//! 16x2 panel layout
//!
//! Implements the core [`Display`] trait on any [`DisplayBackend`]. Field
//! positions live here so the executor only names regions.
//!
//! Backend errors are absorbed: the UI has no error channel. They are
//! counted, the last one is kept, and each is logged when `defmt` is on.

use core::fmt::Write;

use brewbot_core::traits::{Display, Region};
use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Width of a temperature field (`-120.00`)
const TEMP_WIDTH: usize = 7;

/// Glyph shown while the heating element is energized
const ELEMENT_GLYPH: &str = "*";

/// Run indicator glyph, the colon inside `H:MM`
const INDICATOR_GLYPH: &str = ":";

/// A rectangular text field on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub col: u8,
    pub row: u8,
    pub width: u8,
}

impl Field {
    const fn new(col: u8, row: u8, width: u8) -> Self {
        Self { col, row, width }
    }

    /// Position and width of a region
    pub const fn of(region: Region) -> Self {
        match region {
            Region::Name => Field::new(0, 0, 8),
            Region::MenuItem => Field::new(0, 0, 6),
            Region::ProbeTemperature => Field::new(9, 0, TEMP_WIDTH as u8),
            Region::Time => Field::new(0, 1, 4),
            Region::Indicator => Field::new(1, 1, 1),
            Region::ElementStatus => Field::new(7, 1, 1),
            Region::TargetTemperature => Field::new(9, 1, TEMP_WIDTH as u8),
        }
    }
}

/// Format minutes as `H:MM`
///
/// Hours above 9 wrap to a single digit; step times never exceed 9:59.
pub fn format_time(minutes: u16) -> String<4> {
    let mut out = String::new();
    let _ = write!(out, "{}:{:02}", (minutes / 60) % 10, minutes % 60);
    out
}

/// Format a temperature right-aligned in a 7-character field
///
/// Two decimals. Negative values keep the sign next to the digits.
pub fn format_temperature(celsius: f32) -> Result<String<TEMP_WIDTH>, DisplayError> {
    let mut out = String::new();
    write!(out, "{:>7.2}", celsius).map_err(|_| DisplayError::BufferOverflow)?;
    Ok(out)
}

/// The 16x2 panel
pub struct Panel<B> {
    backend: B,
    errors: u32,
    last_error: Option<DisplayError>,
}

impl<B: DisplayBackend> Panel<B> {
    /// Wrap a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            errors: 0,
            last_error: None,
        }
    }

    /// Number of backend errors absorbed so far
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Most recent backend error
    pub fn last_error(&self) -> Option<DisplayError> {
        self.last_error
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Show a two-line message, e.g. the boot splash
    pub fn show_message(&mut self, top: &str, bottom: &str) {
        let result = Self::write_message(&mut self.backend, top, bottom);
        self.absorb(result);
    }

    fn write_message(backend: &mut B, top: &str, bottom: &str) -> Result<(), DisplayError> {
        backend.clear()?;
        backend.draw_text(0, 0, top)?;
        backend.draw_text(1, 0, bottom)?;
        backend.flush()
    }

    fn write_field(&mut self, region: Region, text: &str) {
        let field = Field::of(region);
        let result = self.backend.draw_text(field.row, field.col, text);
        self.absorb(result);
    }

    fn absorb(&mut self, result: Result<(), DisplayError>) {
        if let Err(e) = result {
            self.errors = self.errors.saturating_add(1);
            self.last_error = Some(e);

            #[cfg(feature = "defmt")]
            defmt::warn!("display error: {}", e);
        }
    }
}

impl<B: DisplayBackend> Display for Panel<B> {
    fn clear_all(&mut self) {
        let result = self.backend.clear();
        self.absorb(result);
    }

    fn clear(&mut self, region: Region) {
        const BLANK: &str = "        ";
        let width = Field::of(region).width as usize;
        self.write_field(region, &BLANK[..width.min(BLANK.len())]);
    }

    fn draw_text(&mut self, col: u8, row: u8, text: &str) {
        let result = self.backend.draw_text(row, col, text);
        self.absorb(result);
    }

    fn draw_time(&mut self, minutes: u16) {
        let text = format_time(minutes);
        self.write_field(Region::Time, &text);
    }

    fn draw_temperature(&mut self, region: Region, celsius: f32) {
        match format_temperature(celsius) {
            Ok(text) => self.write_field(region, &text),
            Err(e) => self.absorb(Err(e)),
        }
    }

    fn draw_indicator(&mut self) {
        self.write_field(Region::Indicator, INDICATOR_GLYPH);
    }

    fn draw_element_status(&mut self) {
        self.write_field(Region::ElementStatus, ELEMENT_GLYPH);
    }
}

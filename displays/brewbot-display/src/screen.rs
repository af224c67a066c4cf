//! In-memory character screen
//!
//! A 16x2 character grid implementing [`DisplayBackend`]. Used as the
//! test double for the panel.

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 16;

/// Replacement for characters the panel cannot show
const UNPRINTABLE: u8 = b'?';

/// Screen buffer for text-mode displays
#[derive(Clone)]
pub struct Screen {
    /// Current display content, ASCII only
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new blank screen
    pub fn new() -> Self {
        Self {
            cells: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
        }
    }

    /// Blank every cell
    pub fn blank(&mut self) {
        self.cells = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
    }

    /// Write text at a position, truncating at the right edge
    ///
    /// Returns the number of cells written.
    pub fn write(&mut self, row: usize, col: usize, text: &str) -> usize {
        let Some(line) = self.cells.get_mut(row) else {
            return 0;
        };

        let mut written = 0;
        for (cell, c) in line.iter_mut().skip(col).zip(text.chars()) {
            *cell = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                UNPRINTABLE
            };
            written += 1;
        }

        written
    }

    /// Get the content of a specific row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|line| core::str::from_utf8(line).ok())
    }
}

impl DisplayBackend for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.blank();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.write(row as usize, col as usize, text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        let top = self.line(0).unwrap_or("");
        let bottom = self.line(1).unwrap_or("");
        defmt::write!(f, "Screen[{=str}, {=str}]", top, bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_blank() {
        let screen = Screen::new();
        assert_eq!(screen.line(0), Some("                "));
        assert_eq!(screen.line(1), Some("                "));
        assert_eq!(screen.line(2), None);
    }

    #[test]
    fn test_write_truncates_at_edge() {
        let mut screen = Screen::new();
        let written = screen.write(0, 12, "Sparge");
        assert_eq!(written, 4);
        assert_eq!(screen.line(0), Some("            Spar"));
    }

    #[test]
    fn test_unprintable_replaced() {
        let mut screen = Screen::new();
        screen.write(1, 0, "60°C");
        assert_eq!(screen.line(1), Some("60?C            "));
    }

    #[test]
    fn test_backend_rejects_bad_coordinates() {
        let mut screen = Screen::new();
        assert_eq!(
            screen.draw_text(2, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            screen.draw_text(0, 16, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(screen.dimensions(), (16, 2));
    }

    #[test]
    fn test_clear_blanks_both_rows() {
        let mut screen = Screen::new();
        screen.draw_text(0, 0, "Mash 1").unwrap();
        screen.draw_text(1, 0, "1:30").unwrap();

        screen.clear().unwrap();
        assert_eq!(screen.line(0), Some("                "));
        assert_eq!(screen.line(1), Some("                "));
    }
}

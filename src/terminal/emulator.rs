//! Character-grid view over the vt100 parser.
//!
//! The parser keeps fg/bg and the inverse attribute separately; [`Emulator::cell`]
//! folds inverse video into the colors so that a reversed default cell shows up as
//! `bg == CellColor::DefaultFg`, which is what the contrast correction keys off.

pub const DEFAULT_COLS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 24;

/// A cell color: a concrete palette entry or one of the two "inherit" sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    DefaultFg,
    DefaultBg,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Empty for the trailing half of a wide character.
    pub text: String,
    pub fg: CellColor,
    pub bg: CellColor,
    pub reverse: bool,
}

impl Cell {
    pub fn blank() -> Self {
        Self {
            text: " ".to_string(),
            fg: CellColor::DefaultFg,
            bg: CellColor::DefaultBg,
            reverse: false,
        }
    }
}

pub struct Emulator {
    parser: vt100::Parser,
}

impl Emulator {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            parser: vt100::Parser::new(rows.max(1), cols.max(1), 0),
        }
    }

    pub fn process(&mut self, bytes: &[u8]) {
        self.parser.process(bytes);
    }

    /// Writes a line straight into the grid, bypassing the pty.
    pub fn write_line(&mut self, text: &str) {
        self.parser.process(text.as_bytes());
        self.parser.process(b"\r\n");
    }

    /// `(cols, rows)`.
    pub fn size(&self) -> (u16, u16) {
        let (rows, cols) = self.parser.screen().size();
        (cols, rows)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        let cols = cols.max(1);
        let rows = rows.max(1);
        if self.size() == (cols, rows) {
            return false;
        }
        self.parser.screen_mut().set_size(rows, cols);
        true
    }

    /// `(x, y)` of the cursor.
    pub fn cursor(&self) -> (u16, u16) {
        let (row, col) = self.parser.screen().cursor_position();
        (col, row)
    }

    pub fn cell(&self, x: u16, y: u16) -> Cell {
        let Some(cell) = self.parser.screen().cell(y, x) else {
            return Cell::blank();
        };

        let mut fg = convert_color(cell.fgcolor(), CellColor::DefaultFg);
        let mut bg = convert_color(cell.bgcolor(), CellColor::DefaultBg);
        let reverse = cell.inverse();
        if reverse {
            std::mem::swap(&mut fg, &mut bg);
        }

        let text = if cell.is_wide_continuation() {
            String::new()
        } else if cell.has_contents() {
            cell.contents().to_string()
        } else {
            " ".to_string()
        };

        Cell {
            text,
            fg,
            bg,
            reverse,
        }
    }

    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl std::fmt::Debug for Emulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emulator")
            .field("size", &self.size())
            .field("cursor", &self.cursor())
            .finish()
    }
}

fn convert_color(color: vt100::Color, default: CellColor) -> CellColor {
    match color {
        vt100::Color::Default => default,
        vt100::Color::Idx(idx) => CellColor::Indexed(idx),
        vt100::Color::Rgb(r, g, b) => CellColor::Rgb(r, g, b),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/terminal/emulator.rs"]
mod tests;

//! Cell color resolution with contrast correction.

use ratatui::style::{Color, Modifier, Style};

use super::emulator::CellColor;

pub const FORCED_BLACK: Color = Color::Rgb(0, 0, 0);

/// Theme colors the two sentinels resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalPalette {
    pub dark_text: Color,
    pub light_text: Color,
}

impl Default for TerminalPalette {
    fn default() -> Self {
        Self {
            dark_text: Color::Rgb(0x4c, 0x4f, 0x69),
            light_text: Color::Rgb(0xef, 0xf1, 0xf5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    pub fg: Color,
    /// `None` keeps the host terminal's background.
    pub bg: Option<Color>,
    pub reversed: bool,
}

impl ResolvedColors {
    pub fn style(self) -> Style {
        let mut style = Style::default().fg(self.fg);
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.reversed {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

pub fn resolve(
    fg: CellColor,
    bg: CellColor,
    at_cursor: bool,
    focused: bool,
    palette: &TerminalPalette,
) -> ResolvedColors {
    let bg_color = match bg {
        CellColor::DefaultBg => None,
        // Inverse video of the default foreground.
        CellColor::DefaultFg => Some(palette.dark_text),
        CellColor::Indexed(idx) => Some(Color::Indexed(idx)),
        CellColor::Rgb(r, g, b) => Some(Color::Rgb(r, g, b)),
    };

    let mut fg_color = match fg {
        CellColor::DefaultFg => palette.dark_text,
        CellColor::DefaultBg => palette.light_text,
        CellColor::Indexed(idx) => Color::Indexed(idx),
        CellColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
    };

    if bg_color.is_some() {
        if bg == CellColor::DefaultFg {
            fg_color = palette.light_text;
        } else if is_light_background(bg) {
            fg_color = FORCED_BLACK;
        }
    }

    ResolvedColors {
        fg: fg_color,
        bg: bg_color,
        reversed: at_cursor && focused,
    }
}

pub fn is_light_background(color: CellColor) -> bool {
    match color {
        CellColor::DefaultFg | CellColor::DefaultBg => false,
        CellColor::Indexed(idx) => is_light_index(idx),
        CellColor::Rgb(r, g, b) => quantize(r) + quantize(g) + quantize(b) >= 9,
    }
}

pub fn is_light_index(idx: u8) -> bool {
    match idx {
        7 | 15 => true,
        9..=14 => true,
        244..=255 => true,
        16..=231 => {
            let cube = idx - 16;
            let b = cube % 6;
            let g = (cube / 6) % 6;
            let r = cube / 36;
            r + g + b >= 9
        }
        _ => false,
    }
}

/// Maps a channel onto the 0..=5 scale of the 256-color cube.
fn quantize(channel: u8) -> u8 {
    ((u16::from(channel) * 5 + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/terminal/palette.rs"]
mod tests;

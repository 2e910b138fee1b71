//! UI theme: every color the renderer uses, in one place.

use ratatui::style::{Color, Modifier, Style};

use crate::terminal::TerminalPalette;

const COLOR_SUPPORT_ENV: &str = "K8S_DOJO_COLOR_SUPPORT";

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_bold: Color,
    pub badge_fg: Color,
    pub background_alt: Color,
    pub border: Color,
    pub border_active: Color,
    /// What the embedded shell's default foreground resolves to.
    pub terminal_dark_text: Color,
    /// What the embedded shell's default background resolves to when used as a foreground.
    pub terminal_light_text: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Some(support) = std::env::var(COLOR_SUPPORT_ENV)
        .ok()
        .and_then(|value| parse_color_support(&value))
    {
        return support;
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    color_support_from_env(&colorterm, &term)
}

fn parse_color_support(value: &str) -> Option<TerminalColorSupport> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" | "rgb" => Some(TerminalColorSupport::TrueColor),
        "256" | "ansi256" => Some(TerminalColorSupport::Ansi256),
        "16" | "ansi16" | "basic" => Some(TerminalColorSupport::Ansi16),
        _ => None,
    }
}

fn color_support_from_env(colorterm: &str, term: &str) -> TerminalColorSupport {
    let direct = |s: &str| s.contains("truecolor") || s.contains("24bit") || s.contains("direct");
    if direct(colorterm) || direct(term) {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0xcb, 0xa6, 0xf7),
            secondary: Color::Rgb(0x74, 0xc7, 0xec),
            accent: Color::Rgb(0xfa, 0xb3, 0x87),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
            warning: Color::Rgb(0xf9, 0xe2, 0xaf),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_muted: Color::Rgb(0x6c, 0x70, 0x86),
            text_bold: Color::Rgb(0xff, 0xff, 0xff),
            badge_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            background_alt: Color::Rgb(0x31, 0x32, 0x44),
            border: Color::Rgb(0x45, 0x47, 0x5a),
            border_active: Color::Rgb(0xcb, 0xa6, 0xf7),
            terminal_dark_text: Color::Rgb(0x4c, 0x4f, 0x69),
            terminal_light_text: Color::Rgb(0xef, 0xf1, 0xf5),
        }
    }
}

impl UiTheme {
    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for color in [
            &mut self.primary,
            &mut self.secondary,
            &mut self.accent,
            &mut self.success,
            &mut self.warning,
            &mut self.error,
            &mut self.text,
            &mut self.text_muted,
            &mut self.text_bold,
            &mut self.badge_fg,
            &mut self.background_alt,
            &mut self.border,
            &mut self.border_active,
            &mut self.terminal_dark_text,
            &mut self.terminal_light_text,
        ] {
            *color = map_color_for_support(*color, support);
        }
    }

    pub fn terminal_palette(&self) -> TerminalPalette {
        TerminalPalette {
            dark_text: self.terminal_dark_text,
            light_text: self.terminal_light_text,
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn label(&self) -> Style {
        Style::default()
            .fg(self.text_muted)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// The highlighted row of a list or the selected button of a dialog.
    pub fn active_item(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.background_alt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border)
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(nearest_ansi16(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(nearest_ansi16(r, g, b))
        }
        (_, value) => value,
    }
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    (16u8..=255)
        .min_by_key(|&index| {
            let (pr, pg, pb) = ansi256_index_to_rgb(index);
            color_distance_sq((r, g, b), (pr, pg, pb))
        })
        .unwrap_or(16)
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    ANSI16_RGB
        .iter()
        .enumerate()
        .min_by_key(|(_, &rgb)| color_distance_sq((r, g, b), rgb))
        .map_or(0, |(index, _)| index as u8)
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI16_RGB[index as usize],
        16..=231 => {
            let offset = index - 16;
            (
                CUBE_LEVELS[(offset / 36) as usize],
                CUBE_LEVELS[((offset / 6) % 6) as usize],
                CUBE_LEVELS[(offset % 6) as usize],
            )
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    }
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = i32::from(x) - i32::from(y);
        (diff * diff) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;

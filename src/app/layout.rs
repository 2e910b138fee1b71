//! Screen regions for the dashboard and scenario views.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;
pub const HEADER_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 2;
const SIDEBAR_MIN_WIDTH: u16 = 24;
const SIDEBAR_MAX_WIDTH: u16 = 40;
const INFO_MIN_HEIGHT: u16 = 8;
const INFO_PERCENT: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DojoLayout {
    pub header: Rect,
    pub sidebar: Rect,
    /// Scenario details above the shell.
    pub info: Rect,
    pub terminal: Rect,
    pub status: Rect,
}

pub fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// A quarter of the width, kept between 24 and 40 columns.
pub fn sidebar_width(width: u16) -> u16 {
    (width / 4).clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH).min(width)
}

pub fn info_height(main_height: u16) -> u16 {
    let percent = (u32::from(main_height) * u32::from(INFO_PERCENT) / 100) as u16;
    percent.max(INFO_MIN_HEIGHT).min(main_height)
}

impl DojoLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);
        let main = rows[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(sidebar_width(main.width)),
                Constraint::Min(0),
            ])
            .split(main);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(info_height(main.height)),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        Self {
            header: rows[0],
            sidebar: columns[0],
            info: right[0],
            terminal: right[1],
            status: rows[2],
        }
    }
}

/// Shell grid inside the terminal panel: one border row top and bottom, border plus one
/// column of padding left and right.
pub fn terminal_grid_size(panel: Rect) -> (u16, u16) {
    (
        panel.width.saturating_sub(4).max(1),
        panel.height.saturating_sub(2).max(1),
    )
}

/// A `width` x `height` box centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/layout.rs"]
mod tests;

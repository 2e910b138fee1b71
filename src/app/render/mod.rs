use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::{self, DojoLayout, MIN_HEIGHT, MIN_WIDTH};
use super::App;
use crate::kernel::{FocusArea, View};

mod chrome;
mod panels;
mod screens;

pub(super) fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let state = app.store.state();
    let theme = &app.theme;

    if state.quitting {
        frame.render_widget(
            Paragraph::new("Cleaning up... Goodbye!").style(theme.muted()),
            area,
        );
        return;
    }

    if layout::is_too_small(area) {
        let message = format!(
            "Terminal too small. Minimum: {MIN_WIDTH}x{MIN_HEIGHT}, Current: {}x{}",
            area.width, area.height
        );
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.error_text())
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    match &state.view {
        View::ConfirmRestart {
            scenario_id,
            selection,
        } => {
            render_backdrop(app, frame, area);
            screens::render_confirm_restart(frame, area, state, scenario_id, *selection, theme)
        }
        View::ConfirmQuit { selection } => {
            render_backdrop(app, frame, area);
            screens::render_confirm_quit(frame, area, *selection, theme)
        }
        view => render_view(app, frame, area, view),
    }
}

/// Draws the view a dialog interrupted underneath the dialog.
fn render_backdrop(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(previous) = app.store.state().previous.as_deref() {
        render_view(app, frame, area, previous);
    }
}

fn render_view(app: &App, frame: &mut Frame, area: Rect, view: &View) {
    let state = app.store.state();
    let theme = &app.theme;
    match view {
        View::VersionSelect { selected } => {
            screens::render_version_select(frame, area, state, *selected, theme)
        }
        View::Bootstrap { sync, .. } => screens::render_bootstrap(frame, area, sync, theme),
        View::Dashboard | View::ScenarioRunning(_) => render_workspace(app, frame, area, view),
        View::Success(success) => screens::render_success(frame, area, state, success, theme),
        View::ConfirmRestart { .. } | View::ConfirmQuit { .. } => {}
    }
}

/// Header, sidebar, info panel, shell and status bar.
fn render_workspace(app: &App, frame: &mut Frame, area: Rect, view: &View) {
    let state = app.store.state();
    let theme = &app.theme;
    let regions = DojoLayout::compute(area);
    let running = matches!(view, View::ScenarioRunning(_));
    // Behind a dialog nothing is focused.
    let interactive = matches!(state.view, View::Dashboard | View::ScenarioRunning(_));
    // Outside a scenario the sidebar is the only thing that takes input.
    let focused = |target: FocusArea| {
        interactive && state.focus == target && (running || target == FocusArea::Sidebar)
    };

    chrome::render_header(frame, regions.header, state, theme);
    panels::render_sidebar(frame, regions.sidebar, state, focused(FocusArea::Sidebar), theme);
    match view {
        View::ScenarioRunning(scenario) => panels::render_scenario_info(
            frame,
            regions.info,
            state,
            scenario,
            focused(FocusArea::Content),
            theme,
        ),
        _ => panels::render_dashboard_preview(frame, regions.info, state, theme),
    }
    panels::render_terminal(
        frame,
        regions.terminal,
        &app.session,
        running,
        focused(FocusArea::Terminal),
        theme,
    );
    chrome::render_status_bar(frame, regions.status, chrome::status_bindings(state), theme);
}

/// Whole seconds as `1h2m3s`, dropping leading zero units.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let total = (elapsed.as_millis() + 500) / 1000;
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

pub(crate) fn progress_bar(width: usize, fraction: f64) -> String {
    let filled = ((width as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Cuts `text` to `max` display columns, marking the cut with `..`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max <= 2 {
        return ".".repeat(max);
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 2 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("..");
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/app/render.rs"]
mod tests;

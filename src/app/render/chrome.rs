use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use ratatui::Frame;

use super::format_elapsed;
use crate::app::theme::UiTheme;
use crate::kernel::{AppState, View};

type Binding = (&'static str, &'static str);

const VERSION_SELECT: &[Binding] = &[
    ("↑/k", "up"),
    ("↓/j", "down"),
    ("enter", "select"),
    ("q", "quit"),
];
const BOOTSTRAP: &[Binding] = &[("q", "quit")];
const DASHBOARD: &[Binding] = &[
    ("↑/k", "up"),
    ("↓/j", "down"),
    ("h/l", "collapse/expand"),
    ("enter", "start"),
    ("q", "quit"),
];
const SCENARIO: &[Binding] = &[
    ("c", "check"),
    ("h", "hints"),
    ("n/p", "next/prev hint"),
    ("tab", "focus"),
    ("esc", "back"),
    ("q", "quit"),
];
const SCENARIO_SHELL: &[Binding] = &[("tab", "leave terminal"), ("keys", "go to the shell")];
const SUCCESS: &[Binding] = &[
    ("←/→", "choose"),
    ("enter", "confirm"),
    ("r", "retry"),
    ("m", "menu"),
    ("q", "quit"),
];
const DIALOG: &[Binding] = &[
    ("←/→", "choose"),
    ("enter", "confirm"),
    ("y", "yes"),
    ("n/esc", "no"),
];

/// Key hints for whatever currently receives input.
pub(super) fn status_bindings(state: &AppState) -> &'static [Binding] {
    match state.view {
        View::VersionSelect { .. } => VERSION_SELECT,
        View::Bootstrap { .. } => BOOTSTRAP,
        View::Dashboard => DASHBOARD,
        View::ScenarioRunning(_) if state.terminal_has_focus() => SCENARIO_SHELL,
        View::ScenarioRunning(_) => SCENARIO,
        View::Success(_) => SUCCESS,
        View::ConfirmRestart { .. } | View::ConfirmQuit { .. } => DIALOG,
    }
}

pub(super) fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border(false))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Span::styled(state.header_title(), theme.title())),
        inner,
    );

    let mut right = Vec::new();
    if let Some(version) = &state.cluster_version {
        right.push(Span::styled(
            format!(" {version} "),
            Style::default()
                .fg(theme.badge_fg)
                .bg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(running) = state.running() {
        if !right.is_empty() {
            right.push(Span::raw("  "));
        }
        right.push(Span::styled(
            format!("⏱ {}", format_elapsed(running.elapsed())),
            theme.key(),
        ));
    }
    if !right.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(right)).alignment(Alignment::Right),
            inner,
        );
    }
}

pub(super) fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    bindings: &[Binding],
    theme: &UiTheme,
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border(false))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = Vec::with_capacity(bindings.len() * 3);
    for (index, (key, desc)) in bindings.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, theme.key()));
        spans.push(Span::styled(format!(":{desc}"), theme.muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::{progress_bar, truncate};
use crate::app::theme::UiTheme;
use crate::kernel::catalog::category_icon;
use crate::kernel::{AppState, CatalogRow, RunningScenario};
use crate::terminal::TerminalSession;

const SUMMARY_RULE: &str = "──────────────────";
const SIDEBAR_BAR_MAX: usize = 20;
// "  │ ● " in front of every scenario title.
const ENTRY_PREFIX_WIDTH: usize = 6;

fn panel(focused: bool, theme: &UiTheme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .padding(Padding::horizontal(1))
}

pub(super) fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    focused: bool,
    theme: &UiTheme,
) {
    let block = panel(focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (completed, total) = state.catalog.progress();
    let percent = if total == 0 { 0 } else { completed * 100 / total };
    let bar_width = usize::from(inner.width).min(SIDEBAR_BAR_MAX);
    let summary = vec![
        Line::raw(""),
        Line::styled(SUMMARY_RULE, theme.muted()),
        Line::styled(format!("Scenarios: {total}"), theme.muted()),
        Line::styled(
            format!("Completed: {completed} ({percent}%)"),
            theme.muted(),
        ),
        Line::styled(
            progress_bar(bar_width, percent as f64 / 100.0),
            Style::default().fg(theme.success),
        ),
    ];

    // One line for the heading, the rest of the space after the summary is the list.
    let list_height = usize::from(inner.height).saturating_sub(summary.len() + 1);
    let rows = state.catalog.rows();
    let cursor = state.catalog.cursor();
    let offset = cursor.saturating_sub(list_height.saturating_sub(1));
    let title_width = usize::from(inner.width).saturating_sub(ENTRY_PREFIX_WIDTH);

    let mut lines = Vec::with_capacity(list_height + summary.len() + 1);
    lines.push(Line::styled("▼ Modules", theme.label()));
    for (index, row) in rows.iter().enumerate().skip(offset).take(list_height) {
        let active = index == cursor;
        let line = match row {
            CatalogRow::Category(category) => {
                let arrow = if category.expanded { "▼" } else { "▶" };
                let label = format!("{arrow} {} {}", category_icon(&category.name), category.name);
                let style = if active { theme.active_item() } else { theme.subtitle() };
                Line::styled(label, style)
            }
            CatalogRow::Entry(entry) => {
                let marker = if entry.completed { "●" } else { "○" };
                let label = format!("  │ {marker} {}", truncate(&entry.title, title_width));
                let style = if active {
                    theme.active_item()
                } else if entry.completed {
                    Style::default().fg(theme.success)
                } else {
                    theme.body()
                };
                Line::styled(label, style)
            }
        };
        lines.push(line);
    }
    lines.extend(summary);

    frame.render_widget(Paragraph::new(lines), inner);
}

/// What the selected sidebar row would start.
pub(super) fn render_dashboard_preview(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: &UiTheme,
) {
    let block = panel(false, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match state.catalog.selected() {
        Some(CatalogRow::Entry(entry)) => vec![
            Line::styled(format!("🔧 {}", entry.title), theme.title()),
            Line::raw(""),
            Line::styled(entry.description.clone(), theme.body()),
            Line::raw(""),
            Line::styled(
                if entry.completed {
                    "Completed. Press Enter to restart"
                } else {
                    "Press Enter to start"
                },
                theme.key(),
            ),
        ],
        Some(CatalogRow::Category(category)) => vec![
            Line::styled(
                format!("{} {}", category_icon(&category.name), category.name),
                theme.title(),
            ),
            Line::raw(""),
            Line::styled("Use h/l to expand/collapse, j/k to navigate", theme.muted()),
        ],
        None => vec![Line::styled("Select a scenario to begin", theme.muted())],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub(super) fn render_scenario_info(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    running: &RunningScenario,
    focused: bool,
    theme: &UiTheme,
) {
    let block = panel(focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(info) = state.scenario(&running.scenario_id) else {
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("Unknown scenario {}", running.scenario_id),
                theme.error_text(),
            )),
            inner,
        );
        return;
    };

    let mut lines = vec![
        Line::styled(format!("🔧 {}", info.name), theme.title()),
        Line::styled("─".repeat(usize::from(inner.width)), theme.muted()),
        Line::styled("DESCRIPTION", theme.label()),
        Line::styled(info.description.clone(), theme.body()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("NAMESPACE: ", theme.label()),
            Span::styled(info.namespace.clone(), theme.subtitle()),
        ]),
    ];

    if let Some(status) = &running.status {
        let (indicator, style) = if status.ok {
            ("✓", Style::default().fg(theme.success))
        } else {
            ("●", Style::default().fg(theme.error))
        };
        lines.push(Line::from(vec![
            Span::styled("STATUS: ", theme.label()),
            Span::styled(indicator, style),
            Span::raw(" "),
            Span::styled(status.text.clone(), theme.body()),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Quick Commands", theme.muted()));
    for command in state.example_commands(info) {
        lines.push(Line::styled(format!("  {command}"), theme.key()));
    }

    if running.hints_visible && !info.hints.is_empty() {
        let index = running.hint_index.min(info.hints.len() - 1);
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("💡 Hints ({}/{})", index + 1, info.hints.len()),
            Style::default().fg(theme.warning),
        ));
        lines.push(Line::styled(info.hints[index].clone(), theme.body()));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub(super) fn render_terminal(
    frame: &mut Frame,
    area: Rect,
    session: &TerminalSession,
    in_scenario: bool,
    focused: bool,
    theme: &UiTheme,
) {
    let block = panel(focused, theme).title(Span::styled(" Terminal ", theme.muted()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if session.is_running() || in_scenario {
        frame.render_widget(Paragraph::new(session.render()), inner);
    } else {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Start a scenario to open a shell",
                theme.muted(),
            )),
            inner,
        );
    }
}

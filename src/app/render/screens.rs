use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::chrome;
use super::{format_elapsed, progress_bar};
use crate::app::layout::{centered, STATUS_HEIGHT};
use crate::app::theme::UiTheme;
use crate::kernel::{AppState, BootstrapSync, ConfirmChoice, SuccessButton, SuccessState};

const VERSION_BOX_WIDTH: u16 = 30;
const HEADING_WIDTH: u16 = 40;
const BOOTSTRAP_BOX_WIDTH: u16 = 56;
const SUCCESS_BOX_WIDTH: u16 = 50;
const RESTART_BOX_WIDTH: u16 = 50;
const QUIT_BOX_WIDTH: u16 = 40;

fn rounded_box(border: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .padding(Padding::horizontal(1))
}

/// Height of `lines` inside a bordered box.
fn boxed_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

pub(super) fn render_version_select(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    selected: usize,
    theme: &UiTheme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    let mut options = vec![
        Line::styled("Select Kubernetes Version", theme.subtitle()).alignment(Alignment::Center),
        Line::raw(""),
    ];
    for (index, version) in state.versions.iter().enumerate() {
        options.push(if index == selected {
            Line::from(vec![
                Span::styled(" › ", theme.key()),
                Span::styled(version.label(), theme.active_item()),
            ])
        } else {
            Line::from(vec![Span::raw("   "), Span::styled(version.label(), theme.body())])
        });
    }

    let box_height = boxed_height(options.len());
    let content = centered(rows[0], HEADING_WIDTH, 4 + box_height);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(box_height)])
        .split(content);

    let heading = vec![
        Line::styled("🥋  K 8 s - D o j o", theme.title()),
        Line::raw(""),
        Line::styled("Master Kubernetes Troubleshooting", theme.body()),
        Line::raw(""),
    ];
    frame.render_widget(Paragraph::new(heading).alignment(Alignment::Center), parts[0]);

    let box_area = centered(parts[1], VERSION_BOX_WIDTH, box_height);
    frame.render_widget(
        Paragraph::new(options).block(rounded_box(theme.border(true))),
        box_area,
    );

    chrome::render_status_bar(frame, rows[1], chrome::status_bindings(state), theme);
}

pub(super) fn render_bootstrap(
    frame: &mut Frame,
    area: Rect,
    sync: &BootstrapSync,
    theme: &UiTheme,
) {
    if let Some(error) = sync.error() {
        let message = format!("❌ Error: {error}");
        let width = area.width.saturating_sub(4);
        let text_area = centered(area, width, 3);
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.error_text())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            text_area,
        );
        return;
    }

    let inner_width = usize::from(BOOTSTRAP_BOX_WIDTH.saturating_sub(4));
    let bar_width = inner_width.saturating_sub(5);
    let percent = sync.percent();

    let mut lines = vec![
        Line::styled(sync.title().to_string(), theme.title()),
        Line::raw(""),
        Line::from(vec![
            Span::styled(progress_bar(bar_width, percent), theme.border(true)),
            Span::styled(format!(" {:.0}%", percent * 100.0), theme.body()),
        ]),
        Line::raw(""),
    ];
    if !sync.subtitle().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("◌ ", theme.key()),
            Span::styled(sync.subtitle().to_string(), theme.subtitle()),
        ]));
        lines.push(Line::raw(""));
    }
    for step in sync.steps() {
        let (icon, style) = if step.complete {
            ("✓", Style::default().fg(theme.success))
        } else if step.active {
            ("⋯", theme.key())
        } else {
            ("○", theme.muted())
        };
        lines.push(Line::styled(format!("{icon} {}", step.label), style));
    }

    let box_area = centered(area, BOOTSTRAP_BOX_WIDTH, boxed_height(lines.len()));
    frame.render_widget(
        Paragraph::new(lines).block(rounded_box(theme.border(false))),
        box_area,
    );
}

pub(super) fn render_success(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    success: &SuccessState,
    theme: &UiTheme,
) {
    let name = state
        .scenario(&success.scenario_id)
        .map_or(success.scenario_id.as_str(), |info| info.name.as_str());

    let mut details = vec![Line::styled(name.to_string(), theme.subtitle()), Line::raw("")];
    let checks: Vec<Line> = success
        .message
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| Line::styled(format!("✓ {line}"), Style::default().fg(theme.success)))
        .collect();
    if !checks.is_empty() {
        details.extend(checks);
        details.push(Line::raw(""));
    }
    details.push(Line::styled(
        format!("⏱ Time: {}", format_elapsed(success.elapsed)),
        theme.key(),
    ));

    let details_height = boxed_height(details.len());
    let total_height = 2 + details_height + 2;
    let content = centered(area, SUCCESS_BOX_WIDTH, total_height);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(details_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(content);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "🎉  S U C C E S S !",
            theme.title().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        parts[0],
    );
    frame.render_widget(
        Paragraph::new(details)
            .block(rounded_box(Style::default().fg(theme.success)))
            .wrap(Wrap { trim: false }),
        parts[1],
    );

    let (continue_style, retry_style) = match success.button {
        SuccessButton::Continue => (theme.active_item(), theme.muted()),
        SuccessButton::Retry => (theme.muted(), theme.active_item()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[ Continue ]", continue_style),
            Span::raw("    "),
            Span::styled("[ Retry ]", retry_style),
        ]))
        .alignment(Alignment::Center),
        parts[3],
    );
}

pub(super) fn render_confirm_restart(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    scenario_id: &str,
    selection: ConfirmChoice,
    theme: &UiTheme,
) {
    let name = state
        .scenario(scenario_id)
        .map_or(scenario_id, |info| info.name.as_str());
    let body = vec![
        Line::styled("⚠️  Restart Scenario?", theme.title()),
        Line::raw(""),
        Line::styled("You have already completed", theme.body()),
        Line::styled(format!("'{name}'."), theme.body()),
        Line::raw(""),
        Line::styled("Restarting will reset the environment.", theme.body()),
        Line::styled("Are you sure?", theme.body()),
    ];
    render_dialog(frame, area, RESTART_BOX_WIDTH, body, selection, theme);
}

pub(super) fn render_confirm_quit(
    frame: &mut Frame,
    area: Rect,
    selection: ConfirmChoice,
    theme: &UiTheme,
) {
    let body = vec![
        Line::styled("👋  Quit K8s-Dojo?", theme.title()),
        Line::raw(""),
        Line::styled("Are you sure you want to exit?", theme.body()),
    ];
    render_dialog(frame, area, QUIT_BOX_WIDTH, body, selection, theme);
}

fn render_dialog(
    frame: &mut Frame,
    area: Rect,
    width: u16,
    mut lines: Vec<Line<'static>>,
    selection: ConfirmChoice,
    theme: &UiTheme,
) {
    let (yes_style, no_style) = match selection {
        ConfirmChoice::Yes => (theme.active_item(), theme.muted()),
        ConfirmChoice::No => (theme.muted(), theme.active_item()),
    };
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("[ Yes (y) ]", yes_style),
        Span::raw("    "),
        Span::styled("[ No (n) ]", no_style),
    ]));

    let dialog = centered(area, width, boxed_height(lines.len()));
    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(rounded_box(Style::default().fg(theme.accent))),
        dialog,
    );
}

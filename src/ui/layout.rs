//! Main UI layout and rendering for the scan dialog.
//!
//! The screen has a header, a history panel of scanned directories and a
//! status bar. The progress dialog is drawn as a centered overlay on top of
//! the history while it is active.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, ScanState};
use crate::ui::colors::ColorScheme;
use crate::ui::input::{ConfirmAction, InputMode};
use crate::ui::strings::StringTable;
use crate::ui::view::DialogView;
use crate::url;

/// Application version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
const APP_NAME: &str = "medialib-scan";

const DIALOG_WIDTH: u16 = 72;

/// Main render function that draws the entire UI.
pub fn render_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // History
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(frame, main_layout[0], app);
    render_history(frame, main_layout[1], app);
    render_status_bar(frame, main_layout[2], app);

    if let Some(view) = &app.view {
        render_dialog(frame, main_layout[1], view, app);
    }

    if let InputMode::Confirm(action) = app.input_mode {
        render_confirm_overlay(frame, size, action, &app.color_scheme);
    }
}

/// Render the header bar at the top of the screen.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_style = Style::default()
        .fg(app.color_scheme.header_fg)
        .bg(app.color_scheme.header_bg);

    let title_style = Style::default()
        .fg(app.color_scheme.accent)
        .add_modifier(Modifier::BOLD);

    let sources = app
        .options
        .sources
        .iter()
        .map(|s| url::display_path(s))
        .collect::<Vec<_>>()
        .join(", ");
    let max_width = area.width.saturating_sub(30) as usize;

    let header_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{} v{}", APP_NAME, VERSION), title_style),
        Span::raw(" "),
        Span::styled("\u{2502}", header_style),
        Span::raw(" "),
        Span::styled(
            truncate_start(&sources, max_width),
            Style::default().fg(app.color_scheme.path_fg),
        ),
    ]);

    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.color_scheme.border))
        .style(header_style);

    frame.render_widget(Paragraph::new(header_line).block(header_block), area);
}

/// List of the most recently scanned directories.
fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = if app.history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No directories scanned yet",
            Style::default().fg(color_scheme.text_dim),
        ))]
    } else {
        app.history
            .iter()
            .map(|dir| {
                ListItem::new(Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(color_scheme.success_fg)),
                    Span::styled(
                        truncate_start(dir, width.saturating_sub(2)),
                        Style::default().fg(color_scheme.text),
                    ),
                ]))
            })
            .collect()
    };

    let block = Block::default()
        .title(" Recently scanned ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border));

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the progress dialog centered in `area`.
fn render_dialog(frame: &mut Frame, area: Rect, view: &DialogView, app: &App) {
    let color_scheme = &app.color_scheme;
    let strings: &StringTable = &app.strings;

    let bars = view.overall.is_some() as u16 + view.current.is_some() as u16;
    let width = DIALOG_WIDTH.min(area.width.saturating_sub(4));
    let height = (5 + bars).min(area.height);
    let dialog_area = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" {} ", strings.get("dialog.title")))
        .title_style(
            Style::default()
                .fg(color_scheme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.accent));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let mut constraints = vec![Constraint::Length(1); 3];
    constraints.extend(std::iter::repeat(Constraint::Length(1)).take(bars as usize));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);
    let text_width = inner.width as usize;

    let status = view.status.as_deref().unwrap_or("");
    let status_line = Line::from(vec![
        Span::styled(
            format!("{} ", app.spinner_char()),
            Style::default().fg(color_scheme.scanning_fg),
        ),
        Span::styled(
            truncate_end(status, text_width.saturating_sub(2)),
            Style::default()
                .fg(color_scheme.scanning_fg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(status_line), rows[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_start(&view.directory, text_width),
            Style::default().fg(color_scheme.path_fg),
        )),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_end(&view.title, text_width),
            Style::default().fg(color_scheme.text),
        )),
        rows[2],
    );

    let mut row = 3;
    for (percent, color) in [
        (view.current, color_scheme.current_bar),
        (view.overall, color_scheme.overall_bar),
    ] {
        if let Some(percent) = percent {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color))
                .percent(percent.clamp(0.0, 100.0) as u16);
            frame.render_widget(gauge, rows[row]);
            row += 1;
        }
    }
}

/// Render the status bar at the bottom of the screen.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let status_style = Style::default()
        .fg(color_scheme.status_fg)
        .bg(color_scheme.status_bg);
    let key_style = Style::default()
        .fg(color_scheme.key_fg)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(color_scheme.hint_fg);
    let bold = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::raw(" ")];

    match &app.scan_state {
        ScanState::Scanning if app.in_background => {
            spans.push(Span::styled(
                format!("{} {}", app.spinner_char(), app.strings.get("dialog.background")),
                bold(color_scheme.scanning_fg),
            ));
        }
        ScanState::Scanning => {
            spans.push(Span::styled(
                format!("{} Scanning", app.spinner_char()),
                bold(color_scheme.scanning_fg),
            ));
        }
        ScanState::Complete(summary) => {
            spans.push(Span::styled(
                format!("✓ {}", app.strings.get("dialog.finished")),
                bold(color_scheme.success_fg),
            ));
            spans.push(Span::styled(
                format!(
                    " │ {} added, {} removed, {} in library",
                    summary.added, summary.removed, summary.total
                ),
                hint_style,
            ));
        }
        ScanState::Cancelled => {
            spans.push(Span::styled(
                app.strings.get("dialog.cancelled").to_string(),
                bold(color_scheme.error_fg),
            ));
        }
        ScanState::Error(msg) => {
            spans.push(Span::styled(
                format!("✗ {}: {}", app.strings.get("dialog.failed"), truncate_end(msg, 60)),
                Style::default().fg(color_scheme.error_fg),
            ));
        }
        ScanState::Idle => {
            spans.push(Span::styled("Idle", hint_style));
        }
    }

    spans.push(Span::styled(" │ ", status_style));
    let hints: &[(&str, &str)] = if app.is_scanning() {
        &[("b", "background"), ("c", "cancel"), ("q", "quit")]
    } else {
        &[("r", "rescan"), ("q", "quit")]
    };
    for (key, label) in hints {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", label), hint_style));
    }

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border))
        .style(status_style);

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(status_block)
            .style(status_style),
        area,
    );
}

fn render_confirm_overlay(
    frame: &mut Frame,
    area: Rect,
    action: ConfirmAction,
    color_scheme: &ColorScheme,
) {
    let question = match action {
        ConfirmAction::CancelScan => "Cancel the running library scan?",
        ConfirmAction::Quit => "A scan is running. Cancel it and quit?",
    };

    let width = 50.min(area.width.saturating_sub(4));
    let height = 5.min(area.height);
    let overlay_area = Rect::new(
        area.width.saturating_sub(width) / 2,
        area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(color_scheme.error_fg)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.error_fg));

    let text = vec![
        Line::from(Span::styled(question, Style::default().fg(color_scheme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(color_scheme.key_fg)),
            Span::styled(" yes  ", Style::default().fg(color_scheme.hint_fg)),
            Span::styled("n", Style::default().fg(color_scheme.key_fg)),
            Span::styled(" no", Style::default().fg(color_scheme.hint_fg)),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).block(block), overlay_area);
}

/// Keep the end of `s` so it fits in `max_width` columns, prefixing "...".
fn truncate_start(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        start = idx;
    }
    format!("...{}", &s[start..])
}

/// Keep the start of `s` so it fits in `max_width` columns, adding "...".
fn truncate_end(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        end = idx + c.len_utf8();
    }
    format!("{}...", &s[..end])
}

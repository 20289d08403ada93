//! Shared UI pieces for activity scenes.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Board or main content, top left
    pub content: Rect,
    /// Two lines under the content
    pub status_bar: Rect,
    /// Right column with its own border
    pub info_panel: Rect,
}

/// Split `area` into content, status bar and info panel under a titled border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [content]                     │  [info]     │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(columns[0]);

    GameLayout {
        content: rows[0],
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Status message on line 1, `[key] action` hints on line 2.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height < 2 || controls.is_empty() {
        return;
    }
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Braille spinner frame for a point in time, 100ms per frame.
pub fn spinner_frame(millis: u128) -> char {
    SPINNER[((millis / 100) % SPINNER.len() as u128) as usize]
}

/// Status bar with a spinner, for the bot's thinking delay.
pub fn render_thinking_status_bar(frame: &mut Frame, area: Rect, message: &str) {
    use std::time::{SystemTime, UNIX_EPOCH};

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let text = format!("{} {}", spinner_frame(millis), message);
    render_status_bar(frame, area, &text, Color::Yellow, &[]);
}

/// Compact banner along the bottom of `area`; the board stays visible above.
pub fn render_game_over_banner(
    frame: &mut Frame,
    area: Rect,
    color: Color,
    title: &str,
    hint: &str,
) {
    let height: u16 = 4;
    let banner = Rect {
        y: area.y + area.height.saturating_sub(height),
        height: height.min(area.height),
        ..area
    };
    frame.render_widget(Clear, banner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Bordered " Info " panel. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

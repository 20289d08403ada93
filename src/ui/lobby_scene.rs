//! Lobby: the room's activity menu and chat.

use super::game_common::{centered_rect, render_status_bar};
use duoroom::activities::ActivityKind;
use duoroom::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_lobby(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);
    let panel = centered_rect(area, 52, 24);
    let block = Block::default()
        .title(format!(" Duo Room · {} ", app.room.theme.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.room.participants.len() as u16 + 3),
            Constraint::Length(ActivityKind::MENU.len() as u16 + 1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let mut people = vec![Line::from(Span::styled(
        "In the room",
        Style::default().fg(Color::DarkGray),
    ))];
    people.extend(app.room.participants.iter().map(|p| {
        let crown = if app.room.is_owner(p.id) { " 👑" } else { "" };
        Line::from(format!("  {} {}{}", p.avatar, p.name, crown))
    }));
    if !app.room.waiting_room.is_empty() {
        people.push(Line::from(Span::styled(
            format!("  {} waiting to join", app.room.waiting_room.len()),
            Style::default().fg(Color::LightBlue),
        )));
    }
    frame.render_widget(Paragraph::new(people), rows[0]);

    let menu: Vec<Line> = ActivityKind::MENU
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let selected = i == app.lobby_cursor;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let pointer = if selected { "›" } else { " " };
            Line::from(Span::styled(
                format!(" {} {} {}", pointer, kind.icon(), kind.name()),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(menu), rows[1]);

    render_chat(frame, rows[2], app);

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::LightRed),
            )),
            rows[3],
        );
    }

    if app.is_composing() {
        render_status_bar(
            frame,
            rows[4],
            "",
            Color::White,
            &[("[Enter]", "Send"), ("[Esc]", "Cancel")],
        );
    } else {
        render_status_bar(
            frame,
            rows[4],
            "",
            Color::White,
            &[
                ("[Enter]", "Open"),
                ("[C]", "Chat"),
                ("[T]", "Theme"),
                ("[Esc]", "Quit"),
            ],
        );
    }
}

/// Latest messages that fit, with the composer on the last line when open.
fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let dim = Style::default().fg(Color::DarkGray);
    let composer = app.chat_draft.as_ref().map(|draft| {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(draft.as_str()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])
    });

    let room_for = usize::from(area.height)
        .saturating_sub(1)
        .saturating_sub(usize::from(composer.is_some()));
    let skip = app.room.messages.len().saturating_sub(room_for);

    let mut lines = vec![Line::from(Span::styled("Chat", dim))];
    lines.extend(app.room.messages.iter().skip(skip).map(|m| {
        Line::from(vec![
            Span::styled(
                format!("  {} {} ", m.sent_at.format("%H:%M"), m.sender_avatar),
                dim,
            ),
            Span::styled(
                format!("{}: ", m.sender_name),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(m.content.as_str()),
        ])
    }));
    lines.extend(composer);
    frame.render_widget(Paragraph::new(lines), area);
}

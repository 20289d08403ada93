//! Radio dial UI rendering.

use super::game_common::{centered_rect, render_status_bar};
use duoroom::activities::radio::{RadioPlayer, STATIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

pub fn render_radio_scene(frame: &mut Frame, area: Rect, player: &RadioPlayer) {
    frame.render_widget(Clear, area);
    let panel = centered_rect(area, 48, 14);
    let block = Block::default()
        .title(" Radio ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATIONS.len() as u16 + 1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let lines: Vec<Line> = STATIONS
        .iter()
        .enumerate()
        .map(|(i, station)| {
            let tuned = i == player.station;
            let marker = match (tuned, player.playing) {
                (true, true) => "▶",
                (true, false) => "▷",
                _ => " ",
            };
            let style = if tuned {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(
                format!(" {} {} {}", marker, station.icon, station.name),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let now = if player.playing { "On air" } else { "Paused" };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {} · {}", now, player.current_station().url),
            Style::default().fg(Color::DarkGray),
        )),
        rows[1],
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(u16::from(player.volume_percent))
            .label(format!("Volume {}%", player.volume_percent)),
        rows[2],
    );

    render_status_bar(
        frame,
        rows[4],
        "",
        Color::White,
        &[
            ("[↑↓]", "Station"),
            ("[Enter]", "Play/Pause"),
            ("[←→]", "Volume"),
            ("[Esc]", "Back"),
        ],
    );
}

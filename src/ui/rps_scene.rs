//! Rock-paper-scissors UI rendering.

use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use duoroom::activities::rps::{Choice, RoundResult, RpsGame};
use duoroom::room::RoomTheme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn accent(theme: RoomTheme) -> Color {
    match theme {
        RoomTheme::Romantic => Color::Rgb(244, 114, 182),
        RoomTheme::Business => Color::Rgb(100, 116, 139),
        RoomTheme::Friendly => Color::Rgb(129, 140, 248),
    }
}

pub fn render_rps_scene(frame: &mut Frame, area: Rect, game: &RpsGame, theme: RoomTheme) {
    let layout = create_game_layout(
        frame,
        area,
        " Rock Paper Scissors ",
        accent(theme),
        8,
        22,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3), // hands
            Constraint::Length(2), // result
            Constraint::Min(3),    // choices
        ])
        .split(layout.content);

    render_hands(frame, rows[1], game);
    if let Some(result) = game.result {
        let color = match result {
            RoundResult::Win => Color::Green,
            RoundResult::Lose => Color::Red,
            RoundResult::Draw => Color::Yellow,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                result.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            rows[2],
        );
    }
    render_choices(frame, rows[3], game, accent(theme));

    let (status, controls): (&str, &[(&str, &str)]) = if game.is_shaking() {
        ("Rock... paper... scissors...", &[])
    } else if game.result.is_some() {
        ("", &[("[Enter]", "Next round"), ("[Esc]", "Back")])
    } else {
        (
            "Pick your hand",
            &[("[←→]", "Choose"), ("[Enter]", "Play"), ("[Esc]", "Back")],
        )
    };
    render_status_bar(frame, layout.status_bar, status, Color::White, controls);

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let lines = vec![
        Line::from(Span::styled("Score", Style::default().fg(Color::Cyan))),
        Line::from(format!("You  {}", game.score.player)),
        Line::from(format!("Bot  {}", game.score.opponent)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_hands(frame: &mut Frame, area: Rect, game: &RpsGame) {
    let hand = |choice: Option<Choice>| -> String {
        if game.is_shaking() {
            "✊".to_string()
        } else {
            choice.map_or("?".to_string(), |c| c.emoji().to_string())
        }
    };
    let lines = vec![
        Line::from(format!(
            "You {}    vs    {} Bot",
            hand(game.player_choice),
            hand(game.opponent_choice)
        )),
        Line::from(""),
        Line::from(Span::styled(
            match (game.player_choice, game.opponent_choice) {
                (Some(p), Some(o)) if !game.is_shaking() => format!("{} vs {}", p.name(), o.name()),
                _ => String::new(),
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_choices(frame: &mut Frame, area: Rect, game: &RpsGame, accent: Color) {
    let mut spans = Vec::new();
    for (i, choice) in Choice::ALL.iter().enumerate() {
        let selected = i == game.cursor && game.result.is_none();
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!(" {} {} ", choice.emoji(), choice.name()),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

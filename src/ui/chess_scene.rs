//! Chess board UI rendering.

use super::board_styles::{calculate_board_centering, BoardColors};
use super::game_common::{
    centered_rect, create_game_layout, render_game_over_banner, render_info_panel_frame,
    render_status_bar, render_thinking_status_bar,
};
use duoroom::activities::chess::view::glyph;
use duoroom::activities::chess::{
    derive_view, side_name, BoardView, ChessGame, GameOver, Overlay, Piece, Role, Side,
    PROMOTION_CHOICES,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// 2 rank-label columns + 8 squares of 4 chars + right label
const BOARD_WIDTH: u16 = 35;
const BOARD_HEIGHT: u16 = 10;
const FILE_LABELS: &str = "   a   b   c   d   e   f   g   h";

/// Render the chess scene for the mounted game.
pub fn render_chess_scene(frame: &mut Frame, area: Rect, game: &ChessGame) {
    let view = derive_view(game);
    let colors = BoardColors::for_theme(game.host.theme);
    let layout = create_game_layout(frame, area, " Chess ", colors.highlight, BOARD_HEIGHT, 26);

    render_board(frame, layout.content, &view, &colors);
    render_status(frame, layout.status_bar, game, &view);
    render_info(frame, layout.info_panel, game, &view);

    match &view.overlay {
        Overlay::PromotionPicker { selected } => {
            render_promotion_picker(frame, layout.content, game.side_to_move(), *selected)
        }
        Overlay::GameOver(message) => {
            let color = match game.game_over {
                Some(GameOver::Checkmate { .. }) => Color::Green,
                _ => Color::Yellow,
            };
            render_game_over_banner(
                frame,
                layout.content,
                color,
                message,
                "[R] New game  [Esc] Lobby",
            );
        }
        Overlay::BotThinking | Overlay::None => {}
    }
}

fn render_board(frame: &mut Frame, area: Rect, view: &BoardView, colors: &BoardColors) {
    let (x_offset, y_offset) = calculate_board_centering(
        area.x,
        area.y,
        area.width,
        area.height,
        BOARD_WIDTH,
        BOARD_HEIGHT,
    );
    let label_style = Style::default().fg(Color::DarkGray);

    frame.render_widget(
        Paragraph::new(FILE_LABELS).style(label_style),
        Rect::new(x_offset, y_offset, BOARD_WIDTH, 1),
    );

    for (row, rank) in view.ranks.iter().enumerate() {
        let y = y_offset + 1 + row as u16;
        let rank_label = format!("{}", 8 - row);
        frame.render_widget(
            Paragraph::new(rank_label.clone()).style(label_style),
            Rect::new(x_offset, y, 1, 1),
        );

        for (file, square) in rank.iter().enumerate() {
            let x = x_offset + 2 + file as u16 * 4;
            let mut style = colors.square_style(square.highlight, square.is_dark, square.is_cursor);
            if let Some(piece) = square.piece {
                style = style.add_modifier(Modifier::BOLD).fg(piece_color(piece));
            }
            let text = format!(" {}  ", square.glyph.unwrap_or(' '));
            frame.render_widget(Paragraph::new(text).style(style), Rect::new(x, y, 4, 1));
        }

        frame.render_widget(
            Paragraph::new(rank_label).style(label_style),
            Rect::new(x_offset + 34, y, 1, 1),
        );
    }

    frame.render_widget(
        Paragraph::new(FILE_LABELS).style(label_style),
        Rect::new(x_offset, y_offset + 9, BOARD_WIDTH, 1),
    );
}

fn piece_color(piece: Piece) -> Color {
    match piece.color {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

fn render_status(frame: &mut Frame, area: Rect, game: &ChessGame, view: &BoardView) {
    if let Some(task) = game.bot_task.filter(|_| matches!(view.overlay, Overlay::BotThinking)) {
        let message = format!("Bot is thinking {}", progress_bar(task.progress(), 10));
        render_thinking_status_bar(frame, area, &message);
        return;
    }
    if matches!(view.overlay, Overlay::PromotionPicker { .. }) {
        render_status_bar(
            frame,
            area,
            "Choose a piece",
            Color::Cyan,
            &[("[←→]", "Pick"), ("[Enter]", "Promote"), ("[Esc]", "Cancel")],
        );
        return;
    }
    if game.game_over.is_some() {
        return;
    }

    let (text, color) = if view.in_check {
        (format!("{} - check!", view.turn_label()), Color::LightRed)
    } else if game.selection.is_some() {
        ("Select a destination".to_string(), Color::White)
    } else {
        (view.turn_label(), Color::White)
    };
    let controls: &[(&str, &str)] = if game.host.can_start_games {
        &[
            ("[Enter]", "Select"),
            ("[R]", "Reset"),
            ("[B]", "Bot"),
            ("[D]", "Difficulty"),
            ("[Esc]", "Back"),
        ]
    } else {
        &[("[Enter]", "Select"), ("[R]", "Reset"), ("[Esc]", "Back")]
    };
    render_status_bar(frame, area, &text, color, controls);
}

fn render_info(frame: &mut Frame, area: Rect, game: &ChessGame, view: &BoardView) {
    let inner = render_info_panel_frame(frame, area);
    let dim = Style::default().fg(Color::DarkGray);
    let to_move = |side: Side| {
        if view.side_to_move == side && game.game_over.is_none() {
            "▶ "
        } else {
            "  "
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(to_move(Side::White)),
            Span::styled(
                view.white_label.clone(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::raw(to_move(Side::Black)),
            Span::styled(
                view.black_label.clone(),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            if game.bot.enabled {
                format!("Bot: {} ({})", game.bot.difficulty.name(), side_name(game.bot.side))
            } else {
                "Bot: off".to_string()
            },
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled("Moves", Style::default().fg(Color::Cyan))),
    ];

    // Most recent moves that fit, two plies per line
    let rows = usize::from(inner.height.saturating_sub(lines.len() as u16));
    let pairs: Vec<String> = game
        .move_history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{:>3}. {:<7} {}", i + 1, pair[0], pair.get(1).map_or("", |s| s.as_str())))
        .collect();
    let skip = pairs.len().saturating_sub(rows);
    lines.extend(pairs.into_iter().skip(skip).map(|p| Line::from(Span::styled(p, dim))));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_promotion_picker(frame: &mut Frame, area: Rect, side: Side, selected: usize) {
    let modal = centered_rect(area, 26, 5);
    frame.render_widget(Clear, modal);
    let block = Block::default()
        .title(" Promote to ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut spans = Vec::new();
    for (i, role) in PROMOTION_CHOICES.iter().enumerate() {
        let piece = Piece {
            color: side,
            role: *role,
        };
        let style = if i == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", glyph(piece)), style));
        spans.push(Span::raw(" "));
    }
    let name = role_name(PROMOTION_CHOICES[selected % PROMOTION_CHOICES.len()]);
    let lines = vec![
        Line::from(spans),
        Line::from(""),
        Line::from(Span::styled(name, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// `width` cells of ▰/▱ filled by `fraction`.
fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "▰".repeat(filled), "▱".repeat(width - filled))
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Queen => "Queen",
        Role::Rook => "Rook",
        Role::Bishop => "Bishop",
        Role::Knight => "Knight",
        Role::Pawn => "Pawn",
        Role::King => "King",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "▱▱▱▱");
        assert_eq!(progress_bar(0.5, 4), "▰▰▱▱");
        assert_eq!(progress_bar(3.0, 4), "▰▰▰▰");
    }
}

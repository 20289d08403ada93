//! Board palettes per room theme.

use duoroom::activities::chess::Highlight;
use duoroom::room::RoomTheme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardColors {
    pub light: Color,
    pub dark: Color,
    /// Selection and theme accent
    pub highlight: Color,
    pub legal_move: Color,
    pub last_move: Color,
    pub check: Color,
    pub cursor: Color,
}

impl BoardColors {
    pub fn for_theme(theme: RoomTheme) -> Self {
        match theme {
            RoomTheme::Romantic => Self {
                light: Color::Rgb(240, 217, 181),
                dark: Color::Rgb(181, 136, 99),
                highlight: Color::Rgb(251, 113, 133),
                legal_move: Color::Rgb(253, 164, 175),
                last_move: Color::Rgb(254, 205, 211),
                check: Color::Rgb(239, 68, 68),
                cursor: Color::Yellow,
            },
            RoomTheme::Business => Self {
                light: Color::Rgb(226, 232, 240),
                dark: Color::Rgb(100, 116, 139),
                highlight: Color::Rgb(129, 140, 248),
                legal_move: Color::Rgb(165, 180, 252),
                last_move: Color::Rgb(199, 210, 254),
                check: Color::Rgb(239, 68, 68),
                cursor: Color::Yellow,
            },
            RoomTheme::Friendly => Self {
                light: Color::Rgb(238, 238, 210),
                dark: Color::Rgb(118, 150, 86),
                highlight: Color::Rgb(52, 211, 153),
                legal_move: Color::Rgb(110, 231, 183),
                last_move: Color::Rgb(167, 243, 208),
                check: Color::Rgb(239, 68, 68),
                cursor: Color::Yellow,
            },
        }
    }

    /// Background for a square. The cursor shows through every highlight.
    pub fn square_bg(&self, highlight: Highlight, is_dark: bool, is_cursor: bool) -> Color {
        if is_cursor {
            return self.cursor;
        }
        match highlight {
            Highlight::CheckmatedKing | Highlight::InCheck => self.check,
            Highlight::Selected => self.highlight,
            Highlight::LegalDestination { capture: true } => self.check,
            Highlight::LegalDestination { capture: false } => self.legal_move,
            Highlight::LastMove => self.last_move,
            Highlight::None if is_dark => self.dark,
            Highlight::None => self.light,
        }
    }

    pub fn square_style(&self, highlight: Highlight, is_dark: bool, is_cursor: bool) -> Style {
        let mut style = Style::default()
            .fg(Color::Black)
            .bg(self.square_bg(highlight, is_dark, is_cursor));
        if highlight == Highlight::CheckmatedKing {
            style = style.add_modifier(Modifier::CROSSED_OUT | Modifier::BOLD);
        }
        style
    }
}

/// Offsets that center a `board_width` x `board_height` board in an area.
pub fn calculate_board_centering(
    area_x: u16,
    area_y: u16,
    area_width: u16,
    area_height: u16,
    board_width: u16,
    board_height: u16,
) -> (u16, u16) {
    (
        area_x + area_width.saturating_sub(board_width) / 2,
        area_y + area_height.saturating_sub(board_height) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_palettes_differ() {
        let romantic = BoardColors::for_theme(RoomTheme::Romantic);
        let friendly = BoardColors::for_theme(RoomTheme::Friendly);
        assert_ne!(romantic.dark, friendly.dark);
        assert_eq!(friendly.dark, Color::Rgb(118, 150, 86));
    }

    #[test]
    fn test_square_bg_priority() {
        let colors = BoardColors::for_theme(RoomTheme::Business);
        assert_eq!(colors.square_bg(Highlight::None, true, false), colors.dark);
        assert_eq!(colors.square_bg(Highlight::None, false, false), colors.light);
        assert_eq!(colors.square_bg(Highlight::Selected, true, true), colors.cursor);
        assert_eq!(colors.square_bg(Highlight::InCheck, false, false), colors.check);
        assert_eq!(
            colors.square_bg(Highlight::LegalDestination { capture: false }, true, false),
            colors.legal_move
        );
    }

    #[test]
    fn test_board_centering() {
        assert_eq!(calculate_board_centering(0, 0, 40, 20, 20, 10), (10, 5));
        assert_eq!(calculate_board_centering(3, 1, 10, 5, 20, 10), (3, 1));
    }
}

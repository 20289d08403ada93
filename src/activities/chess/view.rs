//! Renderable board state, derived from a [`ChessGame`] without side effects.

use super::types::{side_name, ChessGame, GameOver};
use super::{coords, square_at, Piece, Side, Square};
use shakmaty::Role;

/// Per-square decoration. When several apply, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Defeat marker on the mated king
    CheckmatedKing,
    InCheck,
    Selected,
    LegalDestination { capture: bool },
    LastMove,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareView {
    pub square: Square,
    pub piece: Option<Piece>,
    pub glyph: Option<char>,
    pub highlight: Highlight,
    pub is_cursor: bool,
    pub is_dark: bool,
}

/// Modal layer drawn over the board. At most one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    PromotionPicker { selected: usize },
    BotThinking,
    GameOver(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Rank 8 first, file a first within a rank
    pub ranks: [[SquareView; 8]; 8],
    pub side_to_move: Side,
    pub in_check: bool,
    pub overlay: Overlay,
    pub white_label: String,
    pub black_label: String,
}

impl BoardView {
    pub fn square(&self, square: Square) -> &SquareView {
        let (file, rank) = coords(square);
        &self.ranks[7 - usize::from(rank)][usize::from(file)]
    }

    /// "White to move" / "Black to move"
    pub fn turn_label(&self) -> String {
        format!("{} to move", side_name(self.side_to_move))
    }
}

pub fn glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Side::White, Role::King) => '♔',
        (Side::White, Role::Queen) => '♕',
        (Side::White, Role::Rook) => '♖',
        (Side::White, Role::Bishop) => '♗',
        (Side::White, Role::Knight) => '♘',
        (Side::White, Role::Pawn) => '♙',
        (Side::Black, Role::King) => '♚',
        (Side::Black, Role::Queen) => '♛',
        (Side::Black, Role::Rook) => '♜',
        (Side::Black, Role::Bishop) => '♝',
        (Side::Black, Role::Knight) => '♞',
        (Side::Black, Role::Pawn) => '♟',
    }
}

pub fn derive_view(game: &ChessGame) -> BoardView {
    let in_check = game.rules.is_check();
    let checked_king = if in_check {
        game.rules.king_square(game.side_to_move())
    } else {
        None
    };
    let mated_king = match game.game_over {
        Some(GameOver::Checkmate { mated_king, .. }) => mated_king,
        _ => None,
    };
    let cursor = game.cursor_square();

    let highlight_for = |square: Square| -> Highlight {
        if mated_king == Some(square) {
            Highlight::CheckmatedKing
        } else if checked_king == Some(square) {
            Highlight::InCheck
        } else if game.selection == Some(square) {
            Highlight::Selected
        } else if let Some(m) = game.legal_moves.iter().find(|m| m.to == square) {
            Highlight::LegalDestination {
                capture: m.is_capture(),
            }
        } else if game
            .last_move
            .is_some_and(|last| last.from == square || last.to == square)
        {
            Highlight::LastMove
        } else {
            Highlight::None
        }
    };

    let ranks = std::array::from_fn(|row| {
        let rank = 7 - row as u8;
        std::array::from_fn(|file| {
            let square = square_at(file as u8, rank);
            let piece = game.rules.piece_at(square);
            SquareView {
                square,
                piece,
                glyph: piece.map(glyph),
                highlight: highlight_for(square),
                is_cursor: square == cursor,
                is_dark: (file as u8 + rank) % 2 == 0,
            }
        })
    });

    let overlay = if let Some(over) = game.game_over {
        Overlay::GameOver(over.message())
    } else if let Some(pending) = game.pending_promotion {
        Overlay::PromotionPicker {
            selected: pending.selected,
        }
    } else if game.is_bot_thinking() {
        Overlay::BotThinking
    } else {
        Overlay::None
    };

    BoardView {
        ranks,
        side_to_move: game.side_to_move(),
        in_check,
        overlay,
        white_label: game.seat_label(Side::White),
        black_label: game.seat_label(Side::Black),
    }
}

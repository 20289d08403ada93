//! Chess activity: two seats, an optional bot on Black, and an external rules engine.

pub mod bot;
pub mod logic;
pub mod rules;
pub mod types;
pub mod view;

pub use bot::BotTask;
pub use logic::{process_input, reset_game, select_square, tick, SelectOutcome};
pub use rules::{DrawReason, LegalMove, Rules, RulesError};
pub use types::*;
pub use view::{derive_view, BoardView, Highlight, Overlay, SquareView};

pub use shakmaty::{Color as Side, Piece, Role, Square};

use shakmaty::{File, Rank};

/// Square from zero-based (file, rank) coordinates, `(0, 0)` being a1.
///
/// Coordinates are clamped to the board.
pub fn square_at(file: u8, rank: u8) -> Square {
    Square::from_coords(
        File::ALL[usize::from(file.min(7))],
        Rank::ALL[usize::from(rank.min(7))],
    )
}

/// Zero-based (file, rank) of a square.
pub fn coords(square: Square) -> (u8, u8) {
    (square.file() as u8, square.rank() as u8)
}

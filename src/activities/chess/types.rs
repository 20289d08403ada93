//! Chess activity data structures and state management.

use super::bot::BotTask;
use super::rules::{DrawReason, LegalMove, Rules, RulesError};
use super::{square_at, Side, Square};
use crate::activities::{HostContext, Seat};
use serde::{Deserialize, Serialize};
use shakmaty::Role;

/// Bot strength. Medium and Hard share the tactical filter; Hard sharpens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl BotDifficulty {
    pub const ALL: [BotDifficulty; 3] = [
        BotDifficulty::Easy,
        BotDifficulty::Medium,
        BotDifficulty::Hard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Next tier, wrapping Hard back to Easy.
    pub fn next(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Bot settings owned by the session UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    pub enabled: bool,
    pub difficulty: BotDifficulty,
    /// The side the bot plays when enabled
    pub side: Side,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            difficulty: BotDifficulty::Medium,
            side: Side::Black,
        }
    }
}

impl BotConfig {
    pub fn enabled(difficulty: BotDifficulty) -> Self {
        Self {
            enabled: true,
            difficulty,
            ..Self::default()
        }
    }
}

/// Pieces offered by the promotion picker, in display order.
pub const PROMOTION_CHOICES: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

/// A pawn move to the last rank waiting for the player's piece choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    /// Index into `PROMOTION_CHOICES` highlighted by the picker
    pub selected: usize,
}

impl PendingPromotion {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            selected: 0,
        }
    }

    pub fn selected_role(&self) -> Role {
        PROMOTION_CHOICES[self.selected % PROMOTION_CHOICES.len()]
    }

    pub fn cycle(&mut self, step: isize) {
        let len = PROMOTION_CHOICES.len() as isize;
        self.selected = (self.selected as isize + step).rem_euclid(len) as usize;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// Terminal state of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    Checkmate {
        winner: Side,
        /// Where the mated king stands, for the defeat marker
        mated_king: Option<Square>,
    },
    Draw(DrawReason),
}

impl GameOver {
    pub fn message(&self) -> String {
        match self {
            GameOver::Checkmate { winner, .. } => {
                format!("Checkmate! {} wins.", side_name(*winner))
            }
            GameOver::Draw(reason) => format!("Draw! ({})", reason.describe()),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOver::Checkmate { winner, .. } => Some(*winner),
            GameOver::Draw(_) => None,
        }
    }
}

pub fn side_name(side: Side) -> &'static str {
    match side {
        Side::White => "White",
        Side::Black => "Black",
    }
}

/// Active chess session (transient, never saved)
#[derive(Debug, Clone)]
pub struct ChessGame {
    pub rules: Rules,
    pub host: HostContext,
    pub bot: BotConfig,
    pub bot_task: Option<BotTask>,
    /// Keyboard cursor (file, rank), (0, 0) = a1
    pub cursor: (u8, u8),
    pub selection: Option<Square>,
    /// Moves available from `selection`
    pub legal_moves: Vec<LegalMove>,
    pub last_move: Option<LastMove>,
    pub game_over: Option<GameOver>,
    pub pending_promotion: Option<PendingPromotion>,
    /// Move history in algebraic notation
    pub move_history: Vec<String>,
}

impl ChessGame {
    pub fn new(host: HostContext, bot: BotConfig) -> Self {
        Self::with_rules(host, bot, Rules::new())
    }

    /// Start from a FEN position instead of the standard setup.
    pub fn from_fen(host: HostContext, bot: BotConfig, fen: &str) -> Result<Self, RulesError> {
        Ok(Self::with_rules(host, bot, Rules::from_fen(fen)?))
    }

    fn with_rules(host: HostContext, bot: BotConfig, rules: Rules) -> Self {
        Self {
            rules,
            host,
            bot,
            bot_task: None,
            cursor: (4, 1), // e2
            selection: None,
            legal_moves: Vec::new(),
            last_move: None,
            game_over: None,
            pending_promotion: None,
            move_history: Vec::new(),
        }
    }

    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let new_x = (self.cursor.0 as i8 + dx).clamp(0, 7) as u8;
        let new_y = (self.cursor.1 as i8 + dy).clamp(0, 7) as u8;
        self.cursor = (new_x, new_y);
    }

    pub fn cursor_square(&self) -> Square {
        square_at(self.cursor.0, self.cursor.1)
    }

    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move()
    }

    /// True when the bot is enabled and it is the bot's side to move.
    pub fn is_bot_turn(&self) -> bool {
        self.bot.enabled && self.side_to_move() == self.bot.side
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.bot_task.is_some()
    }

    /// Whether human move input is currently accepted.
    pub fn accepts_input(&self) -> bool {
        self.game_over.is_none()
            && self.pending_promotion.is_none()
            && !self.is_bot_thinking()
            && !self.is_bot_turn()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.legal_moves.clear();
    }

    /// Record a move in history and update `last_move`
    pub fn record_move(&mut self, from: Square, to: Square, notation: String) {
        self.last_move = Some(LastMove { from, to });
        self.move_history.push(notation);
    }

    /// Display name for a side's seat. The bot's seat is always the bot.
    pub fn seat_label(&self, side: Side) -> String {
        if self.bot.enabled && side == self.bot.side {
            return format!("Duo Bot ({})", self.bot.difficulty.name());
        }
        let seat: Option<&Seat> = match side {
            Side::White => self.host.white.as_ref(),
            Side::Black => self.host.black.as_ref(),
        };
        seat.map(|s| format!("{} {}", s.avatar, s.name))
            .unwrap_or_else(|| side_name(side).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> ChessGame {
        ChessGame::new(HostContext::default(), BotConfig::default())
    }

    #[test]
    fn test_difficulty_cycle() {
        assert_eq!(BotDifficulty::Easy.next(), BotDifficulty::Medium);
        assert_eq!(BotDifficulty::Hard.next(), BotDifficulty::Easy);
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&BotDifficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: BotDifficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, BotDifficulty::Easy);
    }

    #[test]
    fn test_chess_game_new() {
        let game = game();
        assert_eq!(game.cursor, (4, 1));
        assert!(game.selection.is_none());
        assert!(game.game_over.is_none());
        assert!(game.pending_promotion.is_none());
        assert!(!game.is_bot_thinking());
        assert!(game.accepts_input());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut game = game();
        game.cursor = (0, 0);
        game.move_cursor(-1, -1);
        assert_eq!(game.cursor, (0, 0));
        game.cursor = (7, 7);
        game.move_cursor(1, 1);
        assert_eq!(game.cursor, (7, 7));
        game.move_cursor(-3, -2);
        assert_eq!(game.cursor_square().to_string(), "e6");
    }

    #[test]
    fn test_bot_turn_blocks_input() {
        let mut game = ChessGame::new(
            HostContext::default(),
            BotConfig::enabled(BotDifficulty::Easy),
        );
        assert!(game.accepts_input());
        game.rules
            .apply("e2".parse().unwrap(), "e4".parse().unwrap(), None)
            .unwrap();
        assert!(game.is_bot_turn());
        assert!(!game.accepts_input());
    }

    #[test]
    fn test_promotion_picker_cycles() {
        let mut pending = PendingPromotion::new("a7".parse().unwrap(), "a8".parse().unwrap());
        assert_eq!(pending.selected_role(), Role::Queen);
        pending.cycle(-1);
        assert_eq!(pending.selected_role(), Role::Knight);
        pending.cycle(2);
        assert_eq!(pending.selected_role(), Role::Rook);
    }

    #[test]
    fn test_game_over_messages() {
        let mate = GameOver::Checkmate {
            winner: Side::Black,
            mated_king: None,
        };
        assert_eq!(mate.message(), "Checkmate! Black wins.");
        assert_eq!(mate.winner(), Some(Side::Black));
        let draw = GameOver::Draw(DrawReason::Stalemate);
        assert_eq!(draw.message(), "Draw! (stalemate)");
        assert_eq!(draw.winner(), None);
    }

    #[test]
    fn test_record_move_updates_last_move() {
        let mut game = game();
        let e2: Square = "e2".parse().unwrap();
        let e4: Square = "e4".parse().unwrap();
        game.record_move(e2, e4, "e4".to_string());
        assert_eq!(game.last_move, Some(LastMove { from: e2, to: e4 }));
        assert_eq!(game.move_history, vec!["e4"]);
    }

    #[test]
    fn test_seat_labels() {
        let host = HostContext {
            white: Some(Seat::new("Ana", "🦊")),
            ..HostContext::default()
        };
        let mut game = ChessGame::new(host, BotConfig::default());
        assert_eq!(game.seat_label(Side::White), "🦊 Ana");
        assert_eq!(game.seat_label(Side::Black), "Black");
        game.bot = BotConfig::enabled(BotDifficulty::Hard);
        assert_eq!(game.seat_label(Side::Black), "Duo Bot (Hard)");
    }
}

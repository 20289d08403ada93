//! Adapter over the `shakmaty` rules engine.
//!
//! The chess activity never touches board state directly. Everything it needs
//! from the position (side to move, piece lookup, legal moves with their
//! capture and promotion flags, move application, terminal predicates) goes
//! through [`Rules`].

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, File, Move, Piece, Position, Role, Square};
use std::collections::HashMap;

/// Errors raised by move application. Never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("move from {from} to {to} needs a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Why a finished game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl DrawReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        }
    }
}

/// A legal move as the board UI sees it.
///
/// `to` is where the moving piece lands. For castling that is the king's
/// destination (g- or c-file), not the rook square the engine encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub role: Role,
    pub capture: Option<Role>,
    pub promotion: Option<Role>,
    raw: Move,
}

impl LegalMove {
    fn from_engine(m: Move) -> Option<Self> {
        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => Some(Self {
                from,
                to,
                role,
                capture,
                promotion,
                raw: m,
            }),
            Move::EnPassant { from, to } => Some(Self {
                from,
                to,
                role: Role::Pawn,
                capture: Some(Role::Pawn),
                promotion: None,
                raw: m,
            }),
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                Some(Self {
                    from: king,
                    to: Square::from_coords(file, king.rank()),
                    role: Role::King,
                    capture: None,
                    promotion: None,
                    raw: m,
                })
            }
            _ => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.raw, Move::Castle { .. })
    }

    pub fn is_kingside_castle(&self) -> bool {
        self.is_castle() && self.to.file() == File::G
    }
}

/// Board placement + side to move + castling rights.
type RepetitionKey = (String, Color, u64);

/// The authoritative position and its rules.
#[derive(Debug, Clone)]
pub struct Rules {
    position: Chess,
    initial: Chess,
    plies: u32,
    seen: HashMap<RepetitionKey, u32>,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules {
    /// Standard initial setup.
    pub fn new() -> Self {
        Self::with_initial(Chess::default())
    }

    /// Start from an arbitrary position. `reset` returns to this position.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .parse()
            .map_err(|e| RulesError::InvalidFen(format!("{}", e)))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(format!("{}", e)))?;
        Ok(Self::with_initial(position))
    }

    fn with_initial(initial: Chess) -> Self {
        let mut rules = Self {
            position: initial.clone(),
            initial,
            plies: 0,
            seen: HashMap::new(),
        };
        rules.remember_position();
        rules
    }

    pub fn reset(&mut self) {
        self.position = self.initial.clone();
        self.plies = 0;
        self.seen.clear();
        self.remember_position();
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    /// Number of moves applied since setup or the last reset.
    pub fn ply(&self) -> u32 {
        self.plies
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    /// 8x8 snapshot indexed `[rank][file]`, rank 1 first.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        std::array::from_fn(|rank| {
            std::array::from_fn(|file| self.piece_at(super::square_at(file as u8, rank as u8)))
        })
    }

    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.position
            .legal_moves()
            .into_iter()
            .filter_map(LegalMove::from_engine)
            .collect()
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<LegalMove> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .collect()
    }

    /// Resolve an origin/destination pair (plus promotion role) to a legal move.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<LegalMove, RulesError> {
        let candidates: Vec<LegalMove> = self
            .legal_moves_from(from)
            .into_iter()
            .filter(|m| m.to == to)
            .collect();

        if candidates.is_empty() {
            return Err(RulesError::IllegalMove { from, to });
        }
        if candidates.iter().any(LegalMove::is_promotion) && promotion.is_none() {
            return Err(RulesError::PromotionRequired { from, to });
        }
        candidates
            .into_iter()
            .find(|m| m.promotion == promotion)
            .ok_or(RulesError::IllegalMove { from, to })
    }

    /// Apply a move by coordinates. On error the position is unchanged.
    pub fn apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<LegalMove, RulesError> {
        let m = self.find_move(from, to, promotion)?;
        self.play(m)?;
        Ok(m)
    }

    /// Apply a move previously returned by this position's move generator.
    pub fn play(&mut self, m: LegalMove) -> Result<(), RulesError> {
        match self.position.clone().play(m.raw) {
            Ok(next) => {
                self.position = next;
                self.plies += 1;
                self.remember_position();
                Ok(())
            }
            Err(_) => Err(RulesError::IllegalMove {
                from: m.from,
                to: m.to,
            }),
        }
    }

    /// Whether playing `m` leaves the opponent in check.
    pub fn gives_check(&self, m: &LegalMove) -> bool {
        self.after(m).is_some_and(|p| p.is_check())
    }

    /// Whether playing `m` checkmates the opponent.
    pub fn gives_mate(&self, m: &LegalMove) -> bool {
        self.after(m).is_some_and(|p| p.is_checkmate())
    }

    fn after(&self, m: &LegalMove) -> Option<Chess> {
        self.position.clone().play(m.raw).ok()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.position.is_stalemate() {
            Some(DrawReason::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.position.halfmoves() >= 100 {
            Some(DrawReason::FiftyMoveRule)
        } else if self.repetitions() >= 3 {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.position.board().king_of(color)
    }

    /// Standard algebraic notation for a move in the current position,
    /// disambiguated by the engine, with a `+` or `#` suffix.
    pub fn notation(&self, m: &LegalMove) -> String {
        let mut san = San::from_move(&self.position, m.raw).to_string();
        if self.gives_mate(m) {
            san.push('#');
        } else if self.gives_check(m) {
            san.push('+');
        }
        san
    }

    fn repetition_key(&self) -> RepetitionKey {
        let placement: String = self
            .grid()
            .iter()
            .flat_map(|rank| rank.iter())
            .map(|p| p.map_or('.', |p| p.char()))
            .collect();
        let rights = self.position.castles().castling_rights().0;
        (placement, self.position.turn(), rights)
    }

    fn remember_position(&mut self) {
        *self.seen.entry(self.repetition_key()).or_insert(0) += 1;
    }

    fn repetitions(&self) -> u32 {
        self.seen
            .get(&self.repetition_key())
            .copied()
            .unwrap_or(0)
    }
}

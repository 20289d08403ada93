//! Room activities: chess, rock-paper-scissors and the radio dial.
//!
//! Each activity owns its state inside [`Activity`] and is driven by the same
//! two entry points, `process_input` for key presses and `tick` for time.

pub mod chess;
pub mod radio;
pub mod rps;

use crate::feedback::Feedback;
use crate::room::RoomTheme;
use chess::{BotConfig, ChessGame};
use radio::RadioPlayer;
use rand::Rng;
use rps::RpsGame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Display identity of a chess seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    pub avatar: String,
}

impl Seat {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// What the room tells a mounted activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Room owner rights: reset and bot controls
    pub can_start_games: bool,
    pub theme: RoomTheme,
    pub white: Option<Seat>,
    pub black: Option<Seat>,
}

impl Default for HostContext {
    /// A solo player owns their own room.
    fn default() -> Self {
        Self {
            can_start_games: true,
            theme: RoomTheme::default(),
            white: None,
            black: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Lobby,
    Chess,
    RockPaperScissors,
    Radio,
}

impl ActivityKind {
    /// Activities listed in the lobby, in menu order.
    pub const MENU: [ActivityKind; 3] = [
        ActivityKind::Chess,
        ActivityKind::RockPaperScissors,
        ActivityKind::Radio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lobby => "Lobby",
            Self::Chess => "Chess",
            Self::RockPaperScissors => "Rock Paper Scissors",
            Self::Radio => "Radio",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Lobby => "🏠",
            Self::Chess => "♟",
            Self::RockPaperScissors => "✊",
            Self::Radio => "📻",
        }
    }

    /// Games need the room owner to start them.
    pub fn is_game(&self) -> bool {
        matches!(self, Self::Chess | Self::RockPaperScissors)
    }
}

/// Input actions shared by all activities (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityInput {
    Up,
    Down,
    Left,
    Right,
    Primary, // Enter/Space - activate
    Cancel,  // Esc - back out, then close
    Reset,
    ToggleBot,
    CycleDifficulty,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    Continue,
    Close,
}

/// The activity currently mounted in the room. Only one at a time.
#[derive(Debug, Clone)]
pub enum Activity {
    Chess(Box<ChessGame>),
    RockPaperScissors(RpsGame),
    Radio(RadioPlayer),
}

impl Activity {
    /// Fresh state for `kind`. The lobby has none.
    pub fn mount(kind: ActivityKind, host: HostContext, bot: BotConfig) -> Option<Self> {
        match kind {
            ActivityKind::Lobby => None,
            ActivityKind::Chess => Some(Self::Chess(Box::new(ChessGame::new(host, bot)))),
            ActivityKind::RockPaperScissors => Some(Self::RockPaperScissors(RpsGame::new())),
            ActivityKind::Radio => Some(Self::Radio(RadioPlayer::new())),
        }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Chess(_) => ActivityKind::Chess,
            Self::RockPaperScissors(_) => ActivityKind::RockPaperScissors,
            Self::Radio(_) => ActivityKind::Radio,
        }
    }

    pub fn process_input(
        &mut self,
        input: ActivityInput,
        feedback: &mut dyn Feedback,
    ) -> ActivityOutcome {
        match self {
            Self::Chess(game) => chess::process_input(game, input, feedback),
            Self::RockPaperScissors(game) => rps::process_input(game, input, feedback),
            Self::Radio(player) => radio::process_input(player, input),
        }
    }

    /// Advance timers. Returns true if the state changed on its own.
    pub fn tick<R: Rng>(&mut self, dt: Duration, rng: &mut R, feedback: &mut dyn Feedback) -> bool {
        match self {
            Self::Chess(game) => chess::tick(game, dt, rng, feedback),
            Self::RockPaperScissors(game) => rps::tick(game, dt, rng, feedback),
            Self::Radio(_) => false,
        }
    }
}

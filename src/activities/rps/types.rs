//! Rock-paper-scissors data structures.

use std::time::Duration;

/// Time between shake pulses
pub const SHAKE_PULSE_INTERVAL: Duration = Duration::from_millis(400);
/// Number of shake pulses before the reveal
pub const SHAKE_PULSES: u32 = 3;
/// Time from the player's pick to the reveal
pub const REVEAL_AFTER: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Paper => "Paper",
            Self::Scissors => "Scissors",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Rock => "✊",
            Self::Paper => "✋",
            Self::Scissors => "✌",
        }
    }

    /// The choice this one defeats.
    pub fn beats(&self) -> Choice {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }
}

/// Round outcome from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Lose,
    Draw,
}

impl RoundResult {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Win => "You win!",
            Self::Lose => "You lose!",
            Self::Draw => "Draw!",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

/// The countdown between the player's pick and the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shake {
    pub elapsed: Duration,
    pub pulses: u32,
}

/// Active rock-paper-scissors session (transient, never saved)
#[derive(Debug, Clone, Default)]
pub struct RpsGame {
    /// Index into `Choice::ALL` under the cursor
    pub cursor: usize,
    pub player_choice: Option<Choice>,
    pub opponent_choice: Option<Choice>,
    pub shake: Option<Shake>,
    pub result: Option<RoundResult>,
    pub score: Score,
}

impl RpsGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn cursor_choice(&self) -> Choice {
        Choice::ALL[self.cursor % Choice::ALL.len()]
    }

    pub fn move_cursor(&mut self, step: isize) {
        let len = Choice::ALL.len() as isize;
        self.cursor = (self.cursor as isize + step).rem_euclid(len) as usize;
    }
}

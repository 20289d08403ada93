//! Rock-paper-scissors against the room bot.
//!
//! The player picks a hand, the hands shake for a moment, then the bot's
//! uniformly random pick is revealed and the score updated.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

//! Internet radio dial. The terminal build has no audio backend, so playback
//! is state the UI renders rather than sound.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

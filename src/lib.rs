//! Duo Room - a shared room with small activities: chess with an optional
//! bot, rock-paper-scissors and an internet radio dial.
//!
//! This module exposes the room and activity logic for testing and for the
//! terminal front end in `main.rs`.

pub mod activities;
pub mod app;
pub mod build_info;
pub mod config;
pub mod feedback;
pub mod logging;
pub mod room;
pub mod utils;

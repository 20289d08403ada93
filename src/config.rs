//! User settings stored at ~/.duoroom/config.json.

use crate::activities::chess::{BotConfig, BotDifficulty};
use crate::room::RoomTheme;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.json";

/// Bot defaults for new chess boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub enabled: bool,
    pub difficulty: BotDifficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display_name: String,
    pub avatar: String,
    pub theme: RoomTheme,
    pub bot: BotSettings,
    /// Ring the terminal bell on check, checkmate and round wins
    pub sound: bool,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: "Player".to_string(),
            avatar: "🙂".to_string(),
            theme: RoomTheme::default(),
            bot: BotSettings::default(),
            sound: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from ~/.duoroom/config.json. Missing or broken files give defaults.
    pub fn load() -> Self {
        match data_path(CONFIG_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&data_path(CONFIG_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            enabled: self.bot.enabled,
            difficulty: self.bot.difficulty,
            ..BotConfig::default()
        }
    }
}

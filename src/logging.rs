//! File logging. The terminal belongs to the UI, so log lines go to
//! ~/.duoroom/duoroom.log instead of stderr.

use crate::utils::persistence::data_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "duoroom.log";

/// `RUST_LOG` wins over the configured level; an unparsable level means `info`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file path.
pub fn init(level: &str) -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_override() -> bool {
        std::env::var_os("RUST_LOG").is_some()
    }

    #[test]
    fn test_configured_level_used() {
        if env_override() {
            return;
        }
        assert_eq!(filter("debug").to_string(), "debug");
    }

    #[test]
    fn test_bad_level_falls_back_to_info() {
        if env_override() {
            return;
        }
        assert_eq!(filter("duoroom=loud").to_string(), "info");
    }
}

//! JSON file helpers for the ~/.duoroom/ directory.
//!
//! Only settings and the log file live here. Rooms and games are never saved.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_DIR: &str = ".duoroom";

/// Get the ~/.duoroom/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(APP_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.duoroom/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Read a JSON file. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Load a JSON file, returning `T::default()` if it is missing or unreadable.
/// An unreadable file is logged and left in place.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "falling back to defaults");
            T::default()
        }
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

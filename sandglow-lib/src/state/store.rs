//! JSON persistence for the session state record.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use super::PlaylistMode;
use crate::constants::DEFAULT_SPEED;
use crate::sync::SyncSettings;

/// Flat, serializable snapshot of every session field.
///
/// Each field falls back to a named default, so records written by older
/// versions load without error; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRecord {
    pub current_file: Option<String>,
    pub pause_requested: bool,
    pub stop_requested: bool,
    pub speed: u32,
    pub progress: Option<f64>,
    pub current_theta: f64,
    pub current_rho: f64,
    pub playlist: Option<String>,
    pub playlist_name: Option<String>,
    pub playlist_index: usize,
    pub playlist_mode: PlaylistMode,
    pub pause_time_secs: f64,
    pub device_address: Option<String>,
    pub sync: SyncSettings,
}

impl Default for StateRecord {
    fn default() -> Self {
        Self {
            current_file: None,
            pause_requested: false,
            stop_requested: false,
            speed: DEFAULT_SPEED,
            progress: None,
            current_theta: 0.0,
            current_rho: 0.0,
            playlist: None,
            playlist_name: None,
            playlist_index: 0,
            playlist_mode: PlaylistMode::Loop,
            pause_time_secs: 0.0,
            device_address: None,
            sync: SyncSettings::default(),
        }
    }
}

impl StateRecord {
    /// Write the record to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Load a record from `path`, falling back to defaults on any failure.
///
/// A missing file is normal on first run; a corrupt or unreadable one is
/// logged and replaced by defaults rather than surfaced to the caller.
pub fn load_or_default(path: &Path) -> StateRecord {
    if !path.exists() {
        return StateRecord::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(err) => {
                warn!("corrupt state file {}: {}", path.display(), err);
                StateRecord::default()
            }
        },
        Err(err) => {
            warn!("unreadable state file {}: {}", path.display(), err);
            StateRecord::default()
        }
    }
}

/// Error type for explicit state persistence.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Encode(err) => write!(f, "encode error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

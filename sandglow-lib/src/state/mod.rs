//! Reactive session state shared by the table and the lighting engine.
//!
//! Every reactive write is a single assignment immediately followed by a
//! publish of the *public* view to an injected [`StatusSink`], so a no-op
//! sink makes writes side-effect free and tests can observe exactly what
//! external consumers would see.

mod store;

pub use store::{load_or_default, StateRecord, StoreError};

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sync::SyncSettings;

/// Partial public view of session state pushed to a status sink.
///
/// Only the fields touched by a write are populated; consumers merge
/// successive updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

/// Best-effort sink for public state updates.
///
/// Implementations must not block and must not panic into the caller.
pub trait StatusSink: Send + Sync {
    fn publish(&self, update: &StateUpdate);
}

/// Sink that discards every update.
#[derive(Debug, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn publish(&self, _update: &StateUpdate) {}
}

/// Playlist advance behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistMode {
    Loop,
    Single,
    Shuffle,
}

impl Default for PlaylistMode {
    fn default() -> Self {
        PlaylistMode::Loop
    }
}

/// Machine/session state container with an explicit lifecycle:
/// construct, load-or-default, mutate, persist, reset.
pub struct SessionState {
    sink: Arc<dyn StatusSink>,
    record: StateRecord,
}

impl SessionState {
    pub fn new(sink: Arc<dyn StatusSink>) -> Self {
        Self {
            sink,
            record: StateRecord::default(),
        }
    }

    /// Build a container around an already-loaded record.
    pub fn with_record(sink: Arc<dyn StatusSink>, record: StateRecord) -> Self {
        Self { sink, record }
    }

    /// Load persisted fields from `path`, or defaults when unavailable.
    pub fn load(sink: Arc<dyn StatusSink>, path: &Path) -> Self {
        Self::with_record(sink, store::load_or_default(path))
    }

    /// Snapshot of every persisted field.
    pub fn to_record(&self) -> StateRecord {
        self.record.clone()
    }

    /// Replace all fields from a record. Does not publish.
    pub fn from_record(&mut self, record: StateRecord) {
        self.record = record;
    }

    /// Persist the full field set to `path`.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.record.save(path)
    }

    /// Whether a pattern is actively running.
    pub fn is_running(&self) -> bool {
        self.record.current_file.is_some() && !self.record.pause_requested
    }

    pub fn current_file(&self) -> Option<&str> {
        self.record.current_file.as_deref()
    }

    /// Set or clear the active pattern file.
    ///
    /// Clearing also clears execution progress. Publishes the file name
    /// (empty string when unset, never null) plus the derived running flag.
    pub fn set_current_file(&mut self, file: Option<String>) {
        if file.is_none() {
            self.record.progress = None;
        }
        self.record.current_file = file;

        self.sink.publish(&StateUpdate {
            current_file: Some(self.record.current_file.clone().unwrap_or_default()),
            is_running: Some(self.is_running()),
            progress: self.record.current_file.is_none().then_some(0.0),
            ..StateUpdate::default()
        });
    }

    pub fn pause_requested(&self) -> bool {
        self.record.pause_requested
    }

    pub fn set_pause_requested(&mut self, paused: bool) {
        self.record.pause_requested = paused;
        self.sink.publish(&StateUpdate {
            is_running: Some(self.is_running()),
            ..StateUpdate::default()
        });
    }

    pub fn speed(&self) -> u32 {
        self.record.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.record.speed = speed;
        self.sink.publish(&StateUpdate {
            speed: Some(speed),
            ..StateUpdate::default()
        });
    }

    pub fn playlist(&self) -> Option<&str> {
        self.record.playlist.as_deref()
    }

    pub fn playlist_name(&self) -> Option<&str> {
        self.record.playlist_name.as_deref()
    }

    /// Set or clear the active playlist.
    ///
    /// Clearing also clears the playlist name in the same write.
    pub fn set_playlist(&mut self, playlist: Option<String>) {
        if playlist.is_none() {
            self.record.playlist_name = None;
        }
        self.record.playlist = playlist;

        self.sink.publish(&StateUpdate {
            playlist: Some(self.record.playlist.clone().unwrap_or_default()),
            playlist_name: Some(self.record.playlist_name.clone().unwrap_or_default()),
            ..StateUpdate::default()
        });
    }

    pub fn set_playlist_name(&mut self, name: Option<String>) {
        self.record.playlist_name = name;
        self.sink.publish(&StateUpdate {
            playlist_name: Some(self.record.playlist_name.clone().unwrap_or_default()),
            ..StateUpdate::default()
        });
    }

    pub fn progress(&self) -> Option<f64> {
        self.record.progress
    }

    pub fn set_progress(&mut self, progress: Option<f64>) {
        self.record.progress = progress;
        self.sink.publish(&StateUpdate {
            progress: Some(progress.unwrap_or(0.0)),
            ..StateUpdate::default()
        });
    }

    pub fn stop_requested(&self) -> bool {
        self.record.stop_requested
    }

    pub fn set_stop_requested(&mut self, stop: bool) {
        self.record.stop_requested = stop;
    }

    /// Record the latest table position. Sampled by the driving loop, so
    /// this deliberately does not publish.
    pub fn set_position(&mut self, theta: f64, rho: f64) {
        self.record.current_theta = theta;
        self.record.current_rho = rho;
    }

    pub fn position(&self) -> (f64, f64) {
        (self.record.current_theta, self.record.current_rho)
    }

    pub fn playlist_index(&self) -> usize {
        self.record.playlist_index
    }

    pub fn set_playlist_index(&mut self, index: usize) {
        self.record.playlist_index = index;
    }

    pub fn playlist_mode(&self) -> PlaylistMode {
        self.record.playlist_mode
    }

    pub fn set_playlist_mode(&mut self, mode: PlaylistMode) {
        self.record.playlist_mode = mode;
    }

    pub fn pause_time_secs(&self) -> f64 {
        self.record.pause_time_secs
    }

    pub fn set_pause_time_secs(&mut self, seconds: f64) {
        self.record.pause_time_secs = seconds;
    }

    pub fn device_address(&self) -> Option<&str> {
        self.record.device_address.as_deref()
    }

    pub fn set_device_address(&mut self, address: Option<String>) {
        self.record.device_address = address;
    }

    pub fn sync_settings(&self) -> SyncSettings {
        self.record.sync
    }

    pub fn set_sync_settings(&mut self, settings: SyncSettings) {
        self.record.sync = settings;
    }

    /// Reset every field to its default and publish the cleared view.
    pub fn reset(&mut self) {
        self.record = StateRecord::default();
        self.sink.publish(&StateUpdate {
            current_file: Some(String::new()),
            is_running: Some(false),
            speed: Some(self.record.speed),
            playlist: Some(String::new()),
            playlist_name: Some(String::new()),
            progress: Some(0.0),
        });
    }
}

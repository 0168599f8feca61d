//! Shared error types for the services crate.

use thiserror::Error;

use markeasy_core::{EntryError, SettingsError};

/// Errors emitted by speech engines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("no speech command found (tried {tried})")]
    Unavailable { tried: String },
    #[error("invalid speech command: {0:?}")]
    InvalidCommand(String),
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by the playback sequencer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// Errors emitted by `ReaderService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReaderError {
    #[error("playback is already running")]
    AlreadyRunning,
    #[error("invalid format: use \"1.A\"")]
    InvalidFormat,
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

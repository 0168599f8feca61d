#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod playback;
pub mod reader_service;
pub mod speech;

pub use app_services::AppServices;
pub use error::{AppServicesError, PlaybackError, ReaderError, SpeechError};
pub use playback::{PlaybackReport, play};
pub use reader_service::{AddOutcome, ReaderService};
pub use speech::{SilentSpeech, SpeechConfig, SpeechEngine, SystemSpeech};
pub use tokio_util::sync::CancellationToken;

use std::sync::Arc;

use markeasy_core::PlaybackSettings;

use crate::error::AppServicesError;
use crate::reader_service::ReaderService;
use crate::speech::{SilentSpeech, SpeechConfig, SpeechEngine, SystemSpeech};

/// Assembles app-facing services around one speech engine.
#[derive(Clone)]
pub struct AppServices {
    speech: Arc<dyn SpeechEngine>,
    reader: Arc<ReaderService>,
}

impl AppServices {
    #[must_use]
    pub fn new(speech: Arc<dyn SpeechEngine>, settings: PlaybackSettings) -> Self {
        let reader = Arc::new(ReaderService::new(Arc::clone(&speech), settings));
        Self { speech, reader }
    }

    /// Build services that speak through the platform speech command.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if no usable speech command is found.
    pub fn system(
        config: &SpeechConfig,
        settings: PlaybackSettings,
    ) -> Result<Self, AppServicesError> {
        let speech = SystemSpeech::from_config(config)?;
        Ok(Self::new(Arc::new(speech), settings))
    }

    /// Build services that log utterances instead of speaking them.
    #[must_use]
    pub fn silent(settings: PlaybackSettings) -> Self {
        Self::new(Arc::new(SilentSpeech), settings)
    }

    #[must_use]
    pub fn reader(&self) -> Arc<ReaderService> {
        Arc::clone(&self.reader)
    }

    #[must_use]
    pub fn speech(&self) -> Arc<dyn SpeechEngine> {
        Arc::clone(&self.speech)
    }
}

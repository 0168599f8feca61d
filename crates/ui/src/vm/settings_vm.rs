use std::time::Duration;

use markeasy_core::{Pacing, PlaybackSettings, SettingsError, UtteranceStyle};

/// Editable text form of the playback settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsFormVm {
    pub step_delay_ms: String,
    pub pass_gap_ms: String,
    pub wait_for_speech: bool,
    pub verbatim: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsInputError {
    NotANumber { field: &'static str },
    OutOfRange(SettingsError),
}

impl SettingsInputError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotANumber { field } => format!("{field} must be a whole number of milliseconds"),
            Self::OutOfRange(err) => err.to_string(),
        }
    }
}

#[must_use]
pub fn map_settings_form(settings: &PlaybackSettings) -> SettingsFormVm {
    SettingsFormVm {
        step_delay_ms: settings.step_delay().as_millis().to_string(),
        pass_gap_ms: settings.pass_gap().as_millis().to_string(),
        wait_for_speech: settings.pacing() == Pacing::AwaitSpeech,
        verbatim: settings.utterance_style() == UtteranceStyle::Verbatim,
    }
}

/// Validates the form on top of `current`, keeping its repeat count.
///
/// # Errors
///
/// Returns `SettingsInputError` for non-numeric or out-of-range delays.
pub fn apply_settings_form(
    current: PlaybackSettings,
    form: &SettingsFormVm,
) -> Result<PlaybackSettings, SettingsInputError> {
    let step_delay = parse_ms(&form.step_delay_ms, "Delay")?;
    let pass_gap = parse_ms(&form.pass_gap_ms, "Pause between passes")?;
    let pacing = if form.wait_for_speech {
        Pacing::AwaitSpeech
    } else {
        Pacing::FixedDelay
    };
    let style = if form.verbatim {
        UtteranceStyle::Verbatim
    } else {
        UtteranceStyle::NumberAnswer
    };

    current
        .with_step_delay(step_delay)
        .and_then(|settings| settings.with_pass_gap(pass_gap))
        .map(|settings| settings.with_pacing(pacing).with_utterance_style(style))
        .map_err(SettingsInputError::OutOfRange)
}

fn parse_ms(raw: &str, field: &'static str) -> Result<Duration, SettingsInputError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| SettingsInputError::NotANumber { field })
}

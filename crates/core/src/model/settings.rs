use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Entry;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("step delay must be at most {max_ms} ms")]
    StepDelayTooLong { max_ms: u64 },

    #[error("pass gap must be at most {max_ms} ms")]
    PassGapTooLong { max_ms: u64 },
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// How the sequencer paces consecutive utterances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Start the next step once the fixed delay elapses, whether or not the
    /// engine has finished speaking.
    #[default]
    FixedDelay,
    /// Wait for the engine to report the utterance finished, then apply the delay.
    AwaitSpeech,
}

/// How an entry is phrased when spoken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtteranceStyle {
    /// `Number 1, A`
    #[default]
    NumberAnswer,
    /// `Number 1.A`
    Verbatim,
}

impl UtteranceStyle {
    #[must_use]
    pub fn utterance(self, entry: &Entry) -> String {
        match self {
            Self::NumberAnswer => format!("Number {}, {}", entry.number(), entry.answer()),
            Self::Verbatim => format!("Number {}.{}", entry.number(), entry.answer()),
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Parameters of a read-aloud run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    repeat_count: u32,
    step_delay: Duration,
    pass_gap: Duration,
    pacing: Pacing,
    utterance_style: UtteranceStyle,
}

impl PlaybackSettings {
    pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(3_000);
    pub const MAX_DELAY: Duration = Duration::from_secs(60);

    /// Creates validated settings. A repeat count below 1 is raised to 1.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if either delay exceeds [`Self::MAX_DELAY`].
    pub fn new(
        repeat_count: u32,
        step_delay: Duration,
        pass_gap: Duration,
        pacing: Pacing,
        utterance_style: UtteranceStyle,
    ) -> Result<Self, SettingsError> {
        let max_ms = u64::try_from(Self::MAX_DELAY.as_millis()).unwrap_or(u64::MAX);
        if step_delay > Self::MAX_DELAY {
            return Err(SettingsError::StepDelayTooLong { max_ms });
        }
        if pass_gap > Self::MAX_DELAY {
            return Err(SettingsError::PassGapTooLong { max_ms });
        }
        Ok(Self {
            repeat_count: repeat_count.max(1),
            step_delay,
            pass_gap,
            pacing,
            utterance_style,
        })
    }

    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    #[must_use]
    pub fn pass_gap(&self) -> Duration {
        self.pass_gap
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    #[must_use]
    pub fn utterance_style(&self) -> UtteranceStyle {
        self.utterance_style
    }

    /// Returns a copy with the given repeat count, clamped to at least 1.
    #[must_use]
    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count.max(1);
        self
    }

    #[must_use]
    pub fn increment_repeat(self) -> Self {
        self.with_repeat_count(self.repeat_count.saturating_add(1))
    }

    #[must_use]
    pub fn decrement_repeat(self) -> Self {
        self.with_repeat_count(self.repeat_count.saturating_sub(1))
    }

    /// # Errors
    ///
    /// Returns `SettingsError` if the delay exceeds [`Self::MAX_DELAY`].
    pub fn with_step_delay(self, step_delay: Duration) -> Result<Self, SettingsError> {
        Self::new(
            self.repeat_count,
            step_delay,
            self.pass_gap,
            self.pacing,
            self.utterance_style,
        )
    }

    /// # Errors
    ///
    /// Returns `SettingsError` if the gap exceeds [`Self::MAX_DELAY`].
    pub fn with_pass_gap(self, pass_gap: Duration) -> Result<Self, SettingsError> {
        Self::new(
            self.repeat_count,
            self.step_delay,
            pass_gap,
            self.pacing,
            self.utterance_style,
        )
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_utterance_style(mut self, utterance_style: UtteranceStyle) -> Self {
        self.utterance_style = utterance_style;
        self
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat_count: 1,
            step_delay: Self::DEFAULT_STEP_DELAY,
            pass_gap: Duration::ZERO,
            pacing: Pacing::FixedDelay,
            utterance_style: UtteranceStyle::NumberAnswer,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryId;

    #[test]
    fn defaults_match_mobile_app() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.repeat_count(), 1);
        assert_eq!(settings.step_delay(), Duration::from_millis(3_000));
        assert_eq!(settings.pass_gap(), Duration::ZERO);
        assert_eq!(settings.pacing(), Pacing::FixedDelay);
    }

    #[test]
    fn repeat_count_is_clamped_to_one() {
        let settings = PlaybackSettings::default().with_repeat_count(0);
        assert_eq!(settings.repeat_count(), 1);
        assert_eq!(settings.decrement_repeat().repeat_count(), 1);
        assert_eq!(settings.increment_repeat().repeat_count(), 2);
    }

    #[test]
    fn new_clamps_zero_repeat() {
        let settings = PlaybackSettings::new(
            0,
            Duration::from_millis(100),
            Duration::ZERO,
            Pacing::FixedDelay,
            UtteranceStyle::NumberAnswer,
        )
        .unwrap();
        assert_eq!(settings.repeat_count(), 1);
    }

    #[test]
    fn rejects_overlong_delays() {
        let err = PlaybackSettings::default()
            .with_step_delay(Duration::from_secs(61))
            .unwrap_err();
        assert_eq!(err, SettingsError::StepDelayTooLong { max_ms: 60_000 });

        let err = PlaybackSettings::default()
            .with_pass_gap(Duration::from_secs(120))
            .unwrap_err();
        assert_eq!(err, SettingsError::PassGapTooLong { max_ms: 60_000 });
    }

    #[test]
    fn utterance_styles() {
        let entry = Entry::new(EntryId::new(1), "4", "D").unwrap();
        assert_eq!(UtteranceStyle::NumberAnswer.utterance(&entry), "Number 4, D");
        assert_eq!(UtteranceStyle::Verbatim.utterance(&entry), "Number 4.D");
    }
}

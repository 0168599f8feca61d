//! The playback sequencer: drives a [`PlaybackPlan`] through a speech engine.

use std::time::Duration;

use markeasy_core::{Pacing, PlaybackPlan};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::PlaybackError;
use crate::speech::SpeechEngine;

/// Completion signal of a read-aloud run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Utterances handed to the speech engine.
    pub spoken: usize,
    /// Steps in the plan.
    pub total: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl PlaybackReport {
    /// Report for a run that had nothing to say.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            spoken: 0,
            total: 0,
            cancelled: false,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.spoken == self.total
    }
}

/// Speaks every step of `plan` in order, pausing for each step's delay.
///
/// Returns as soon as the pause after the final step elapses. `cancel` is
/// checked before each step and interrupts any pause in progress; on
/// cancellation the engine is told to stop and the report is marked
/// `cancelled`.
///
/// # Errors
///
/// Returns `PlaybackError::Speech` if the engine fails to start an utterance.
pub async fn play(
    plan: &PlaybackPlan,
    speech: &dyn SpeechEngine,
    cancel: &CancellationToken,
) -> Result<PlaybackReport, PlaybackError> {
    let started = Instant::now();
    let total = plan.len();
    if plan.is_empty() {
        return Ok(PlaybackReport::empty());
    }

    let pacing = plan.settings().pacing();
    info!(
        steps = total,
        passes = plan.settings().repeat_count(),
        engine = speech.name(),
        ?pacing,
        "playback started"
    );

    let mut spoken = 0;
    for step in plan.steps() {
        if cancel.is_cancelled() {
            return halt(speech, spoken, total, started).await;
        }

        debug!(pass = step.pass, index = step.index, utterance = %step.utterance, "speak");
        speech.speak(&step.utterance).await?;
        spoken += 1;

        if pacing == Pacing::AwaitSpeech {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return halt(speech, spoken, total, started).await,
                finished = speech.wait_idle() => finished?,
            }
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return halt(speech, spoken, total, started).await,
            () = tokio::time::sleep(step.delay) => {}
        }
    }

    let report = PlaybackReport {
        spoken,
        total,
        cancelled: false,
        elapsed: started.elapsed(),
    };
    info!(spoken, elapsed = ?report.elapsed, "playback finished");
    Ok(report)
}

async fn halt(
    speech: &dyn SpeechEngine,
    spoken: usize,
    total: usize,
    started: Instant,
) -> Result<PlaybackReport, PlaybackError> {
    if let Err(err) = speech.stop().await {
        warn!(%err, "failed to silence speech after cancel");
    }
    info!(spoken, total, "playback cancelled");
    Ok(PlaybackReport {
        spoken,
        total,
        cancelled: true,
        elapsed: started.elapsed(),
    })
}

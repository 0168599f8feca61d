use std::time::Duration;

use crate::model::{Entry, PlaybackSettings};

/// One spoken phrase and the pause that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackStep {
    /// Zero-based pass over the entry list.
    pub pass: u32,
    /// Position of the entry within the list.
    pub index: usize,
    pub utterance: String,
    pub delay: Duration,
}

/// The ordered schedule of a read-aloud run.
///
/// Steps are produced on demand from the entry snapshot, so the plan stays
/// the size of the list whatever the repeat count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackPlan {
    entries: Vec<Entry>,
    settings: PlaybackSettings,
}

impl PlaybackPlan {
    /// Plans `repeat_count` passes over `entries`.
    ///
    /// The last step of each pass but the final one also carries the pass gap.
    #[must_use]
    pub fn build(entries: &[Entry], settings: PlaybackSettings) -> Self {
        Self {
            entries: entries.to_vec(),
            settings,
        }
    }

    /// Steps in speaking order.
    #[must_use]
    pub fn steps(&self) -> Steps<'_> {
        Steps {
            plan: self,
            pass: 0,
            index: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Number of steps, saturating at `usize::MAX`.
    #[must_use]
    pub fn len(&self) -> usize {
        let passes = usize::try_from(self.settings.repeat_count()).unwrap_or(usize::MAX);
        self.entries.len().saturating_mul(passes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all pauses; the minimum wall-clock length of the run.
    #[must_use]
    pub fn total_delay(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let passes = self.settings.repeat_count();
        let per_pass = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        self.settings
            .step_delay()
            .saturating_mul(per_pass)
            .saturating_mul(passes)
            .saturating_add(self.settings.pass_gap().saturating_mul(passes - 1))
    }

    fn step(&self, pass: u32, index: usize) -> Option<PlaybackStep> {
        let entry = self.entries.get(index)?;
        let ends_pass = index + 1 == self.entries.len() && pass + 1 < self.settings.repeat_count();
        let delay = if ends_pass {
            self.settings.step_delay() + self.settings.pass_gap()
        } else {
            self.settings.step_delay()
        };
        Some(PlaybackStep {
            pass,
            index,
            utterance: self.settings.utterance_style().utterance(entry),
            delay,
        })
    }
}

/// Iterator over the steps of a [`PlaybackPlan`].
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    plan: &'a PlaybackPlan,
    pass: u32,
    index: usize,
}

impl Iterator for Steps<'_> {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<PlaybackStep> {
        if self.pass >= self.plan.settings.repeat_count() {
            return None;
        }
        let step = self.plan.step(self.pass, self.index)?;
        self.index += 1;
        if self.index == self.plan.entries.len() {
            self.index = 0;
            self.pass += 1;
        }
        Some(step)
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use markeasy_core::{Entry, EntryId, EntryList, PlaybackPlan, PlaybackSettings, parse, parse_single};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ReaderError;
use crate::playback::{PlaybackReport, play};
use crate::speech::SpeechEngine;

/// Result of submitting answer-key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<EntryId>,
    pub invalid: usize,
    /// One aggregate message when any segment was rejected.
    pub warning: Option<&'static str>,
}

/// The reading session: entry list, playback settings and the running gate.
///
/// At most one playback runs at a time. The list may still be edited while a
/// run is in progress; the run reads the snapshot taken when it started.
pub struct ReaderService {
    entries: Mutex<EntryList>,
    settings: Mutex<PlaybackSettings>,
    /// Token of the run in progress. `Some` exactly while a run holds the gate.
    active: Mutex<Option<CancellationToken>>,
    running: watch::Sender<bool>,
    speech: Arc<dyn SpeechEngine>,
}

impl ReaderService {
    #[must_use]
    pub fn new(speech: Arc<dyn SpeechEngine>, settings: PlaybackSettings) -> Self {
        Self {
            entries: Mutex::new(EntryList::new()),
            settings: Mutex::new(settings),
            active: Mutex::new(None),
            running: watch::Sender::new(false),
            speech,
        }
    }

    // ─── Entries ──────────────────────────────────────────────────────────────

    /// Parses `raw` and appends every valid pair.
    pub fn add_text(&self, raw: &str) -> AddOutcome {
        let outcome = parse(raw);
        let warning = outcome.warning();
        let invalid = outcome.invalid;
        let added = self.lock_entries().add(outcome.entries);
        if invalid > 0 {
            warn!(invalid, added = added.len(), "dropped malformed answer-key segments");
        } else {
            debug!(added = added.len(), "added entries");
        }
        AddOutcome {
            added,
            invalid,
            warning,
        }
    }

    /// Relabels an entry in place. `Ok(false)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Entry` if either label is empty.
    pub fn update_entry(
        &self,
        id: EntryId,
        number: &str,
        answer: &str,
    ) -> Result<bool, ReaderError> {
        Ok(self.lock_entries().update(id, number, answer)?)
    }

    /// Relabels an entry from edit-box text such as `5. E`.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::InvalidFormat` if the text is not a single pair.
    pub fn update_from_text(&self, id: EntryId, raw: &str) -> Result<bool, ReaderError> {
        let draft = parse_single(raw).ok_or(ReaderError::InvalidFormat)?;
        self.update_entry(id, draft.number(), draft.answer())
    }

    pub fn delete_entry(&self, id: EntryId) -> bool {
        self.lock_entries().delete(id)
    }

    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.lock_entries().snapshot()
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<Entry> {
        self.lock_entries().get(id).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    // ─── Settings ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> PlaybackSettings {
        *self.lock_settings()
    }

    pub fn set_settings(&self, settings: PlaybackSettings) {
        *self.lock_settings() = settings;
    }

    /// Sets the repeat count, raising anything below 1 to 1.
    pub fn set_repeat_count(&self, repeat_count: u32) -> u32 {
        let mut settings = self.lock_settings();
        *settings = settings.with_repeat_count(repeat_count);
        settings.repeat_count()
    }

    pub fn increment_repeat(&self) -> u32 {
        let mut settings = self.lock_settings();
        *settings = settings.increment_repeat();
        settings.repeat_count()
    }

    pub fn decrement_repeat(&self) -> u32 {
        let mut settings = self.lock_settings();
        *settings = settings.decrement_repeat();
        settings.repeat_count()
    }

    // ─── Playback ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock_active().is_some()
    }

    /// Follows the running flag; the receiver sees every start and finish.
    #[must_use]
    pub fn watch_running(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }

    #[must_use]
    pub fn speech_name(&self) -> String {
        self.speech.name().to_string()
    }

    /// Reads the current list aloud and resolves once the run is over.
    ///
    /// An empty list completes immediately without touching the running flag.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::AlreadyRunning` if another run is in progress and
    /// `ReaderError::Playback` if the speech engine fails.
    pub async fn start_playback(&self) -> Result<PlaybackReport, ReaderError> {
        if self.is_running() {
            return Err(ReaderError::AlreadyRunning);
        }
        let entries = self.entries();
        if entries.is_empty() {
            debug!("nothing to read");
            return Ok(PlaybackReport::empty());
        }
        let cancel = {
            let mut active = self.lock_active();
            if active.is_some() {
                return Err(ReaderError::AlreadyRunning);
            }
            let token = CancellationToken::new();
            *active = Some(token.clone());
            self.running.send_replace(true);
            token
        };
        let _running = RunningGuard { service: self };

        let plan = PlaybackPlan::build(&entries, self.settings());
        info!(entries = entries.len(), steps = plan.len(), "reading answer key");
        let report = play(&plan, self.speech.as_ref(), &cancel).await?;
        Ok(report)
    }

    /// Cancels the run in progress. Returns `false` if nothing was running.
    pub fn stop(&self) -> bool {
        match self.lock_active().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, EntryList> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_settings(&self) -> MutexGuard<'_, PlaybackSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the running flag when a run ends, however it ends.
struct RunningGuard<'a> {
    service: &'a ReaderService,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        let mut active = self.service.lock_active();
        active.take();
        self.service.running.send_replace(false);
    }
}

use crate::model::{Entry, EntryDraft, EntryError, EntryId, EntryIdGenerator};

/// Ordered answer-key entries for one session.
///
/// Insertion order is preserved by every operation. Ids come from an owned
/// [`EntryIdGenerator`] and are never reused, including after [`EntryList::clear`].
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
    ids: EntryIdGenerator,
}

impl EntryList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends drafts after the existing entries and returns their new ids.
    pub fn add(&mut self, drafts: impl IntoIterator<Item = EntryDraft>) -> Vec<EntryId> {
        drafts
            .into_iter()
            .map(|draft| {
                let entry = draft.assign_id(self.ids.next_id());
                let id = entry.id();
                self.entries.push(entry);
                id
            })
            .collect()
    }

    /// Removes the entry with `id`. Returns `false` if there was none.
    pub fn delete(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Relabels the entry with `id` in place.
    ///
    /// Returns `Ok(false)` if there is no such entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if either label is empty; the entry is left as it was.
    pub fn update(
        &mut self,
        id: EntryId,
        number: impl AsRef<str>,
        answer: impl AsRef<str>,
    ) -> Result<bool, EntryError> {
        match self.entries.iter_mut().find(|entry| entry.id() == id) {
            Some(entry) => entry.relabel(number, answer).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// An owned copy of the current list, for playback.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

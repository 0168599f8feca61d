use markeasy_core::{Entry, EntryId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRowVm {
    pub id: EntryId,
    pub label: String,
    pub edit_text: String,
}

#[must_use]
pub fn map_entry_rows(entries: &[Entry]) -> Vec<EntryRowVm> {
    entries
        .iter()
        .map(|entry| EntryRowVm {
            id: entry.id(),
            label: format!("Q{}: {}", entry.number(), entry.answer()),
            edit_text: entry.edit_text(),
        })
        .collect()
}

/// Enabled state and labels for the reader's buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderControlsVm {
    pub can_start: bool,
    pub can_stop: bool,
    pub can_clear: bool,
    pub start_label: &'static str,
    pub submit_label: &'static str,
}

#[must_use]
pub fn reader_controls(entry_count: usize, running: bool, editing: bool) -> ReaderControlsVm {
    ReaderControlsVm {
        can_start: !running && entry_count > 0,
        can_stop: running,
        can_clear: entry_count > 0,
        start_label: if running { "Reading..." } else { "Start Reading" },
        submit_label: if editing { "Update" } else { "Add" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_use_question_label() {
        let entries = vec![
            Entry::new(EntryId::new(1), "1", "A").unwrap(),
            Entry::new(EntryId::new(2), "2", "B").unwrap(),
        ];
        let rows = map_entry_rows(&entries);
        assert_eq!(rows[0].label, "Q1: A");
        assert_eq!(rows[1].label, "Q2: B");
        assert_eq!(rows[1].edit_text, "2. B");
        assert_eq!(rows[1].id, EntryId::new(2));
    }

    #[test]
    fn start_disabled_when_empty_or_running() {
        assert!(!reader_controls(0, false, false).can_start);
        assert!(!reader_controls(3, true, false).can_start);
        assert!(reader_controls(3, false, false).can_start);
    }

    #[test]
    fn labels_follow_state() {
        let idle = reader_controls(1, false, false);
        assert_eq!(idle.start_label, "Start Reading");
        assert_eq!(idle.submit_label, "Add");
        assert!(!idle.can_stop);

        let busy = reader_controls(1, true, true);
        assert_eq!(busy.start_label, "Reading...");
        assert_eq!(busy.submit_label, "Update");
        assert!(busy.can_stop);
    }
}

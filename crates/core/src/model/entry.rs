use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::EntryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("entry number cannot be empty")]
    EmptyNumber,

    #[error("entry answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// A validated number/answer pair that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    number: String,
    answer: String,
}

impl EntryDraft {
    /// Trims both labels and validates them.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if either label is empty after trimming.
    pub fn new(number: impl AsRef<str>, answer: impl AsRef<str>) -> Result<Self, EntryError> {
        let number = number.as_ref().trim();
        let answer = answer.as_ref().trim();
        if number.is_empty() {
            return Err(EntryError::EmptyNumber);
        }
        if answer.is_empty() {
            return Err(EntryError::EmptyAnswer);
        }
        Ok(Self {
            number: number.to_string(),
            answer: answer.to_string(),
        })
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn assign_id(self, id: EntryId) -> Entry {
        Entry {
            id,
            number: self.number,
            answer: self.answer,
        }
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One number/answer pair of an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    number: String,
    answer: String,
}

impl Entry {
    /// # Errors
    ///
    /// Returns `EntryError` if either label is empty after trimming.
    pub fn new(
        id: EntryId,
        number: impl AsRef<str>,
        answer: impl AsRef<str>,
    ) -> Result<Self, EntryError> {
        EntryDraft::new(number, answer).map(|draft| draft.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Replaces both labels, leaving the entry untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if either label is empty after trimming.
    pub fn relabel(
        &mut self,
        number: impl AsRef<str>,
        answer: impl AsRef<str>,
    ) -> Result<(), EntryError> {
        let draft = EntryDraft::new(number, answer)?;
        self.number = draft.number;
        self.answer = draft.answer;
        Ok(())
    }

    /// The text shown in an edit box when the entry is opened for editing.
    #[must_use]
    pub fn edit_text(&self) -> String {
        format!("{}. {}", self.number, self.answer)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_labels() {
        let draft = EntryDraft::new("  1 ", " A  ").unwrap();
        assert_eq!(draft.number(), "1");
        assert_eq!(draft.answer(), "A");
    }

    #[test]
    fn draft_rejects_blank_number() {
        assert_eq!(EntryDraft::new("  ", "A"), Err(EntryError::EmptyNumber));
    }

    #[test]
    fn draft_rejects_blank_answer() {
        assert_eq!(EntryDraft::new("1", "\t"), Err(EntryError::EmptyAnswer));
    }

    #[test]
    fn relabel_keeps_id_and_rejects_blank() {
        let mut entry = Entry::new(EntryId::new(7), "1", "A").unwrap();
        entry.relabel(" 5", "E ").unwrap();
        assert_eq!(entry.id(), EntryId::new(7));
        assert_eq!(entry.number(), "5");
        assert_eq!(entry.answer(), "E");

        let err = entry.relabel("6", "").unwrap_err();
        assert_eq!(err, EntryError::EmptyAnswer);
        assert_eq!(entry.number(), "5");
        assert_eq!(entry.answer(), "E");
    }

    #[test]
    fn edit_text_matches_input_format() {
        let entry = Entry::new(EntryId::new(1), "12", "C").unwrap();
        assert_eq!(entry.edit_text(), "12. C");
    }

    #[test]
    fn entry_serializes_labels() {
        let entry = Entry::new(EntryId::new(3), "3", "C").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["number"], "3");
        assert_eq!(json["answer"], "C");
    }
}

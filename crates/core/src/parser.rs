//! Answer-key text parsing.
//!
//! Input is a comma-separated list of `number.answer` pairs such as
//! `1.A, 2.B, 3.C`. Each pair is split on its first `.`; anything after that
//! belongs to the answer.

use crate::model::EntryDraft;

/// Message shown once per submission that contained malformed segments.
pub const INVALID_FORMAT_WARNING: &str = "Invalid format: use \"1.A, 2.B, ...\"";

/// Result of parsing one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub entries: Vec<EntryDraft>,
    pub invalid: usize,
}

impl ParseOutcome {
    #[must_use]
    pub fn has_invalid(&self) -> bool {
        self.invalid > 0
    }

    /// A single aggregate warning, if any segment was rejected.
    #[must_use]
    pub fn warning(&self) -> Option<&'static str> {
        self.has_invalid().then_some(INVALID_FORMAT_WARNING)
    }
}

/// Parses a whole submission.
///
/// Blank segments (empty input, trailing or doubled commas) are skipped and
/// are not counted as invalid.
#[must_use]
pub fn parse(raw: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for segment in raw.split(',').map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        match parse_segment(segment) {
            Some(draft) => outcome.entries.push(draft),
            None => outcome.invalid += 1,
        }
    }
    outcome
}

/// Parses the contents of an edit box holding a single pair.
#[must_use]
pub fn parse_single(raw: &str) -> Option<EntryDraft> {
    parse_segment(raw.trim())
}

fn parse_segment(segment: &str) -> Option<EntryDraft> {
    let (number, answer) = segment.split_once('.')?;
    EntryDraft::new(number, answer).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(outcome: &ParseOutcome) -> Vec<(&str, &str)> {
        outcome
            .entries
            .iter()
            .map(|draft| (draft.number(), draft.answer()))
            .collect()
    }

    #[test]
    fn parses_simple_key() {
        let outcome = parse("1.A, 2.B, 3.C");
        assert_eq!(labels(&outcome), vec![("1", "A"), ("2", "B"), ("3", "C")]);
        assert_eq!(outcome.invalid, 0);
        assert_eq!(outcome.warning(), None);
    }

    #[test]
    fn drops_and_counts_garbage() {
        let outcome = parse("1.A, garbage, 2.B");
        assert_eq!(labels(&outcome), vec![("1", "A"), ("2", "B")]);
        assert_eq!(outcome.invalid, 1);
        assert_eq!(outcome.warning(), Some(INVALID_FORMAT_WARNING));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let outcome = parse("");
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.invalid, 0);

        let outcome = parse("   ");
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.invalid, 0);
    }

    #[test]
    fn trailing_and_doubled_commas_are_ignored() {
        let outcome = parse("1.A,, 2.B,");
        assert_eq!(labels(&outcome), vec![("1", "A"), ("2", "B")]);
        assert_eq!(outcome.invalid, 0);
    }

    #[test]
    fn splits_on_first_dot_only() {
        let outcome = parse("1.A.B");
        assert_eq!(labels(&outcome), vec![("1", "A.B")]);
    }

    #[test]
    fn half_empty_pairs_are_invalid() {
        let outcome = parse("1., .B, . , 4.D");
        assert_eq!(labels(&outcome), vec![("4", "D")]);
        assert_eq!(outcome.invalid, 3);
    }

    #[test]
    fn trims_around_the_dot() {
        let outcome = parse(" 10 .  C ,11. D");
        assert_eq!(labels(&outcome), vec![("10", "C"), ("11", "D")]);
    }

    #[test]
    fn never_yields_blank_labels() {
        let inputs = [
            "", ",", ".", "..", "1.", ".A", " . ", "1. ,2.B", "a.b.c,,.,x", "\t.\n",
        ];
        for input in inputs {
            for draft in parse(input).entries {
                assert!(!draft.number().is_empty(), "blank number from {input:?}");
                assert!(!draft.answer().is_empty(), "blank answer from {input:?}");
            }
        }
    }

    #[test]
    fn parse_single_reads_edit_text() {
        let draft = parse_single("5. E").unwrap();
        assert_eq!((draft.number(), draft.answer()), ("5", "E"));
        assert!(parse_single("5").is_none());
        assert!(parse_single("5.").is_none());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an Entry
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Creates a new `EntryId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for EntryId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(EntryId::new)
            .map_err(|_| ParseIdError {
                kind: "EntryId".to_string(),
            })
    }
}

// ─── Generator ─────────────────────────────────────────────────────────────────

/// Issues session-unique entry ids.
///
/// Ids start at 1 and only ever grow, so an id is never handed out twice even
/// after the entry it named was deleted or the list was cleared.
#[derive(Debug)]
pub struct EntryIdGenerator {
    next: AtomicU64,
}

impl EntryIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns the next unused id.
    pub fn next_id(&self) -> EntryId {
        EntryId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntryIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_display() {
        let id = EntryId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "EntryId(42)");
    }

    #[test]
    fn test_entry_id_from_str() {
        let id: EntryId = "123".parse().unwrap();
        assert_eq!(id, EntryId::new(123));
    }

    #[test]
    fn test_entry_id_from_str_invalid() {
        let result = "not-a-number".parse::<EntryId>();
        assert!(result.is_err());
    }

    #[test]
    fn generator_starts_at_one_and_increments() {
        let ids = EntryIdGenerator::new();
        assert_eq!(ids.next_id(), EntryId::new(1));
        assert_eq!(ids.next_id(), EntryId::new(2));
        assert_eq!(ids.next_id(), EntryId::new(3));
    }

    #[test]
    fn generator_is_unique_across_threads() {
        let ids = std::sync::Arc::new(EntryIdGenerator::new());
        let handles = (0..4)
            .map(|_| {
                let ids = std::sync::Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();

        let mut all = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 1000);
    }
}

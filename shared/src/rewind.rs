use std::fmt;

use crate::history::SpinRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewindError {
    /// Nothing cached to rewind to.
    Empty,
    /// The cursor already sits on the oldest record.
    OldestReached,
}

impl fmt::Display for RewindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewindError::Empty => write!(f, "no previous spins to rewind to"),
            RewindError::OldestReached => write!(f, "already at the oldest spin in history"),
        }
    }
}

impl std::error::Error for RewindError {}

/// Backward navigation over a locally cached history snapshot.
///
/// The cache is loaded once at startup and only grows through
/// [`RewindNavigator::record_spin`] after a successful save; the navigator
/// never talks to the network itself.
#[derive(Debug, Clone, Default)]
pub struct RewindNavigator {
    history: Vec<SpinRecord>,
    cursor: Option<usize>,
}

impl RewindNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with a freshly fetched, chronologically ordered
    /// snapshot. The cursor lands on the newest record.
    pub fn load(&mut self, records: Vec<SpinRecord>) {
        self.cursor = records.len().checked_sub(1);
        self.history = records;
    }

    /// Append a spin that was just persisted and move the cursor to it, so
    /// the next rewind steps back from "now".
    pub fn record_spin(&mut self, record: SpinRecord) {
        self.history.push(record);
        self.cursor = Some(self.history.len() - 1);
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn latest(&self) -> Option<&SpinRecord> {
        self.history.last()
    }

    /// Step one record back and return it.
    ///
    /// An unset cursor, or one sitting on the newest entry, is first reset to
    /// the newest index, so the first rewind always shows the spin before the
    /// latest one. At index 0 the cursor stays put and `OldestReached` is
    /// returned.
    pub fn rewind(&mut self) -> Result<&SpinRecord, RewindError> {
        if self.history.is_empty() {
            return Err(RewindError::Empty);
        }

        let newest = self.history.len() - 1;
        let cursor = match self.cursor {
            None => newest,
            Some(c) => c.min(newest),
        };

        if cursor == 0 {
            self.cursor = Some(0);
            return Err(RewindError::OldestReached);
        }

        self.cursor = Some(cursor - 1);
        Ok(&self.history[cursor - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(winner: &str) -> SpinRecord {
        SpinRecord {
            winner: winner.to_string(),
            item_list: Some(vec![winner.to_string(), "other".to_string()]),
            timestamp: "2025-01-01T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_rewind_empty_cache() {
        let mut navigator = RewindNavigator::new();
        assert_eq!(navigator.rewind().unwrap_err(), RewindError::Empty);
    }

    #[test]
    fn test_cursor_walk_from_fresh_load() {
        let mut navigator = RewindNavigator::new();
        navigator.load(vec![record("first"), record("second"), record("third")]);

        // First call steps from the newest entry to the one before it.
        assert_eq!(navigator.rewind().unwrap().winner, "second");
        assert_eq!(navigator.rewind().unwrap().winner, "first");

        // Oldest reached: the cursor stays where it is.
        assert_eq!(navigator.rewind().unwrap_err(), RewindError::OldestReached);
        assert_eq!(navigator.rewind().unwrap_err(), RewindError::OldestReached);
    }

    #[test]
    fn test_single_record_is_immediately_oldest() {
        let mut navigator = RewindNavigator::new();
        navigator.load(vec![record("only")]);
        assert_eq!(navigator.rewind().unwrap_err(), RewindError::OldestReached);
    }

    #[test]
    fn test_record_spin_resets_cursor_to_newest() {
        let mut navigator = RewindNavigator::new();
        navigator.load(vec![record("first"), record("second")]);
        assert_eq!(navigator.rewind().unwrap().winner, "first");

        navigator.record_spin(record("third"));
        assert_eq!(navigator.latest().unwrap().winner, "third");

        // Cursor followed the new record, so rewinding shows its predecessor.
        assert_eq!(navigator.rewind().unwrap().winner, "second");
    }

    #[test]
    fn test_load_on_empty_history_keeps_cursor_unset() {
        let mut navigator = RewindNavigator::new();
        navigator.load(Vec::new());
        assert!(navigator.is_empty());
        assert_eq!(navigator.rewind().unwrap_err(), RewindError::Empty);
    }
}

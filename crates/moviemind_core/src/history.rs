use std::collections::HashSet;

use moviemind_logging::{mind_debug, mind_warn};

use crate::{HistoryEntry, HistoryId, RefreshId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced { count: usize },
    /// The fetch failed; the previous feed is still in place.
    Kept,
    /// A newer refresh was already applied.
    Outdated,
}

/// Read-mostly cache of past queries.
///
/// The service owns ordering and content: every successful refresh replaces
/// the feed wholesale and entries are never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    last_refresh_id: RefreshId,
    last_applied: Option<RefreshId>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the id for a new fetch of the feed.
    pub fn refresh(&mut self) -> RefreshId {
        self.last_refresh_id += 1;
        self.last_refresh_id
    }

    pub fn apply_refresh(
        &mut self,
        refresh_id: RefreshId,
        result: Result<Vec<HistoryEntry>, String>,
    ) -> RefreshOutcome {
        if self.last_applied.is_some_and(|applied| refresh_id < applied) {
            mind_debug!(
                "Ignoring history refresh {} (already applied {:?})",
                refresh_id,
                self.last_applied
            );
            return RefreshOutcome::Outdated;
        }

        match result {
            Ok(entries) => {
                warn_on_duplicate_ids(&entries);
                let count = entries.len();
                self.entries = entries;
                self.last_applied = Some(refresh_id);
                mind_debug!("History refresh {} applied {} entries", refresh_id, count);
                RefreshOutcome::Replaced { count }
            }
            Err(message) => {
                mind_warn!("History refresh {} failed: {}", refresh_id, message);
                RefreshOutcome::Kept
            }
        }
    }

    /// Returns the query text of an entry for resubmission.
    pub fn select(&self, id: &HistoryId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.user_input.as_str())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

fn warn_on_duplicate_ids(entries: &[HistoryEntry]) {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(&entry.id) {
            mind_warn!("History feed repeats id {}", entry.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry(id: &str, input: &str) -> HistoryEntry {
        HistoryEntry {
            id: HistoryId::new(id),
            user_input: input.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn refresh_replaces_feed_in_service_order() {
        let mut store = HistoryStore::new();
        let id = store.refresh();
        store.apply_refresh(id, Ok(vec![entry("2", "newer"), entry("1", "older")]));

        let id = store.refresh();
        let outcome = store.apply_refresh(id, Ok(vec![entry("3", "newest")]));

        assert_eq!(outcome, RefreshOutcome::Replaced { count: 1 });
        let inputs: Vec<_> = store.entries().iter().map(|e| e.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["newest"]);
    }

    #[test]
    fn failed_refresh_keeps_previous_feed() {
        let mut store = HistoryStore::new();
        let id = store.refresh();
        store.apply_refresh(id, Ok(vec![entry("1", "cozy")]));

        let id = store.refresh();
        let outcome = store.apply_refresh(id, Err("http status 503".to_string()));

        assert_eq!(outcome, RefreshOutcome::Kept);
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn older_response_does_not_overwrite_newer_one() {
        let mut store = HistoryStore::new();
        let startup = store.refresh();
        let after_success = store.refresh();

        store.apply_refresh(after_success, Ok(vec![entry("2", "b"), entry("1", "a")]));
        let outcome = store.apply_refresh(startup, Ok(vec![entry("1", "a")]));

        assert_eq!(outcome, RefreshOutcome::Outdated);
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn select_returns_user_input_without_mutation() {
        let mut store = HistoryStore::new();
        let id = store.refresh();
        store.apply_refresh(id, Ok(vec![entry("h1", "cozy winter comedy")]));
        let before = store.clone();

        assert_eq!(store.select(&HistoryId::new("h1")), Some("cozy winter comedy"));
        assert_eq!(store.select(&HistoryId::new("missing")), None);
        assert_eq!(store, before);
    }
}

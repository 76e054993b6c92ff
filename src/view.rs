//! In-memory copy of the highlight collection shown by a popup

use crate::highlight::{HighlightId, HighlightRecord};
use std::sync::RwLock;

/// The collection as currently displayed.
///
/// Populated from the repository when a popup opens and kept in step with
/// each successful write afterwards. Dropped with the popup.
#[derive(Debug, Default)]
pub struct HighlightView {
    records: RwLock<Vec<HighlightRecord>>,
}

impl HighlightView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed collection
    pub fn replace_all(&self, records: Vec<HighlightRecord>) {
        *self.records.write().unwrap() = records;
    }

    /// Copy of every displayed record, newest first
    pub fn snapshot(&self) -> Vec<HighlightRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn get(&self, id: &HighlightId) -> Option<HighlightRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records whose text or title contains `term`, ignoring case
    pub fn filter(&self, term: &str) -> Vec<HighlightRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.matches(term))
            .cloned()
            .collect()
    }

    /// Set or clear one record's summary; false if the record is not shown
    pub fn set_summary(&self, id: &HighlightId, summary: Option<String>) -> bool {
        let mut records = self.records.write().unwrap();
        match records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.summary = summary;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &HighlightId) -> bool {
        let mut records = self.records.write().unwrap();
        let before = records.len();
        records.retain(|r| &r.id != id);
        records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with(texts: &[&str]) -> (HighlightView, Vec<HighlightRecord>) {
        let records: Vec<_> = texts
            .iter()
            .map(|t| HighlightRecord::new(*t, "https://example.com", "Example page"))
            .collect();
        let view = HighlightView::new();
        view.replace_all(records.clone());
        (view, records)
    }

    #[test]
    fn set_summary_touches_only_target() {
        let (view, records) = view_with(&["one", "two"]);

        assert!(view.set_summary(&records[1].id, Some("s".into())));

        assert_eq!(view.get(&records[1].id).unwrap().summary.as_deref(), Some("s"));
        assert!(view.get(&records[0].id).unwrap().summary.is_none());
    }

    #[test]
    fn set_summary_on_unknown_id_is_false() {
        let (view, _) = view_with(&["one"]);
        assert!(!view.set_summary(&HighlightId::from_string("x"), None));
    }

    #[test]
    fn filter_matches_text_and_title() {
        let (view, _) = view_with(&["Borrow checker", "Lifetimes"]);
        assert_eq!(view.filter("borrow").len(), 1);
        assert_eq!(view.filter("example").len(), 2);
        assert_eq!(view.filter("").len(), 2);
        assert!(view.filter("monads").is_empty());
    }

    #[test]
    fn remove_reports_whether_present() {
        let (view, records) = view_with(&["one"]);
        assert!(view.remove(&records[0].id));
        assert!(!view.remove(&records[0].id));
        assert!(view.is_empty());
    }
}

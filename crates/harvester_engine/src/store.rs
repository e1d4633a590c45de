use std::collections::HashSet;

use crate::schema::PostRecord;

/// Insertion-ordered, append-only collection of records keyed by `id_str`.
///
/// `seen` always holds exactly the ids of `records`; both change together in
/// [`RecordStore::insert_batch`] and nowhere else.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PostRecord>,
    seen: HashSet<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the candidates whose id has not been seen, in order, and returns them.
    /// Duplicates inside the same batch are caught too.
    pub fn insert_batch<I>(&mut self, candidates: I) -> Vec<PostRecord>
    where
        I: IntoIterator<Item = PostRecord>,
    {
        let mut fresh = Vec::new();
        for record in candidates {
            if self.seen.insert(record.id_str.clone()) {
                self.records.push(record.clone());
                fresh.push(record);
            }
        }
        fresh
    }

    pub fn is_new(&self, id_str: &str) -> bool {
        !self.seen.contains(id_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use crate::schema::PostRecord;

    fn record(id: &str) -> PostRecord {
        PostRecord {
            id_str: id.to_string(),
            ..PostRecord::default()
        }
    }

    #[test]
    fn inserting_twice_reports_new_once() {
        let mut store = RecordStore::new();
        assert_eq!(store.insert_batch([record("1")]).len(), 1);
        assert!(store.insert_batch([record("1")]).is_empty());
        assert_eq!(store.len(), 1);
        assert!(!store.is_new("1"));
        assert!(store.is_new("2"));
    }

    #[test]
    fn keeps_arrival_order_and_drops_in_batch_duplicates() {
        let mut store = RecordStore::new();
        store.insert_batch([record("b")]);
        let fresh = store.insert_batch([record("a"), record("b"), record("c"), record("a")]);

        let fresh_ids: Vec<_> = fresh.iter().map(|r| r.id_str.as_str()).collect();
        assert_eq!(fresh_ids, vec!["a", "c"]);
        let all_ids: Vec<_> = store.records().iter().map(|r| r.id_str.as_str()).collect();
        assert_eq!(all_ids, vec!["b", "a", "c"]);
    }
}

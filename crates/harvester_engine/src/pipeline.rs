use engine_logging::engine_trace;
use serde_json::Value;

use crate::normalize::Normalizer;
use crate::resolve::resolve;
use crate::schema::PostRecord;
use crate::store::RecordStore;

/// Resolver, normalizer and store chained for one payload at a time.
#[derive(Debug)]
pub struct Pipeline {
    normalizer: Normalizer,
    store: RecordStore,
}

impl Pipeline {
    pub fn new(normalizer: Normalizer, store: RecordStore) -> Self {
        Self { normalizer, store }
    }

    /// Runs one payload through the chain and returns the records it added.
    pub fn ingest(&mut self, payload: &Value) -> Vec<PostRecord> {
        let candidates = resolve(payload).into_iter().filter_map(|entry| {
            match self.normalizer.evaluate(&entry) {
                Ok(record) => Some(record),
                Err(rejection) => {
                    engine_trace!("Dropped entry {}: {}", entry.entry_id, rejection);
                    None
                }
            }
        });
        self.store.insert_batch(candidates)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

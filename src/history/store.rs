use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::history::storage::{KeyValueStore, StorageError};
use crate::history::types::{HistoryRecord, IdeaInput, HISTORY_CAPACITY, HISTORY_KEY, RECENT_LIMIT};

/// Bounded, newest-first list of past validations, mirrored into a
/// [`KeyValueStore`] slot after every mutation.
///
/// Invariant: `records.len() <= HISTORY_CAPACITY` after every operation.
pub struct HistoryStore<R> {
    storage: Arc<dyn KeyValueStore>,
    records: Vec<HistoryRecord<R>>,
}

impl<R> HistoryStore<R>
where
    R: Clone + Serialize + DeserializeOwned,
{
    /// Reads the persisted snapshot. Anything that is not a list (absent,
    /// malformed JSON, `null`, a number...) loads as empty history. Inside a
    /// list, entries that no longer decode are skipped one by one.
    ///
    /// If what was loaded differs from what was stored (skipped entries,
    /// over capacity, not a list) the cleaned list is written back.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let (mut records, mut dirty) = match storage.get(HISTORY_KEY) {
            Some(raw) => decode_snapshot::<R>(&raw),
            None => (Vec::new(), false),
        };

        if records.len() > HISTORY_CAPACITY {
            records.truncate(HISTORY_CAPACITY);
            dirty = true;
        }
        info!("History loaded: {} record(s)", records.len());

        let store = Self { storage, records };
        if dirty {
            store.persist();
        }
        store
    }

    pub fn append(&mut self, input: IdeaInput, result: R) -> HistoryRecord<R> {
        let now = chrono::Utc::now().timestamp_millis();
        // wall clock may step backwards; keep createdAt non-decreasing
        let created_at = match self.records.first() {
            Some(newest) => now.max(newest.created_at),
            None => now,
        };

        let record = HistoryRecord {
            id: Uuid::now_v7().to_string(),
            created_at,
            input,
            result,
        };

        self.records.insert(0, record.clone());
        self.records.truncate(HISTORY_CAPACITY);
        self.persist();

        record
    }

    pub fn list(&self, limit: usize) -> Vec<HistoryRecord<R>> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub fn recent(&self) -> Vec<HistoryRecord<R>> {
        self.list(RECENT_LIMIT)
    }

    pub fn get(&self, id: &str) -> Option<HistoryRecord<R>> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write failures are logged only. The in-memory list stays authoritative
    /// and the next mutation retries the write.
    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("Failed to persist history ({} record(s)): {}", self.records.len(), e);
        }
    }

    fn try_persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.records)?;
        self.storage.set(HISTORY_KEY, &json)
    }
}

/// Returns the decodable records and whether anything had to be dropped.
fn decode_snapshot<R: DeserializeOwned>(raw: &str) -> (Vec<HistoryRecord<R>>, bool) {
    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Discarding unreadable history snapshot: {}", e);
            return (Vec::new(), true);
        }
    };

    let total = entries.len();
    let records: Vec<HistoryRecord<R>> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<HistoryRecord<R>>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping history entry {} that no longer decodes: {}", i, e);
                None
            }
        })
        .collect();

    let dirty = records.len() != total;
    (records, dirty)
}

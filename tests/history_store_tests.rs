mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{critique, idea};
use reality_check::history::{
    HistoryRecord, HistoryStore, KeyValueStore, MemoryKeyValueStore, HISTORY_CAPACITY, HISTORY_KEY, RECENT_LIMIT,
};
use reality_check::services::validator::ValidationResult;

fn load(storage: &MemoryKeyValueStore) -> HistoryStore<ValidationResult> {
    HistoryStore::load(Arc::new(storage.clone()))
}

#[test]
fn test_append_is_bounded_newest_first() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);

    for i in 0..25 {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
        assert!(store.len() <= HISTORY_CAPACITY);
    }

    let records = store.list(100);
    assert_eq!(records.len(), 20);
    let titles: Vec<String> = records.iter().map(|r| r.input.title.clone()).collect();
    let expected: Vec<String> = (5..25).rev().map(|i| format!("idea {}", i)).collect();
    assert_eq!(titles, expected, "Exactly the 20 most recent, newest first");
}

#[test]
fn test_persisted_snapshot_mirrors_memory() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    for i in 0..22 {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }

    let raw = storage.get(HISTORY_KEY).expect("snapshot written");
    let persisted: Vec<HistoryRecord<ValidationResult>> = serde_json::from_str(&raw).expect("valid JSON list");
    assert_eq!(persisted, store.list(HISTORY_CAPACITY));
}

#[test]
fn test_append_returns_stored_record() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);

    let record = store.append(idea("pitch"), critique("verdict"));
    assert_eq!(record.input, idea("pitch"));
    assert_eq!(record.result, critique("verdict"));
    assert_eq!(store.get(&record.id), Some(record));
}

#[test]
fn test_list_respects_limit_without_mutation() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    for i in 0..10 {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }

    assert_eq!(store.list(3).len(), 3);
    assert_eq!(store.list(0).len(), 0);
    assert_eq!(store.recent().len(), RECENT_LIMIT);
    assert_eq!(store.list(3)[0].input.title, "idea 9");
    assert_eq!(store.len(), 10, "Reads never mutate");
}

#[test]
fn test_get_unknown_id_is_none() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    store.append(idea("pitch"), critique("verdict"));
    assert!(store.get("missing").is_none());
}

#[test]
fn test_evicted_records_are_gone() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    let oldest = store.append(idea("oldest"), critique("verdict"));
    for i in 0..HISTORY_CAPACITY {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }
    assert!(store.get(&oldest.id).is_none());
}

#[test]
fn test_ids_unique_and_timestamps_non_decreasing() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    for i in 0..HISTORY_CAPACITY {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }

    let records = store.list(HISTORY_CAPACITY);
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), records.len());

    // newest first => created_at non-increasing along the list
    for pair in records.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn test_clear_then_load_is_empty() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    store.append(idea("pitch"), critique("verdict"));
    store.clear();
    assert!(store.is_empty());

    let reloaded = load(&storage);
    assert!(reloaded.is_empty());
}

#[test]
fn test_reload_preserves_order() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    for i in 0..5 {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }

    let reloaded = load(&storage);
    assert_eq!(reloaded.list(20), store.list(20));
}

#[test]
fn test_load_absent_is_empty() {
    let storage = MemoryKeyValueStore::new();
    assert!(load(&storage).is_empty());
}

#[test]
fn test_load_garbage_is_empty() {
    for garbage in ["not json at all", "42", "null", "{\"id\":\"x\"}", "\"a string\"", ""] {
        let storage = MemoryKeyValueStore::new();
        storage.set(HISTORY_KEY, garbage).unwrap();

        let mut store = load(&storage);
        assert!(store.is_empty(), "Persisted value {:?} must load as empty history", garbage);
        assert_eq!(
            storage.get(HISTORY_KEY).as_deref(),
            Some("[]"),
            "Unreadable value {:?} is replaced right after load",
            garbage
        );

        // Corruption never blocks new writes
        store.append(idea("pitch"), critique("verdict"));
        assert_eq!(store.len(), 1);
    }
}

#[test]
fn test_load_truncates_oversized_snapshot() {
    let storage = MemoryKeyValueStore::new();
    let records: Vec<HistoryRecord<ValidationResult>> = (0..30)
        .map(|i| HistoryRecord {
            id: format!("id-{}", i),
            created_at: 1_700_000_000_000 - i as i64,
            input: idea(&format!("idea {}", i)),
            result: critique("verdict"),
        })
        .collect();
    storage.set(HISTORY_KEY, &serde_json::to_string(&records).unwrap()).unwrap();

    let store = load(&storage);
    assert_eq!(store.len(), HISTORY_CAPACITY);
    assert_eq!(store.list(1)[0].id, "id-0");

    let raw = storage.get(HISTORY_KEY).unwrap();
    let persisted: Vec<HistoryRecord<ValidationResult>> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, store.list(HISTORY_CAPACITY), "Truncated list is written back on load");
}

#[test]
fn test_load_skips_only_undecodable_entries() {
    let storage = MemoryKeyValueStore::new();
    let mut store = load(&storage);
    for i in 0..5 {
        store.append(idea(&format!("idea {}", i)), critique("verdict"));
    }

    // one record written by an older schema, missing a field
    let mut entries: Vec<serde_json::Value> = serde_json::from_str(&storage.get(HISTORY_KEY).unwrap()).unwrap();
    let broken_id = entries[2]["id"].as_str().unwrap().to_string();
    entries[2]["result"].as_object_mut().unwrap().remove("roadmap");
    entries.push(serde_json::json!({"broken": true}));
    storage.set(HISTORY_KEY, &serde_json::to_string(&entries).unwrap()).unwrap();

    let mut reloaded = load(&storage);
    assert_eq!(reloaded.len(), 4, "Good records survive a bad neighbour");
    assert!(reloaded.get(&broken_id).is_none());

    reloaded.append(idea("after reload"), critique("verdict"));
    let persisted: Vec<HistoryRecord<ValidationResult>> =
        serde_json::from_str(&storage.get(HISTORY_KEY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 5);
    assert_eq!(persisted, reloaded.list(HISTORY_CAPACITY));
}

#[test]
fn test_clean_load_does_not_rewrite() {
    let storage = MemoryKeyValueStore::new();
    let raw = "[ ]";
    storage.set(HISTORY_KEY, raw).unwrap();
    assert!(load(&storage).is_empty());
    assert_eq!(storage.get(HISTORY_KEY).as_deref(), Some(raw));

    let empty = MemoryKeyValueStore::new();
    assert!(load(&empty).is_empty());
    assert!(empty.get(HISTORY_KEY).is_none(), "Nothing stored, nothing written");
}

#[test]
fn test_loads_snapshot_written_by_web_client() {
    let raw = r#"[{
        "id": "lq3k9x_ab12cd34",
        "createdAt": 1700000000000,
        "input": {"title": "Hot sauce box", "description": "d", "targetAudience": "a", "revenueModel": "r"},
        "result": {
            "overallVerdict": "Doomed",
            "brutalHonestyScore": 88,
            "breakdown": "b",
            "risks": [],
            "assumptions": [],
            "competitors": [],
            "revenueStressTest": {"scenarios": "s", "unitEconomicsWarning": "u"},
            "roadmap": [{"phase": "p", "actions": ["x"], "survivalMetric": "m"}]
        }
    }]"#;
    let storage = MemoryKeyValueStore::new();
    storage.set(HISTORY_KEY, raw).unwrap();

    let store = load(&storage);
    let record = store.get("lq3k9x_ab12cd34").expect("record loaded");
    assert_eq!(record.input.target_audience, "a");
    assert_eq!(record.result.brutal_honesty_score, 88.0);
}

#[test]
fn test_payload_is_opaque() {
    // Any serializable payload works; the store never looks inside
    let storage = MemoryKeyValueStore::new();
    let mut store: HistoryStore<serde_json::Value> = HistoryStore::load(Arc::new(storage.clone()));
    let record = store.append(idea("pitch"), serde_json::json!({"anything": [1, 2, 3]}));

    let reloaded: HistoryStore<serde_json::Value> = HistoryStore::load(Arc::new(storage));
    assert_eq!(reloaded.get(&record.id).unwrap().result["anything"][2], 3);
}

use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DB_FILE: &str = "staffdesk.sqlite3";

/// Durable key-value medium for store snapshots. Neither call fails from
/// the caller's side: storage problems are logged and the call degrades to
/// "nothing stored" / "nothing written".
pub trait SlotStorage {
    fn load(&self, key: &str) -> Option<serde_json::Value>;
    fn save(&self, key: &str, snapshot: &serde_json::Value);
}

/// Used before any workspace is selected.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSlots;

impl SlotStorage for DetachedSlots {
    fn load(&self, _key: &str) -> Option<serde_json::Value> {
        None
    }

    fn save(&self, _key: &str, _snapshot: &serde_json::Value) {}
}

/// In-process slots for unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text as-is, bypassing serialization.
    pub fn put_raw(&self, key: &str, text: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
    }
}

#[cfg(test)]
impl SlotStorage for MemorySlots {
    fn load(&self, key: &str) -> Option<serde_json::Value> {
        let slots = self.slots.borrow();
        let text = slots.get(key)?;
        parse_slot(key, text)
    }

    fn save(&self, key: &str, snapshot: &serde_json::Value) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), snapshot.to_string());
    }
}

pub struct SqliteSlots {
    path: PathBuf,
    conn: Connection,
}

impl SqliteSlots {
    pub fn open(workspace: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(workspace).with_context(|| {
            format!(
                "failed to create workspace {}",
                workspace.to_string_lossy()
            )
        })?;
        let path = workspace.join(DB_FILE);
        let conn = Connection::open(&path)
            .with_context(|| format!("failed to open {}", path.to_string_lossy()))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS store_slots(
                key TEXT PRIMARY KEY,
                snapshot TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { path, conn })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, key: &str, text: &str) -> rusqlite::Result<usize> {
        self.conn.execute(
            "INSERT INTO store_slots(key, snapshot, updated_at) VALUES(?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
               snapshot = excluded.snapshot,
               updated_at = excluded.updated_at",
            (key, text, chrono::Utc::now().to_rfc3339()),
        )
    }
}

impl SlotStorage for SqliteSlots {
    fn load(&self, key: &str) -> Option<serde_json::Value> {
        let text: Option<String> = match self
            .conn
            .query_row(
                "SELECT snapshot FROM store_slots WHERE key = ?",
                [key],
                |r| r.get(0),
            )
            .optional()
        {
            Ok(v) => v,
            Err(e) => {
                log::error!("failed to read slot {}: {}", key, e);
                return None;
            }
        };
        parse_slot(key, &text?)
    }

    fn save(&self, key: &str, snapshot: &serde_json::Value) {
        if let Err(e) = self.write(key, &snapshot.to_string()) {
            log::error!("failed to write slot {}: {}", key, e);
        }
    }
}

fn parse_slot(key: &str, text: &str) -> Option<serde_json::Value> {
    match serde_json::from_str(text) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("slot {} is not valid JSON, ignoring it: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    fn sample_snapshot() -> serde_json::Value {
        json!({
            "teachers": [
                { "id": "1", "salary": 75000.0, "subjects": ["Mathematics"], "active": true },
                { "id": "2", "salary": 68000, "nested": { "a": [1, 2.5, null] } }
            ]
        })
    }

    fn fractional_salaries() -> serde_json::Value {
        let rows: Vec<_> = (1..5000)
            .map(|n| json!({ "id": n.to_string(), "salary": n as f64 / 7.0 + 0.1, "rating": n as f64 / 1000.0 }))
            .collect();
        json!({ "teachers": rows })
    }

    #[test]
    fn detached_slots_store_nothing() {
        let slots = DetachedSlots;
        slots.save("teacher-store", &sample_snapshot());
        assert!(slots.load("teacher-store").is_none());
    }

    #[test]
    fn memory_slots_round_trip() {
        let slots = MemorySlots::new();
        let snapshot = sample_snapshot();
        slots.save("teacher-store", &snapshot);
        assert_eq!(slots.load("teacher-store"), Some(snapshot));
        assert!(slots.load("ui-store").is_none());
    }

    #[test]
    fn fractional_values_load_back_bit_for_bit() {
        let slots = MemorySlots::new();
        let snapshot = fractional_salaries();
        slots.save("teacher-store", &snapshot);
        assert_eq!(slots.load("teacher-store"), Some(snapshot));
    }

    #[test]
    fn memory_slots_ignore_invalid_json() {
        let slots = MemorySlots::new();
        slots.put_raw("ui-store", "{not json");
        assert!(slots.load("ui-store").is_none());
    }

    #[test]
    fn sqlite_slots_round_trip_and_overwrite() {
        let workspace = temp_dir("staffdesk-slots");
        let slots = SqliteSlots::open(&workspace).expect("open slots");
        assert!(slots.path().ends_with(DB_FILE));

        let first = sample_snapshot();
        slots.save("attendance-store", &first);
        assert_eq!(slots.load("attendance-store"), Some(first));

        let second = json!({ "attendance": [], "leaveRequests": [] });
        slots.save("attendance-store", &second);
        assert_eq!(slots.load("attendance-store"), Some(second.clone()));

        let salaries = fractional_salaries();
        slots.save("teacher-store", &salaries);

        drop(slots);
        let reopened = SqliteSlots::open(&workspace).expect("reopen slots");
        assert_eq!(reopened.load("attendance-store"), Some(second));
        assert_eq!(reopened.load("teacher-store"), Some(salaries));

        let _ = std::fs::remove_dir_all(workspace);
    }
}

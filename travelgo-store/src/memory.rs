use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use travelgo_core::record::ScanPredicate;
use travelgo_core::{RecordStore, StoreError};

type Tables = HashMap<String, HashMap<String, Value>>;

/// HashMap-backed record store for development mode and tests. Same contract
/// as the Redis backend, no durability.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.lock().get(table).and_then(|t| t.get(key)).cloned())
    }

    async fn put(&self, table: &str, key: &str, record: Value) -> Result<(), StoreError> {
        self.lock()
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    async fn update_increment(
        &self,
        table: &str,
        key: &str,
        field: &str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        let mut tables = self.lock();
        let missing = || StoreError::MissingRecord {
            table: table.to_string(),
            key: key.to_string(),
        };
        let record = tables
            .get_mut(table)
            .and_then(|t| t.get_mut(key))
            .ok_or_else(missing)?;
        let fields = record.as_object_mut().ok_or_else(missing)?;
        let next = fields.get(field).and_then(Value::as_i64).unwrap_or(0) + delta;
        fields.insert(field.to_string(), Value::from(next));
        Ok(next)
    }

    async fn scan(&self, table: &str, predicate: ScanPredicate<'_>) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .lock()
            .get(table)
            .map(|t| t.values().filter(|v| predicate(v)).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = MemoryStore::new();
        store
            .put("users", "a@example.com", json!({"email": "a@example.com", "logins": 0}))
            .await
            .unwrap();

        let record = store.get("users", "a@example.com").await.unwrap().unwrap();
        assert_eq!(record["email"], "a@example.com");
        assert!(store.get("users", "b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_increment() {
        let store = MemoryStore::new();
        store
            .put("users", "a@example.com", json!({"email": "a@example.com", "logins": 1}))
            .await
            .unwrap();

        let updated = store
            .update_increment("users", "a@example.com", "logins", 1)
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let err = store.update_increment("users", "ghost", "logins", 1).await;
        assert!(matches!(err, Err(StoreError::MissingRecord { .. })));
    }

    #[tokio::test]
    async fn test_scan_filters() {
        let store = MemoryStore::new();
        store.put("bookings", "1", json!({"email": "a@example.com"})).await.unwrap();
        store.put("bookings", "2", json!({"email": "b@example.com"})).await.unwrap();

        let mine = store
            .scan("bookings", &|record| {
                record.get("email").and_then(|v| v.as_str()) == Some("a@example.com")
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);

        let none = store.scan("services", &|_| true).await.unwrap();
        assert!(none.is_empty());
    }
}

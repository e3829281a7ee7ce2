use async_trait::async_trait;
use serde_json::Value;

/// Logical table names in the record store.
pub mod tables {
    /// Users, keyed by email.
    pub const USERS: &str = "users";
    /// Persisted bookings, keyed by booking id; also scanned by email.
    pub const BOOKINGS: &str = "bookings";
    /// Inventory items, keyed by service id; filtered by scan.
    pub const SERVICES: &str = "services";
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("record not found: {table}:{key}")]
    MissingRecord { table: String, key: String },

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client-side filter applied to scanned records.
pub type ScanPredicate<'a> = &'a (dyn Fn(&Value) -> bool + Sync);

/// Keyed document storage: point lookups, full overwrites by key, one atomic
/// numeric field increment, and equality-filtered full-table scans. Scans make
/// no ordering or pagination promises. Backends live in `travelgo-store`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or full overwrite by key.
    async fn put(&self, table: &str, key: &str, record: Value) -> Result<(), StoreError>;

    /// Atomically adds `delta` to a numeric field of an existing record and
    /// returns the new value. Missing records are an error, not an upsert.
    async fn update_increment(
        &self,
        table: &str,
        key: &str,
        field: &str,
        delta: i64,
    ) -> Result<i64, StoreError>;

    async fn scan(&self, table: &str, predicate: ScanPredicate<'_>) -> Result<Vec<Value>, StoreError>;
}

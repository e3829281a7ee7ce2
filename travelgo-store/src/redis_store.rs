use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use serde_json::Value;
use tracing::debug;
use travelgo_core::record::ScanPredicate;
use travelgo_core::{RecordStore, StoreError};

/// Redis-backed record store. Each logical table is a key prefix; records are
/// JSON documents stored as plain string values.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

fn backend_err(err: redis::RedisError) -> StoreError {
    StoreError::Backend(err.to_string())
}

impl RedisStore {
    pub async fn new(connection_string: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(connection_string).map_err(backend_err)?;
        // Fail fast on an unreachable server instead of at the first request.
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend_err)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        Ok(Self { client })
    }

    async fn conn(&self) -> Result<MultiplexedConnection, StoreError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend_err)
    }

    fn record_key(table: &str, key: &str) -> String {
        format!("{}:{}", table, key)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, table: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::record_key(table, key))
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, table: &str, key: &str, record: Value) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let raw = serde_json::to_string(&record)?;
        let _: () = redis::cmd("SET")
            .arg(Self::record_key(table, key))
            .arg(raw)
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        debug!(table, key, "record stored");
        Ok(())
    }

    async fn update_increment(
        &self,
        table: &str,
        key: &str,
        field: &str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        let mut conn = self.conn().await?;
        // The cjson round-trip keeps the increment atomic server-side.
        let script = redis::Script::new(
            r#"
            local raw = redis.call("GET", KEYS[1])
            if not raw then return nil end
            local doc = cjson.decode(raw)
            doc[ARGV[1]] = (tonumber(doc[ARGV[1]]) or 0) + tonumber(ARGV[2])
            redis.call("SET", KEYS[1], cjson.encode(doc))
            return doc[ARGV[1]]
            "#,
        );
        let updated: Option<i64> = script
            .key(Self::record_key(table, key))
            .arg(field)
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(backend_err)?;
        updated.ok_or_else(|| StoreError::MissingRecord {
            table: table.to_string(),
            key: key.to_string(),
        })
    }

    async fn scan(&self, table: &str, predicate: ScanPredicate<'_>) -> Result<Vec<Value>, StoreError> {
        let mut conn = self.conn().await?;
        let pattern = format!("{}:*", table);

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(backend_err)?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        let mut records = Vec::new();
        for key in keys {
            let raw: Option<String> = redis::cmd("GET")
                .arg(&key)
                .query_async(&mut conn)
                .await
                .map_err(backend_err)?;
            if let Some(raw) = raw {
                let record: Value = serde_json::from_str(&raw)?;
                if predicate(&record) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }
}

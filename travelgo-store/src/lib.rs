pub mod app_config;
pub mod memory;
pub mod redis_store;
pub mod seed;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

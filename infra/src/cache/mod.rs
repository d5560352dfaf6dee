//! Cache module - Redis implementation of the expiring key-value store

mod redis_store;

pub use redis_store::RedisStore;

/// Record store entities.
pub mod models;
/// Record store trait, in-memory backend, and question seeding.
pub mod record_store;
/// Storage error types shared by all backends.
pub mod storage;

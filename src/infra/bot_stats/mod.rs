// Implementations for the usage counters.

pub mod in_memory;
pub mod sqlite_store;

pub use in_memory::InMemoryStatsStore;
pub use sqlite_store::SqliteStatsStore;

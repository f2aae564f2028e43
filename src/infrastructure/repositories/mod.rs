pub mod memory_store;
pub mod sqlite;

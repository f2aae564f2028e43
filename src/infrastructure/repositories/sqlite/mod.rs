pub mod connection;
pub mod error;
pub mod kv_store;

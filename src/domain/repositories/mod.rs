// src/domain/repositories/mod.rs
pub mod remote;
pub mod store;

pub mod di;
pub mod http;
pub mod json;
pub mod repositories;

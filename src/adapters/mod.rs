//! Infrastructure adapters for external systems.

pub mod detection;
pub mod http;
pub mod photos;

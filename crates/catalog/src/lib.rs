//! Catalog service: one shared mapping store and document forest behind an
//! HTTP API.

pub mod catalog;
pub mod config;
pub mod error;
pub mod seed;
pub mod server;
pub mod storage;
pub mod view;

pub use crate::catalog::Catalog;
pub use crate::config::CatalogConfig;
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::storage::JsonFileBackend;

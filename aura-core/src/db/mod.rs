//! Database layer for aura
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - A keyed value store that holds the JSON entry collection

pub mod repo;
pub mod schema;

pub use repo::Database;

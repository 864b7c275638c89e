//! # aura-core
//!
//! Core library for aura - a mood journal with statistical insights.
//!
//! This library provides:
//! - Domain types for journal entries
//! - Keyed entry storage over SQLite
//! - The analytics engine (patterns, confidence, forecasts, correlations)
//! - Client for the remote aura report
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way:
//! - **Entries:** stored newest first under one key
//! - **Primitives:** mean, variance, Pearson, least squares ([`analytics::stats`])
//! - **Derived:** insights recomputed from the full history on every call, never stored
//!
//! ## Example
//!
//! ```rust,no_run
//! use aura_core::{Config, Database, EntryStore, KeyedEntryStore};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let store = KeyedEntryStore::new(&db, config.storage.key.clone());
//! let entries = store.load();
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{create_default_engine, AnalyticsContext, AnalyticsEngine, Insight};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use report::{AnalysisResponse, AuraReportClient};
pub use store::{EntryStore, KeyedEntryStore};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod store;
pub mod types;

//! Remote aura report
//!
//! The natural-language report is produced by an external analysis service.
//! This module only ships the entry collection there and hands back the
//! response; it never retries or caches.

pub mod client;

pub use client::{AnalysisRequest, AnalysisResponse, AuraReportClient};

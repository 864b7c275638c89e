//! HTTP client for the pattern analysis service

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::types::Entry;

/// Body of POST /api/v1/analyze-patterns
#[derive(Debug, Serialize)]
pub struct AnalysisRequest<'a> {
    pub entries: &'a [Entry],
}

/// Response from POST /api/v1/analyze-patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Free-form report text
    pub analysis: String,
    /// Kind of analysis the service ran (e.g. "standard")
    #[serde(default)]
    pub analysis_type: Option<String>,
    /// Number of entries the service looked at
    pub entries_analyzed: usize,
}

/// HTTP client for the analysis service
pub struct AuraReportClient {
    http_client: reqwest::Client,
    base_url: String,
    min_entries: usize,
}

impl AuraReportClient {
    /// Create a new report client from configuration
    pub fn new(config: &ReportConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            min_entries: config.min_entries,
        })
    }

    /// Endpoint the entries are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/analyze-patterns", self.base_url)
    }

    /// Send the full entry collection for analysis.
    ///
    /// Fails without a request when fewer than `min_entries` entries exist.
    /// A non-2xx response fails with the response's status text.
    pub async fn analyze_patterns(&self, entries: &[Entry]) -> Result<AnalysisResponse> {
        if entries.len() < self.min_entries {
            return Err(Error::InsufficientEntries {
                required: self.min_entries,
                actual: entries.len(),
            });
        }

        let url = self.endpoint();
        tracing::info!(url = %url, entries = entries.len(), "Requesting aura report");

        let response = self
            .http_client
            .post(&url)
            .json(&AnalysisRequest { entries })
            .send()
            .await
            .map_err(|e| Error::Report(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            tracing::warn!(status = %status, "Aura report request failed");
            return Err(Error::Report(format!("Analysis failed: {}", status_text)));
        }

        let result: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| Error::Report(format!("failed to parse response: {}", e)))?;

        tracing::debug!(
            entries_analyzed = result.entries_analyzed,
            analysis_type = ?result.analysis_type,
            "Aura report received"
        );
        Ok(result)
    }
}

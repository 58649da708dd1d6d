use crate::config::{ConfigDescriptor, Finding, Severity};
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for the generated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Version of the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Path the descriptor was loaded from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,

    /// Crate version that produced the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_version: Option<String>,
}

/// Counts summarizing the resolved descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCounts {
    pub content_globs: usize,
    pub categories: usize,
    pub tokens_extended: usize,
    pub tokens_resolved: usize,
    pub plugins: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Summary of a loaded descriptor after merging into the default theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Metadata about the resolution
    pub metadata: ReportMetadata,

    /// Content globs, verbatim
    pub content: Vec<String>,

    /// Extended token names per category, in declaration order
    pub extended_tokens: IndexMap<String, Vec<String>>,

    /// Plugin references, verbatim
    pub plugins: Vec<String>,

    /// Counts for quick inspection
    pub counts: ReportCounts,

    /// Validation findings, empty when the descriptor is clean
    pub findings: Vec<Finding>,
}

impl ResolutionReport {
    /// Convert the report to a JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert the report to a pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert the report to a compact JSON string
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Builder assembling a report from a descriptor and merged theme
pub struct ReportBuilder {
    config_path: Option<String>,
    findings: Vec<Finding>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            config_path: None,
            findings: Vec::new(),
        }
    }

    /// Record where the descriptor came from
    pub fn with_config_path(mut self, path: String) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Attach validation findings
    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    /// Build the report from a descriptor and the theme it merged into
    pub fn build(self, descriptor: &ConfigDescriptor, merged: &Theme) -> ResolutionReport {
        let mut extended_tokens = IndexMap::new();
        let mut tokens_extended = 0;
        for (category, tokens) in &descriptor.theme.extend {
            let names: Vec<String> = tokens.keys().cloned().collect();
            tokens_extended += names.len();
            extended_tokens.insert(category.clone(), names);
        }

        let errors = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = self.findings.len() - errors;

        ResolutionReport {
            metadata: ReportMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                config_path: self.config_path,
                resolver_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            content: descriptor.content.clone(),
            extended_tokens,
            plugins: descriptor.plugins.clone(),
            counts: ReportCounts {
                content_globs: descriptor.content.len(),
                categories: descriptor.theme.extend.len(),
                tokens_extended,
                tokens_resolved: merged.token_count(),
                plugins: descriptor.plugins.len(),
                errors,
                warnings,
            },
            findings: self.findings,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

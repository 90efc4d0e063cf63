//! Scan request parsing
//!
//! Parses the JSON request an inference pipeline sends on stdin.

use serde::Deserialize;

/// A request to scan one input before it reaches the model
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// The text to evaluate
    pub input: String,

    /// Optional session identifier, echoed into the audit log
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ScanRequest {
    /// Parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Wrap plain text as a request (CLI --raw mode)
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: text.into(),
            session_id: None,
        }
    }

    /// Get a truncated summary of the input for logging
    pub fn summary(&self) -> String {
        const MAX: usize = 100;
        let mut summary: String = self.input.chars().take(MAX).collect();
        if self.input.chars().count() > MAX {
            summary.push_str("...");
        }
        summary
    }
}

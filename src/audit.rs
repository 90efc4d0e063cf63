//! JSONL audit logging for prompt-gate
//!
//! Records every verdict to a JSONL file for later analysis. The gate
//! itself does no I/O; the audit logger is the observer the CLI wires in.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::request::ScanRequest;
use crate::verdict::Verdict;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Flagged,
    Disabled,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the verdict
    pub timestamp: DateTime<Utc>,

    /// Log level (ALLOWED, BLOCKED, FLAGGED, DISABLED)
    pub level: LogLevel,

    /// Rule ID that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Truncated copy of the scanned input
    pub input_summary: String,

    /// Reason for the verdict (absent for plain allows)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from a request and verdict
    pub fn new(request: &ScanRequest, verdict: &Verdict, disabled: bool, warn_only: bool) -> Self {
        let level = if disabled {
            LogLevel::Disabled
        } else {
            match verdict {
                Verdict::Allowed => LogLevel::Allowed,
                Verdict::Blocked { .. } if warn_only => LogLevel::Flagged,
                Verdict::Blocked { .. } => LogLevel::Blocked,
            }
        };

        Self {
            timestamp: Utc::now(),
            level,
            rule_id: verdict.rule_id().map(String::from),
            input_summary: request.summary(),
            reason: verdict.reason().map(String::from),
            session_id: request.session_id.clone(),
        }
    }
}

/// Audit logger
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            // Ensure parent directory exists
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a verdict
    pub fn log_verdict(
        &mut self,
        request: &ScanRequest,
        verdict: &Verdict,
        disabled: bool,
        warn_only: bool,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(request, verdict, disabled, warn_only);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

/// Create a disabled logger (for when audit logging is off)
impl Default for AuditLogger {
    fn default() -> Self {
        Self { writer: None }
    }
}

//! Verdict type and JSON response formatting
//!
//! The gate produces a [`Verdict`]; the CLI wraps it in a [`GateResponse`]
//! for the JSON surface consumed by the inference pipeline.

use serde::Serialize;

/// Reason string used when the length threshold is breached
pub const LENGTH_REASON: &str = "input exceeds maximum length";

/// Rule id reported for a length breach
pub const LENGTH_RULE_ID: &str = "max-length";

/// Outcome of evaluating an input against the rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Input passed all checks
    Allowed,

    /// Input matched a rule or breached the length threshold
    Blocked { rule_id: String, reason: String },
}

impl Verdict {
    /// Create a blocked verdict for a matched rule
    pub fn matched(rule_id: impl Into<String>) -> Self {
        let rule_id = rule_id.into();
        let reason = format!("matched rule '{}'", rule_id);
        Verdict::Blocked { rule_id, reason }
    }

    /// Create a blocked verdict for an over-length input
    pub fn too_long() -> Self {
        Verdict::Blocked {
            rule_id: LENGTH_RULE_ID.to_string(),
            reason: LENGTH_REASON.to_string(),
        }
    }

    /// Check if this is an allowed verdict
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    /// Check if this is a blocked verdict
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked { .. })
    }

    /// Get the rule ID if applicable
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Verdict::Allowed => None,
            Verdict::Blocked { rule_id, .. } => Some(rule_id),
        }
    }

    /// Get the reason if applicable
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Allowed => None,
            Verdict::Blocked { reason, .. } => Some(reason),
        }
    }
}

/// JSON response written to stdout by the CLI
#[derive(Debug, Serialize)]
pub struct GateResponse {
    /// "allowed" or "blocked"
    pub verdict: &'static str,

    /// Rule that matched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Reason for the verdict, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GateResponse {
    /// Plain allow response
    pub fn allowed() -> Self {
        GateResponse {
            verdict: "allowed",
            rule_id: None,
            reason: None,
            message: None,
        }
    }

    /// Allow response with an explanatory message (disabled mode)
    pub fn allowed_with_message(message: impl Into<String>) -> Self {
        GateResponse {
            message: Some(message.into()),
            ..GateResponse::allowed()
        }
    }

    /// Block response
    pub fn blocked(rule_id: &str, reason: &str) -> Self {
        GateResponse {
            verdict: "blocked",
            rule_id: Some(rule_id.to_string()),
            reason: Some(reason.to_string()),
            message: Some(format!("[prompt-gate:{}] blocked: {}", rule_id, reason)),
        }
    }

    /// Allow response that carries a warning (warn-only / dry-run mode)
    pub fn flagged(rule_id: &str, reason: &str) -> Self {
        GateResponse {
            verdict: "allowed",
            rule_id: Some(rule_id.to_string()),
            reason: Some(reason.to_string()),
            message: Some(format!("[prompt-gate:{}] warning: {}", rule_id, reason)),
        }
    }

    /// Build a response from a verdict, honoring warn-only mode
    pub fn from_verdict(verdict: &Verdict, warn_only: bool) -> Self {
        match verdict {
            Verdict::Allowed => GateResponse::allowed(),
            Verdict::Blocked { rule_id, reason } if warn_only => {
                GateResponse::flagged(rule_id, reason)
            }
            Verdict::Blocked { rule_id, reason } => GateResponse::blocked(rule_id, reason),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"verdict":"blocked"}"#.to_string())
    }
}

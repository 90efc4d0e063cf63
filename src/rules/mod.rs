//! Rule definitions for prompt-gate
//!
//! Defines the injection-detection rule type, the built-in pattern catalog,
//! and allowlist overrides.

pub mod allowlist;
pub mod builtin;

use crate::config::Tier;

/// An injection-detection rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Identifier, a lowercase phrase naming what the rule detects
    pub id: &'static str,

    /// Tier at which this rule is active
    pub tier: Tier,

    /// Regex pattern to match (compiled case-insensitively)
    pub pattern: &'static str,

    /// Human-readable note on what the pattern catches
    pub note: &'static str,
}

impl Rule {
    /// Create a new rule
    pub const fn new(
        id: &'static str,
        tier: Tier,
        pattern: &'static str,
        note: &'static str,
    ) -> Self {
        Self {
            id,
            tier,
            pattern,
            note,
        }
    }
}

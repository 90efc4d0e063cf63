//! Built-in injection patterns
//!
//! Defines the prompt-injection pattern catalog at the three tiers.
//! Rule order is load-bearing: the first matching rule names the verdict,
//! so the instruction-override patterns come before everything else.

use crate::config::Tier;
use crate::rules::Rule;

/// Critical tier rules - instruction override and prompt extraction
pub const CRITICAL_RULES: &[Rule] = &[
    Rule::new(
        "ignore previous instructions",
        Tier::Critical,
        r"ignore\s+(all\s+)?previous\s+instructions",
        "Attempts to cancel the instructions the model was given",
    ),
    Rule::new(
        "system prompt",
        Tier::Critical,
        r"system\s+prompt",
        "References the hidden system prompt",
    ),
    Rule::new(
        "you are now dan",
        Tier::Critical,
        r"you\s+are\s+now\s+dan\b",
        "Classic DAN persona jailbreak",
    ),
    Rule::new(
        "reveal your instructions",
        Tier::Critical,
        r"reveal\s+your\s+instructions",
        "Asks the model to disclose its instructions",
    ),
    Rule::new(
        "disregard prior instructions",
        Tier::Critical,
        r"disregard\s+(all\s+)?(prior|previous|above)\s+instructions",
        "Attempts to cancel the instructions the model was given",
    ),
    Rule::new(
        "forget your instructions",
        Tier::Critical,
        r"forget\s+(all\s+)?(your|previous)\s+instructions",
        "Attempts to cancel the instructions the model was given",
    ),
    Rule::new(
        "repeat your initial message",
        Tier::Critical,
        r"(repeat|print|output)\s+(your\s+)?(initial|first|original)\s+(message|instructions)",
        "Asks the model to echo back its hidden context",
    ),
];

/// High tier rules - jailbreak and role-play phrasing
pub const HIGH_RULES: &[Rule] = &[
    Rule::new(
        "ignore the above",
        Tier::High,
        r"ignore\s+(everything|the)\s+above",
        "Attempts to cancel preceding context",
    ),
    Rule::new(
        "you are now a",
        Tier::High,
        r"you\s+are\s+now\s+(a|an|my)\b",
        "Attempts to redefine the model's role",
    ),
    Rule::new(
        "pretend to be",
        Tier::High,
        r"pretend\s+(to\s+be|you\s+are)",
        "Role-play framing used to sidestep policy",
    ),
    Rule::new(
        "act as",
        Tier::High,
        r"\bact\s+as\s+(a|an|if|though)\b",
        "Role-play framing used to sidestep policy",
    ),
    Rule::new(
        "roleplay as",
        Tier::High,
        r"role\s*play\s+as\b",
        "Role-play framing used to sidestep policy",
    ),
    Rule::new(
        "developer mode",
        Tier::High,
        r"developer\s+mode",
        "Fictional unrestricted mode",
    ),
    Rule::new(
        "do anything now",
        Tier::High,
        r"do\s+anything\s+now",
        "DAN-style unrestricted persona",
    ),
    Rule::new(
        "jailbreak",
        Tier::High,
        r"\bjail\s*break",
        "Explicit jailbreak request",
    ),
    Rule::new(
        "disable safety",
        Tier::High,
        r"(disable|bypass|turn\s+off|remove)\s+(the\s+|all\s+|your\s+)?safety",
        "Asks to switch off safety behavior",
    ),
    Rule::new(
        "bypass content filter",
        Tier::High,
        r"(bypass|circumvent|evade)\s+(the\s+|your\s+)?(content\s+)?filter",
        "Asks to get around content filtering",
    ),
    Rule::new(
        "without any restrictions",
        Tier::High,
        r"without\s+(any\s+)?(restrictions|limitations|filters|censorship)",
        "Requests unrestricted output",
    ),
];

/// Strict tier rules - delimiter abuse and encoding evasion
pub const STRICT_RULES: &[Rule] = &[
    Rule::new(
        "system role tag",
        Tier::Strict,
        r"<\|?\s*/?\s*(system|im_start|im_end)\s*\|?>",
        "Injects a fake chat-template role tag",
    ),
    Rule::new(
        "inline system marker",
        Tier::Strict,
        r"\[\s*/?\s*(system|inst)\s*\]",
        "Injects a bracketed system/instruction marker",
    ),
    Rule::new(
        "chat role prefix",
        Tier::Strict,
        r"(?m)^\s*(system|assistant)\s*:",
        "Line styled as a system or assistant turn",
    ),
    Rule::new(
        "decode this base64",
        Tier::Strict,
        r"(decode|execute|run|follow)\s+(this|the\s+following)\s+base64",
        "Asks the model to act on an encoded payload",
    ),
    Rule::new(
        "base64 payload",
        Tier::Strict,
        r"[A-Za-z0-9+/]{48,}={1,2}",
        "Long base64 blob, a common smuggling channel",
    ),
    Rule::new(
        "hidden unicode",
        Tier::Strict,
        r"[\u{200b}\u{200c}\u{200d}\u{2060}\u{feff}]",
        "Zero-width characters used to split keywords",
    ),
];

/// Get all rules up to and including the specified tier
pub fn rules_for_tier(tier: Tier) -> Vec<&'static Rule> {
    CRITICAL_RULES
        .iter()
        .chain(HIGH_RULES.iter())
        .chain(STRICT_RULES.iter())
        .filter(|rule| tier.includes(rule.tier))
        .collect()
}

//! Configuration loading for prompt-gate
//!
//! Supports TOML configuration with embedded defaults. Invalid
//! configuration (unreadable file, bad TOML, bad regex) surfaces as a
//! [`ConfigError`] at load/construction time, never during evaluation.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Tier determines which built-in rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Only block instruction-override and prompt-extraction attempts
    Critical,

    /// Block critical + jailbreak/role-play phrasing
    #[default]
    High,

    /// Block all above + delimiter abuse and encoding evasion
    Strict,
}

impl Tier {
    /// Check if a rule tier is active under this gate tier
    pub fn includes(&self, rule_tier: Tier) -> bool {
        match self {
            Tier::Critical => rule_tier == Tier::Critical,
            Tier::High => rule_tier == Tier::Critical || rule_tier == Tier::High,
            Tier::Strict => true,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Tier::Critical),
            "high" => Some(Tier::High),
            "strict" => Some(Tier::Strict),
            _ => None,
        }
    }
}

/// Error raised by malformed configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Config or allowlist file could not be read
    Io(std::io::Error),

    /// Config or allowlist file is not valid TOML
    Parse(toml::de::Error),

    /// A rule or allowlist pattern is not a valid regex
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read configuration: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration: {}", e),
            ConfigError::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern '{}': {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidPattern { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Tier for built-in rule filtering
    pub tier: Tier,

    /// Also match against a leetspeak/whitespace-normalized copy of the input
    pub normalize: bool,

    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tier: Tier::High,
            normalize: true,
            audit_log: true,
            audit_path: Some("~/.config/prompt-gate/audit.jsonl".to_string()),
        }
    }
}

/// Rule configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Include the built-in pattern catalog
    pub use_builtin: bool,

    /// Extra patterns, evaluated after the built-ins in the order given.
    /// The pattern string doubles as the rule id.
    pub custom: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            use_builtin: true,
            custom: Vec::new(),
        }
    }
}

/// Override configuration section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OverrideConfig {
    /// Path to allowlist file
    pub allowlist_file: Option<String>,
}

fn default_max_length() -> usize {
    10_000
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,
    pub overrides: OverrideConfig,

    /// Maximum input length in characters before the gate blocks
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            rules: RulesConfig::default(),
            overrides: OverrideConfig::default(),
            max_length: default_max_length(),
        }
    }
}

impl Config {
    /// Load configuration from standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::home_dir().map(|p| p.join(".config/prompt-gate/config.toml")),
            Some(PathBuf::from("/etc/prompt-gate/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        self.general.audit_path.as_ref().map(|p| Self::expand_path(p))
    }

    /// Get the allowlist file path (expanded)
    pub fn allowlist_path(&self) -> Option<PathBuf> {
        self.overrides
            .allowlist_file
            .as_ref()
            .map(|p| Self::expand_path(p))
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
max_length = 10000

[general]
tier = "high"
normalize = true
audit_log = true
audit_path = "~/.config/prompt-gate/audit.jsonl"

[rules]
use_builtin = true
custom = []

[overrides]
allowlist_file = "~/.config/prompt-gate/allow.toml"
"#;

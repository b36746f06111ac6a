//! Audit configuration: rule catalog, marker term sets and thresholds.
//!
//! Every algorithmic component receives its slice of this structure explicitly;
//! the built-in values only exist as `Default` implementations.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// How a category rule pattern is matched against a note name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePatternKind {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive regular expression.
    Regex,
}

/// One `{pattern, label}` entry of the ordered category catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Pattern matched against the note display name.
    pub pattern: String,
    /// Category label assigned on match.
    pub label: String,
    /// Pattern interpretation.
    #[serde(default)]
    pub kind: RulePatternKind,
}

impl CategoryRule {
    /// Substring rule.
    #[must_use]
    pub fn substring(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
            kind: RulePatternKind::Substring,
        }
    }

    /// Regex rule.
    #[must_use]
    pub fn regex(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
            kind: RulePatternKind::Regex,
        }
    }
}

/// Content terms signalling obsolescence or currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Terms marking a note as outdated.
    pub outdated: Vec<String>,
    /// Terms marking a note as current.
    pub current: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            outdated: to_strings(&[
                "deprecated",
                "superseded",
                "obsolete",
                "outdated",
                "no longer used",
                "archived",
            ]),
            current: to_strings(&["active", "current", "latest", "up to date"]),
        }
    }
}

/// Lexical duplicate-name heuristic inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Case-sensitive filename substrings.
    pub name_markers: Vec<String>,
    /// Backup-file path suffixes.
    pub backup_suffixes: Vec<String>,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            name_markers: to_strings(&["CORRECTED", "OLD", "COPY", "backup"]),
            backup_suffixes: to_strings(&[".bak", ".backup", ".orig", "~"]),
        }
    }
}

/// Full audit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Ordered category catalog; first match wins.
    pub categories: Vec<CategoryRule>,
    /// Outdated/current content markers.
    pub markers: MarkerConfig,
    /// Duplicate-name heuristic markers.
    pub duplicates: DuplicateConfig,
    /// Notes older than this many days are stale.
    pub stale_after_days: u64,
    /// Minimum incoming + outgoing links for a hub.
    pub hub_threshold: usize,
    /// Let frontmatter `created`/`modified` keys override filesystem stats.
    pub prefer_frontmatter_timestamps: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            markers: MarkerConfig::default(),
            duplicates: DuplicateConfig::default(),
            stale_after_days: 30,
            hub_threshold: 10,
            prefer_frontmatter_timestamps: false,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::substring("brain init", "Brain Initialization"),
        CategoryRule::substring("critical", "Critical"),
        CategoryRule::substring("architecture", "Architecture"),
        CategoryRule::substring("protocol", "Protocols"),
        CategoryRule::substring("session", "Session Logs"),
        CategoryRule::substring("mcp", "MCP Integration"),
        CategoryRule::substring("obsidian", "Obsidian Integration"),
        CategoryRule::regex(r"\b(?:test|testing|validation)\b", "Testing"),
        CategoryRule::substring("index", "Indexes"),
        CategoryRule::regex(r"^readme$", "Readme"),
    ]
}

fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(&key) {
                    deep_merge(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

impl AuditConfig {
    /// Parse YAML and merge it over the defaults.
    ///
    /// Mappings merge key by key; sequences (such as `categories`) replace the
    /// default list as a whole so catalog order stays exactly as written.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let overlay: Value = serde_yaml::from_str(raw).map_err(|e| AuditError::ConfigParse {
            reason: e.to_string(),
        })?;
        let mut merged = serde_yaml::to_value(Self::default()).map_err(|e| {
            AuditError::ConfigParse {
                reason: e.to_string(),
            }
        })?;
        match overlay {
            Value::Null => {}
            Value::Mapping(_) => deep_merge(&mut merged, overlay),
            _ => {
                return Err(AuditError::ConfigParse {
                    reason: "top-level config must be a mapping".to_string(),
                });
            }
        }
        let config: Self = serde_yaml::from_value(merged).map_err(|e| AuditError::ConfigParse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file and merge it over the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("loaded audit config from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Reject configurations the classifier cannot run with.
    pub fn validate(&self) -> Result<()> {
        crate::classify::RuleCatalog::compile(&self.categories).map(|_| ())
    }
}

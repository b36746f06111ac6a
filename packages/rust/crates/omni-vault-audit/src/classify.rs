//! Ordered, first-match-wins category classification of note names.

use regex::{Regex, RegexBuilder};

use crate::config::{CategoryRule, RulePatternKind};
use crate::error::{AuditError, Result};

#[derive(Debug, Clone)]
enum CompiledPattern {
    Substring(String),
    Regex(Regex),
}

impl CompiledPattern {
    fn matches(&self, name: &str, name_lower: &str) -> bool {
        match self {
            Self::Substring(needle) => name_lower.contains(needle.as_str()),
            Self::Regex(re) => re.is_match(name),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: CompiledPattern,
    label: String,
}

/// Compiled category catalog. Rule order encodes priority.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<CompiledRule>,
}

impl RuleCatalog {
    /// Compile rules in the given order.
    ///
    /// Fails with [`AuditError::EmptyRuleCatalog`] for an empty list and
    /// [`AuditError::InvalidRulePattern`] for a blank substring or a regex
    /// that does not compile.
    pub fn compile(rules: &[CategoryRule]) -> Result<Self> {
        if rules.is_empty() {
            return Err(AuditError::EmptyRuleCatalog);
        }
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern = match rule.kind {
                RulePatternKind::Substring => {
                    let needle = rule.pattern.trim().to_lowercase();
                    if needle.is_empty() {
                        return Err(AuditError::InvalidRulePattern {
                            pattern: rule.pattern.clone(),
                            reason: "empty substring pattern".to_string(),
                        });
                    }
                    CompiledPattern::Substring(needle)
                }
                RulePatternKind::Regex => CompiledPattern::Regex(
                    RegexBuilder::new(&rule.pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| AuditError::InvalidRulePattern {
                            pattern: rule.pattern.clone(),
                            reason: e.to_string(),
                        })?,
                ),
            };
            compiled.push(CompiledRule {
                pattern,
                label: rule.label.clone(),
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Label of the first rule matching `name`, or `None` when uncategorized.
    #[must_use]
    pub fn classify(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(name, &name_lower))
            .map(|rule| rule.label.as_str())
    }

    /// Distinct labels in order of first appearance in the catalog.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !out.contains(&rule.label.as_str()) {
                out.push(rule.label.as_str());
            }
        }
        out
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a compiled catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Classify `name` against `catalog`.
#[must_use]
pub fn classify<'a>(name: &str, catalog: &'a RuleCatalog) -> Option<&'a str> {
    catalog.classify(name)
}

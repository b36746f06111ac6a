//! Error taxonomy for vault auditing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Audit errors.
///
/// `UnreadableNote` and `MalformedFrontmatter` are per-note conditions and never
/// abort a batch. The remaining variants are configuration errors raised before
/// any note is processed.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Content or stats could not be obtained for a note.
    #[error("unreadable note '{}': {reason}", path.display())]
    UnreadableNote {
        /// Note location.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// A leading frontmatter block is present but cannot be parsed.
    #[error("malformed frontmatter in '{}': {reason}", path.display())]
    MalformedFrontmatter {
        /// Note location.
        path: PathBuf,
        /// Parser failure.
        reason: String,
    },
    /// The classifier was configured with zero rules.
    #[error("category rule catalog is empty")]
    EmptyRuleCatalog,
    /// A category rule is a blank substring or a regex that does not compile.
    #[error("invalid category pattern '{pattern}': {reason}")]
    InvalidRulePattern {
        /// Offending pattern text.
        pattern: String,
        /// Regex compiler message, or why the substring was refused.
        reason: String,
    },
    /// Marker term set does not compile into a matcher.
    #[error("invalid marker terms: {reason}")]
    InvalidMarkerTerms {
        /// Regex compiler message.
        reason: String,
    },
    /// Config file could not be read.
    #[error("failed to read config '{}': {reason}", path.display())]
    ConfigRead {
        /// Config file location.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// Config payload is not valid YAML for `AuditConfig`.
    #[error("failed to parse config: {reason}")]
    ConfigParse {
        /// Deserializer message.
        reason: String,
    },
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Per-note failure class recorded in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Note excluded from aggregation.
    UnreadableNote,
    /// Note kept with empty metadata.
    MalformedFrontmatter,
}

impl AuditError {
    /// Per-note failure class, or `None` for configuration errors.
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::UnreadableNote { .. } => Some(FailureKind::UnreadableNote),
            Self::MalformedFrontmatter { .. } => Some(FailureKind::MalformedFrontmatter),
            _ => None,
        }
    }

    /// Note path for per-note errors.
    #[must_use]
    pub fn note_path(&self) -> Option<&PathBuf> {
        match self {
            Self::UnreadableNote { path, .. } | Self::MalformedFrontmatter { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

//! Per-note metadata flags: staleness, duplicate-name heuristic, content markers.

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{DuplicateConfig, MarkerConfig};
use crate::error::{AuditError, Result};
use crate::note::{NoteInput, contains_backup_suffix};

const SECONDS_PER_DAY: i64 = 86_400;

/// Derived per-note flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteFlags {
    /// Filename or path carries a copy/backup marker.
    pub is_duplicate_name_heuristic: bool,
    /// Content contains an obsolescence term.
    pub has_outdated_marker: bool,
    /// Content contains a currency term.
    pub has_current_marker: bool,
    /// Whole days since last modification.
    pub days_since_modified: u64,
}

impl NoteFlags {
    /// Actionable outdated signal; a currency marker wins over an outdated one.
    #[must_use]
    pub fn is_outdated(&self) -> bool {
        self.has_outdated_marker && !self.has_current_marker
    }

    /// Modified more than `stale_after_days` days ago.
    #[must_use]
    pub fn is_stale(&self, stale_after_days: u64) -> bool {
        self.days_since_modified > stale_after_days
    }
}

/// `floor((now - modified) / one day)`, clamped at zero for future timestamps.
#[must_use]
pub fn days_since(modified_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed = now.signed_duration_since(modified_at).num_seconds();
    u64::try_from(elapsed.div_euclid(SECONDS_PER_DAY)).unwrap_or(0)
}

fn compile_terms(terms: &[String]) -> Result<Option<Regex>> {
    let escaped: Vec<String> = terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }
    let pattern = format!("(?:{})", escaped.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| AuditError::InvalidMarkerTerms {
            reason: e.to_string(),
        })
}

/// Computes [`NoteFlags`] from content, path and timestamps.
#[derive(Debug, Clone)]
pub struct MetadataAnalyzer {
    outdated: Option<Regex>,
    current: Option<Regex>,
    duplicates: DuplicateConfig,
}

impl MetadataAnalyzer {
    /// Compile marker term sets into case-insensitive substring matchers.
    pub fn new(markers: &MarkerConfig, duplicates: &DuplicateConfig) -> Result<Self> {
        Ok(Self {
            outdated: compile_terms(&markers.outdated)?,
            current: compile_terms(&markers.current)?,
            duplicates: duplicates.clone(),
        })
    }

    /// Whether content contains any outdated term.
    #[must_use]
    pub fn has_outdated_marker(&self, content: &str) -> bool {
        self.outdated.as_ref().is_some_and(|re| re.is_match(content))
    }

    /// Whether content contains any currency term.
    #[must_use]
    pub fn has_current_marker(&self, content: &str) -> bool {
        self.current.as_ref().is_some_and(|re| re.is_match(content))
    }

    /// Lexical duplicate check: case-sensitive filename markers or a backup suffix.
    #[must_use]
    pub fn is_duplicate_name(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let marked = self
            .duplicates
            .name_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| file_name.contains(marker.as_str()));
        marked || contains_backup_suffix(path, &self.duplicates.backup_suffixes)
    }

    /// Flags for a note whose content and modification time are known.
    #[must_use]
    pub fn analyze(
        &self,
        path: &Path,
        content: &str,
        modified_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> NoteFlags {
        NoteFlags {
            is_duplicate_name_heuristic: self.is_duplicate_name(path),
            has_outdated_marker: self.has_outdated_marker(content),
            has_current_marker: self.has_current_marker(content),
            days_since_modified: days_since(modified_at, now),
        }
    }

    /// Flags straight from a collaborator input; unreadable inputs surface as errors.
    pub fn analyze_input(&self, input: &NoteInput, now: DateTime<Utc>) -> Result<NoteFlags> {
        match input {
            NoteInput::Loaded {
                path,
                content,
                stat,
            } => Ok(self.analyze(path, content, stat.modified_at, now)),
            NoteInput::Unreadable { path, reason } => Err(AuditError::UnreadableNote {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

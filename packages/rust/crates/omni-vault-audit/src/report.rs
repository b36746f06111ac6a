//! Audit aggregation: category groups, cross-cutting flag sections, failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::classify::RuleCatalog;
use crate::error::{AuditError, FailureKind};
use crate::graph::ConnectivityReport;
use crate::insights::{Insight, VaultStats};
use crate::metadata::NoteFlags;
use crate::note::NoteRecord;

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Report row for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    /// Display name.
    pub name: String,
    /// Note location.
    pub path: String,
    /// Category label.
    pub category: Option<String>,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Content length in bytes.
    pub size_bytes: u64,
    /// Frontmatter tags.
    pub tags: Vec<String>,
    /// Body word count.
    pub word_count: usize,
    /// Derived flags.
    pub flags: NoteFlags,
}

impl NoteSummary {
    /// Summary row for `record`.
    #[must_use]
    pub fn from_record(record: &NoteRecord) -> Self {
        let note = &record.note;
        Self {
            name: note.name.clone(),
            path: path_string(&note.path),
            category: record.category.clone(),
            modified_at: note.modified_at,
            created_at: note.created_at,
            size_bytes: note.size_bytes,
            tags: note.tags.clone(),
            word_count: note.word_count,
            flags: note.flags,
        }
    }
}

/// Notes sharing one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Category label.
    pub label: String,
    /// Notes, most recently modified first.
    pub notes: Vec<NoteSummary>,
}

/// Note that failed analysis or was recovered with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFailure {
    /// Note location.
    pub path: String,
    /// Failure class.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub message: String,
}

impl NoteFailure {
    /// Row for a per-note error; `None` for configuration errors.
    #[must_use]
    pub fn from_error(error: &AuditError) -> Option<Self> {
        Some(Self {
            path: path_string(error.note_path()?),
            kind: error.kind()?,
            message: error.to_string(),
        })
    }
}

/// Display name shared by more than one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCollision {
    /// Shared display name.
    pub name: String,
    /// Every note path carrying the name, in discovery order.
    pub paths: Vec<String>,
}

/// Category grouping plus the three cross-cutting flag sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedNotes {
    /// Non-empty groups in catalog order.
    pub categories: Vec<CategoryGroup>,
    /// Notes matching no rule (excluded from every section).
    pub uncategorized_count: usize,
    /// Categorized notes flagged by the duplicate-name heuristic.
    pub duplicates: Vec<NoteSummary>,
    /// Categorized notes with an outdated marker and no current marker.
    pub outdated: Vec<NoteSummary>,
    /// Categorized notes modified more than the stale threshold ago.
    pub stale: Vec<NoteSummary>,
}

fn sort_by_recency(rows: &mut [NoteSummary]) {
    rows.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Group categorized notes and partition them into flag sections.
///
/// A note may appear in several sections at once.
#[must_use]
pub fn aggregate(
    records: &[NoteRecord],
    catalog: &RuleCatalog,
    stale_after_days: u64,
) -> CategorizedNotes {
    let mut by_label: HashMap<&str, Vec<NoteSummary>> = HashMap::new();
    let mut out = CategorizedNotes::default();

    for record in records {
        let Some(label) = record.category.as_deref() else {
            out.uncategorized_count += 1;
            continue;
        };
        let summary = NoteSummary::from_record(record);
        let flags = record.note.flags;
        if flags.is_duplicate_name_heuristic {
            out.duplicates.push(summary.clone());
        }
        if flags.is_outdated() {
            out.outdated.push(summary.clone());
        }
        if flags.is_stale(stale_after_days) {
            out.stale.push(summary.clone());
        }
        by_label.entry(label).or_default().push(summary);
    }

    for label in catalog.labels() {
        let Some(mut notes) = by_label.remove(label) else {
            continue;
        };
        sort_by_recency(&mut notes);
        out.categories.push(CategoryGroup {
            label: label.to_string(),
            notes,
        });
    }
    sort_by_recency(&mut out.duplicates);
    sort_by_recency(&mut out.outdated);
    sort_by_recency(&mut out.stale);
    out
}

/// Display names carried by more than one note.
#[must_use]
pub fn find_name_collisions(records: &[NoteRecord]) -> Vec<NameCollision> {
    let mut order: Vec<&str> = Vec::new();
    let mut paths_by_name: HashMap<&str, Vec<String>> = HashMap::new();
    for record in records {
        let name = record.note.name.as_str();
        let paths = paths_by_name.entry(name).or_insert_with(|| {
            order.push(name);
            Vec::new()
        });
        paths.push(path_string(&record.note.path));
    }
    order
        .into_iter()
        .filter_map(|name| {
            let paths = paths_by_name.remove(name)?;
            (paths.len() > 1).then(|| NameCollision {
                name: name.to_string(),
                paths,
            })
        })
        .collect()
}

/// Complete structured audit result handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Analysis time all staleness values are relative to.
    pub generated_at: DateTime<Utc>,
    /// Category groups and flag sections.
    #[serde(flatten)]
    pub categorized: CategorizedNotes,
    /// Connectivity per note plus ranked hubs.
    pub connectivity: ConnectivityReport,
    /// Notes excluded because they could not be analyzed.
    pub failures: Vec<NoteFailure>,
    /// Notes kept after a recoverable problem.
    pub warnings: Vec<NoteFailure>,
    /// Display names shared by several notes.
    pub name_collisions: Vec<NameCollision>,
    /// Vault-wide counters.
    pub stats: VaultStats,
    /// Observations derived from the counters.
    pub insights: Vec<Insight>,
}

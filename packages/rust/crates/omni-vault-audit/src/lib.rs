//! omni-vault-audit - note graph and classification engine for markdown vaults.
//!
//! Module layout (by domain):
//! - `note`: note inputs, wikilink extraction, frontmatter and timestamps
//! - `classify`: ordered first-match category rules
//! - `metadata`: staleness, duplicate-name heuristic, content markers
//! - `graph`: directed link graph and connectivity classes
//! - `report` / `insights`: audit aggregation and vault statistics
//! - `auditor`: the scatter/reduce pipeline tying the pieces together
//! - `scan`: filesystem walk producing note inputs
//!
//! # Examples
//!
//! ```rust
//! use chrono::Utc;
//! use omni_vault_audit::{AuditConfig, NoteInput, NoteStat, VaultAuditor};
//!
//! let stat = NoteStat {
//!     modified_at: Utc::now(),
//!     created_at: None,
//!     size_bytes: 0,
//! };
//! let notes = vec![
//!     NoteInput::loaded("/vault/Architecture.md", "See [[Protocol Guide]].", stat),
//!     NoteInput::loaded("/vault/Protocol Guide.md", "Back to [[Architecture]].", stat),
//! ];
//! let auditor = VaultAuditor::new(AuditConfig::default())?;
//! let report = auditor.audit(&notes);
//! assert_eq!(report.connectivity.counts.well_connected, 2);
//! # Ok::<(), omni_vault_audit::AuditError>(())
//! ```

pub mod auditor;
pub mod classify;
pub mod config;
pub mod error;
pub mod graph;
pub mod insights;
pub mod metadata;
pub mod note;
pub mod report;
pub mod scan;

pub use auditor::{NoteAnalysis, VaultAuditor};
pub use classify::{RuleCatalog, classify};
pub use config::{AuditConfig, CategoryRule, DuplicateConfig, MarkerConfig, RulePatternKind};
pub use error::{AuditError, FailureKind, Result};
pub use graph::{
    ConnectivityClass, ConnectivityCounts, ConnectivityReport, HubRecord, NoteConnectivity,
    NoteGraph, analyze_connectivity, build_graph, classify_connectivity, find_hubs,
};
pub use insights::{
    Insight, InsightKind, TagCount, VaultStats, WordCount, compute_stats, generate_insights,
};
pub use metadata::{MetadataAnalyzer, NoteFlags, days_since};
pub use note::{
    FrontmatterMeta, Note, NoteInput, NoteRecord, NoteStat, ParsedNote, WikiLink, display_name,
    extract_links, is_supported_note, note_body, parse_note, parse_wikilinks,
};
pub use report::{
    AuditReport, CategorizedNotes, CategoryGroup, NameCollision, NoteFailure, NoteSummary,
    aggregate, find_name_collisions,
};
pub use scan::{ScanOptions, discover_notes, load_note, load_vault};

//! Note inputs and per-note parsing.

mod frontmatter;
mod links;
mod paths;
mod time;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use self::frontmatter::{count_terms, count_words, extract_meta, extract_tags, parse_frontmatter};
use self::time::resolve_note_timestamps;
use crate::metadata::NoteFlags;

pub use self::frontmatter::{FrontmatterMeta, note_body};
pub use self::links::{WikiLink, extract_links, parse_wikilinks};
pub use self::paths::{display_name, is_supported_note};
pub(crate) use self::paths::contains_backup_suffix;

/// Filesystem stats supplied alongside note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteStat {
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
    /// Creation time, when the filesystem records one.
    pub created_at: Option<DateTime<Utc>>,
    /// Content length in bytes.
    pub size_bytes: u64,
}

impl NoteStat {
    /// Convert `std::fs::Metadata`; fails when modification time is unavailable.
    pub fn from_metadata(meta: &std::fs::Metadata) -> std::io::Result<Self> {
        let modified_at = DateTime::<Utc>::from(meta.modified()?);
        let created_at = meta.created().ok().map(DateTime::<Utc>::from);
        Ok(Self {
            modified_at,
            created_at,
            size_bytes: meta.len(),
        })
    }
}

/// One discovered document as handed over by the filesystem collaborator.
#[derive(Debug, Clone)]
pub enum NoteInput {
    /// Content and stats were read.
    Loaded {
        /// Absolute note location.
        path: PathBuf,
        /// Raw text content.
        content: String,
        /// Filesystem stats.
        stat: NoteStat,
    },
    /// Content or stats could not be read.
    Unreadable {
        /// Absolute note location.
        path: PathBuf,
        /// Failure description.
        reason: String,
    },
}

impl NoteInput {
    /// Loaded note.
    #[must_use]
    pub fn loaded(path: impl Into<PathBuf>, content: impl Into<String>, stat: NoteStat) -> Self {
        Self::Loaded {
            path: path.into(),
            content: content.into(),
            stat,
        }
    }

    /// Note whose read failed.
    #[must_use]
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Note location.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded { path, .. } | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Parsed note content before metadata flags are attached.
#[derive(Debug, Clone)]
pub struct ParsedNote {
    /// Absolute note location.
    pub path: PathBuf,
    /// Display name (file stem).
    pub name: String,
    /// Frontmatter entries in source order.
    pub frontmatter_meta: FrontmatterMeta,
    /// Frontmatter tags, sorted and deduplicated.
    pub tags: Vec<String>,
    /// Whitespace-separated words in the body.
    pub word_count: usize,
    /// Lowercased body words of four or more characters with their counts.
    pub term_counts: HashMap<String, usize>,
    /// Outgoing link targets in order of appearance.
    pub links: Vec<String>,
    /// Resolved creation time.
    pub created_at: DateTime<Utc>,
    /// Resolved modification time.
    pub modified_at: DateTime<Utc>,
    /// Content length in bytes.
    pub size_bytes: u64,
    /// Set when a frontmatter block exists but could not be parsed.
    pub frontmatter_error: Option<String>,
}

/// Parse one note's content. Returns `None` when the path has no usable file name.
#[must_use]
pub fn parse_note(
    path: &Path,
    content: &str,
    stat: &NoteStat,
    prefer_frontmatter_timestamps: bool,
) -> Option<ParsedNote> {
    let name = display_name(path)?;
    let frontmatter = parse_frontmatter(content);
    let value = frontmatter.value.as_ref();
    let (created_at, modified_at) = resolve_note_timestamps(
        value,
        stat.created_at,
        stat.modified_at,
        prefer_frontmatter_timestamps,
    );
    Some(ParsedNote {
        path: path.to_path_buf(),
        name,
        frontmatter_meta: extract_meta(value),
        tags: extract_tags(value),
        word_count: count_words(frontmatter.body),
        term_counts: count_terms(frontmatter.body),
        links: extract_links(frontmatter.body),
        created_at,
        modified_at,
        size_bytes: stat.size_bytes,
        frontmatter_error: frontmatter.error,
    })
}

/// A fully analyzed note. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    /// Absolute note location.
    pub path: PathBuf,
    /// Display name; not unique across directories.
    pub name: String,
    /// Frontmatter entries in source order.
    pub frontmatter_meta: FrontmatterMeta,
    /// Frontmatter tags.
    pub tags: Vec<String>,
    /// Body word count.
    pub word_count: usize,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Content length in bytes.
    pub size_bytes: u64,
    /// Derived flags.
    pub flags: NoteFlags,
}

/// Per-note output of the scatter phase.
#[derive(Debug, Clone)]
pub struct NoteRecord {
    /// The note itself.
    pub note: Note,
    /// Category label from the first matching rule.
    pub category: Option<String>,
    /// Outgoing link targets.
    pub links: Vec<String>,
    /// Body term frequencies feeding vault word statistics.
    pub term_counts: HashMap<String, usize>,
}

impl NoteRecord {
    /// Combine parse output, category and flags.
    #[must_use]
    pub fn new(parsed: ParsedNote, category: Option<String>, flags: NoteFlags) -> Self {
        Self {
            note: Note {
                path: parsed.path,
                name: parsed.name,
                frontmatter_meta: parsed.frontmatter_meta,
                tags: parsed.tags,
                word_count: parsed.word_count,
                modified_at: parsed.modified_at,
                created_at: parsed.created_at,
                size_bytes: parsed.size_bytes,
                flags,
            },
            category,
            links: parsed.links,
            term_counts: parsed.term_counts,
        }
    }
}

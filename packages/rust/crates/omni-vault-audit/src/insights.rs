//! Vault-wide counters and the insights derived from them.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::graph::{ConnectivityReport, NoteGraph};
use crate::note::NoteRecord;
use crate::report::NameCollision;

const TOP_TAG_LIMIT: usize = 10;
const TOP_WORD_LIMIT: usize = 20;
const ORPHAN_SUGGESTION_PERCENT: f64 = 50.0;
const SPARSE_LINKS_PER_NOTE: f64 = 1.0;

/// Tag with its note frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// Tag text.
    pub tag: String,
    /// Notes carrying it.
    pub count: usize,
}

/// Body word with its frequency across the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// Lowercased word.
    pub word: String,
    /// Occurrences over all note bodies.
    pub count: usize,
}

/// Vault-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultStats {
    /// Successfully analyzed notes.
    pub total_notes: usize,
    /// Notes excluded by read failures.
    pub failed_notes: usize,
    /// Distinct display names among analyzed notes.
    pub distinct_names: usize,
    /// Extracted links, duplicates included.
    pub total_links: usize,
    /// Links whose target is not a known note.
    pub dangling_links: usize,
    /// Distinct link targets with no note behind them.
    pub dangling_targets: usize,
    /// Notes classified `orphan`.
    pub orphan_count: usize,
    /// `orphan_count` as a share of distinct names, in percent.
    pub orphan_percentage: f64,
    /// `total_links / total_notes`.
    pub average_links_per_note: f64,
    /// Body words across all notes.
    pub total_words: usize,
    /// `total_words / total_notes`.
    pub average_words_per_note: f64,
    /// Most frequent body words of four or more characters, ties by word.
    pub top_words: Vec<WordCount>,
    /// Most frequent tags, ties by tag name.
    pub top_tags: Vec<TagCount>,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn top_tags(records: &[NoteRecord]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for tag in &record.note.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    ranked.truncate(TOP_TAG_LIMIT);
    ranked
}

fn top_words(records: &[NoteRecord]) -> Vec<WordCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for (word, count) in &record.term_counts {
            *counts.entry(word.as_str()).or_insert(0) += count;
        }
    }
    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(TOP_WORD_LIMIT);
    ranked
}

/// Compute vault counters from analyzed notes and their graph.
#[must_use]
pub fn compute_stats(
    records: &[NoteRecord],
    graph: &NoteGraph,
    connectivity: &ConnectivityReport,
    failed_notes: usize,
) -> VaultStats {
    let note_names: HashSet<&str> = records.iter().map(|r| r.note.name.as_str()).collect();
    let dangling_links = graph
        .edges()
        .filter(|(_, target)| !note_names.contains(target))
        .count();
    let dangling_targets = graph
        .vertices()
        .filter(|vertex| !note_names.contains(vertex))
        .count();
    let orphan_count = connectivity.counts.orphan;
    let total_notes = records.len();
    let total_words: usize = records.iter().map(|r| r.note.word_count).sum();
    VaultStats {
        total_notes,
        failed_notes,
        distinct_names: note_names.len(),
        total_links: graph.edge_count(),
        dangling_links,
        dangling_targets,
        orphan_count,
        orphan_percentage: ratio(orphan_count, note_names.len()) * 100.0,
        average_links_per_note: ratio(graph.edge_count(), total_notes),
        total_words,
        average_words_per_note: ratio(total_words, total_notes),
        top_words: top_words(records),
        top_tags: top_tags(records),
    }
}

/// Insight severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Plain observation.
    Info,
    /// Something likely wrong.
    Warning,
    /// Suggested improvement.
    Suggestion,
}

/// One observation about the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Severity.
    pub kind: InsightKind,
    /// Message text.
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Derive insights from counters and name collisions.
#[must_use]
pub fn generate_insights(stats: &VaultStats, collisions: &[NameCollision]) -> Vec<Insight> {
    let mut insights = Vec::new();
    if stats.total_notes == 0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "The vault contains no readable notes.".to_string(),
        ));
        return insights;
    }

    insights.push(Insight::new(
        InsightKind::Info,
        format!(
            "The vault contains {} notes with {} total words.",
            stats.total_notes, stats.total_words
        ),
    ));
    if stats.orphan_percentage > ORPHAN_SUGGESTION_PERCENT {
        insights.push(Insight::new(
            InsightKind::Suggestion,
            format!(
                "{:.1}% of notes are orphaned. Consider linking them to other notes.",
                stats.orphan_percentage
            ),
        ));
    }
    if let Some(top) = stats.top_tags.first() {
        insights.push(Insight::new(
            InsightKind::Info,
            format!(
                "The most used tag is '{}' with {} occurrences.",
                top.tag, top.count
            ),
        ));
    }
    if stats.average_links_per_note < SPARSE_LINKS_PER_NOTE {
        insights.push(Insight::new(
            InsightKind::Suggestion,
            "Notes have few connections. Try linking related concepts together.".to_string(),
        ));
    }
    if !collisions.is_empty() {
        insights.push(Insight::new(
            InsightKind::Warning,
            format!(
                "{} note names are shared by several files; their links are merged in the graph.",
                collisions.len()
            ),
        ));
    }
    insights
}

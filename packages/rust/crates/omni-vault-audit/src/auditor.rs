//! Audit pipeline: per-note scatter, collect barrier, whole-vault reduction.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::HashSet;

use crate::classify::RuleCatalog;
use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::graph::{NoteGraph, analyze_connectivity};
use crate::insights::{compute_stats, generate_insights};
use crate::metadata::MetadataAnalyzer;
use crate::note::{NoteInput, NoteRecord, parse_note};
use crate::report::{AuditReport, NoteFailure, aggregate, find_name_collisions};

/// Outcome of analyzing one readable note.
#[derive(Debug)]
pub struct NoteAnalysis {
    /// Immutable per-note record.
    pub record: NoteRecord,
    /// Recoverable problem found while parsing.
    pub warning: Option<AuditError>,
}

/// Runs the full audit over notes handed in by the filesystem collaborator.
#[derive(Debug, Clone)]
pub struct VaultAuditor {
    config: AuditConfig,
    catalog: RuleCatalog,
    analyzer: MetadataAnalyzer,
}

impl VaultAuditor {
    /// Compile the catalog and marker matchers; fails before any note is read.
    pub fn new(config: AuditConfig) -> Result<Self> {
        let catalog = RuleCatalog::compile(&config.categories)?;
        let analyzer = MetadataAnalyzer::new(&config.markers, &config.duplicates)?;
        Ok(Self {
            config,
            catalog,
            analyzer,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Compiled category catalog.
    #[must_use]
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Parse, classify and flag one note.
    ///
    /// Returns [`AuditError::UnreadableNote`] for unreadable inputs and for
    /// paths without a usable file name.
    pub fn analyze_note(&self, input: &NoteInput, now: DateTime<Utc>) -> Result<NoteAnalysis> {
        let (path, content, stat) = match input {
            NoteInput::Loaded {
                path,
                content,
                stat,
            } => (path, content, stat),
            NoteInput::Unreadable { path, reason } => {
                return Err(AuditError::UnreadableNote {
                    path: path.clone(),
                    reason: reason.clone(),
                });
            }
        };
        let Some(parsed) = parse_note(
            path,
            content,
            stat,
            self.config.prefer_frontmatter_timestamps,
        ) else {
            return Err(AuditError::UnreadableNote {
                path: path.clone(),
                reason: "path has no file name".to_string(),
            });
        };

        let warning = parsed.frontmatter_error.clone().map(|reason| {
            log::warn!("malformed frontmatter in {}: {reason}", path.display());
            AuditError::MalformedFrontmatter {
                path: path.clone(),
                reason,
            }
        });
        // Staleness follows the resolved timestamp, which may come from frontmatter.
        let flags = self.analyzer.analyze(path, content, parsed.modified_at, now);
        let category = self.catalog.classify(&parsed.name).map(str::to_string);
        Ok(NoteAnalysis {
            record: NoteRecord::new(parsed, category, flags),
            warning,
        })
    }

    /// Audit relative to the current time.
    #[must_use]
    pub fn audit(&self, inputs: &[NoteInput]) -> AuditReport {
        self.audit_at(inputs, Utc::now())
    }

    /// Audit with an explicit reference time. Same inputs and `now` give an
    /// identical report.
    #[must_use]
    pub fn audit_at(&self, inputs: &[NoteInput], now: DateTime<Utc>) -> AuditReport {
        log::debug!("analyzing {} notes", inputs.len());
        let outcomes: Vec<Result<NoteAnalysis>> = inputs
            .par_iter()
            .map(|input| self.analyze_note(input, now))
            .collect();

        let mut records = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        let mut warnings = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(analysis) => {
                    if let Some(row) = analysis.warning.as_ref().and_then(NoteFailure::from_error)
                    {
                        warnings.push(row);
                    }
                    records.push(analysis.record);
                }
                Err(error) => {
                    log::warn!("skipping note: {error}");
                    if let Some(row) = NoteFailure::from_error(&error) {
                        failures.push(row);
                    }
                }
            }
        }

        let graph = NoteGraph::build(
            records
                .iter()
                .map(|record| (record.note.name.as_str(), record.links.as_slice())),
        );
        log::debug!(
            "graph built: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        let mut seen = HashSet::new();
        let note_names: Vec<String> = records
            .iter()
            .map(|record| record.note.name.clone())
            .filter(|name| seen.insert(name.clone()))
            .collect();
        let connectivity = analyze_connectivity(&graph, &note_names, self.config.hub_threshold);
        let categorized = aggregate(&records, &self.catalog, self.config.stale_after_days);
        let name_collisions = find_name_collisions(&records);
        let stats = compute_stats(&records, &graph, &connectivity, failures.len());
        let insights = generate_insights(&stats, &name_collisions);

        log::info!(
            "audited {} notes ({} failed, {} warnings): {} links, {} orphans, {} hubs",
            records.len(),
            failures.len(),
            warnings.len(),
            graph.edge_count(),
            connectivity.counts.orphan,
            connectivity.hubs.len()
        );

        AuditReport {
            generated_at: now,
            categorized,
            connectivity,
            failures,
            warnings,
            name_collisions,
            stats,
            insights,
        }
    }
}

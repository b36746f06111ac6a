//! Integration tests for per-note metadata flags.

use chrono::{Duration, TimeZone, Utc};
use omni_vault_audit::{
    AuditError, DuplicateConfig, MarkerConfig, MetadataAnalyzer, NoteInput, NoteStat, days_since,
};
use std::path::Path;

fn default_analyzer() -> Result<MetadataAnalyzer, AuditError> {
    MetadataAnalyzer::new(&MarkerConfig::default(), &DuplicateConfig::default())
}

#[test]
fn test_corrected_suffix_is_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    assert!(analyzer.is_duplicate_name(Path::new(
        "/vault/Master Architecture Index - CORRECTED.md"
    )));
    Ok(())
}

#[test]
fn test_duplicate_markers_and_backup_suffixes() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    assert!(analyzer.is_duplicate_name(Path::new("/vault/Setup COPY.md")));
    assert!(analyzer.is_duplicate_name(Path::new("/vault/notes backup.md")));
    assert!(analyzer.is_duplicate_name(Path::new("/vault/Plan.md.bak")));
    assert!(analyzer.is_duplicate_name(Path::new("/vault/Plan.md~")));
    Ok(())
}

#[test]
fn test_backup_suffix_inside_note_path() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    assert!(analyzer.is_duplicate_name(Path::new("/vault/Plan.bak.md")));
    assert!(analyzer.is_duplicate_name(Path::new("/vault/Plan.ORIG.md")));
    assert!(analyzer.is_duplicate_name(Path::new("/vault/x.orig/y.md")));
    assert!(!analyzer.is_duplicate_name(Path::new("/vault/Plan.md")));
    assert!(!analyzer.is_duplicate_name(Path::new("/vault/Setup copy.md")));
    assert!(!analyzer.is_duplicate_name(Path::new("/vault/Protocol Guide.md")));
    Ok(())
}

#[test]
fn test_outdated_without_current_marker() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    let now = Utc::now();
    let flags = analyzer.analyze(
        Path::new("/vault/Old API.md"),
        "This endpoint is DEPRECATED in favour of v2.",
        now,
        now,
    );
    assert!(flags.has_outdated_marker);
    assert!(!flags.has_current_marker);
    assert!(flags.is_outdated());
    Ok(())
}

#[test]
fn test_current_marker_wins_over_outdated() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    let now = Utc::now();
    let flags = analyzer.analyze(
        Path::new("/vault/API.md"),
        "v1 is deprecated; v2 is the latest release.",
        now,
        now,
    );
    assert!(flags.has_outdated_marker);
    assert!(flags.has_current_marker);
    assert!(!flags.is_outdated());
    Ok(())
}

#[test]
fn test_markers_match_inside_words() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    assert!(analyzer.has_outdated_marker("DEPRECATED_FLAG set on the old client"));
    assert!(analyzer.has_current_marker("currently maintained"));
    assert!(analyzer.has_outdated_marker("This page is no longer used."));
    let now = Utc::now();
    let flags = analyzer.analyze(
        Path::new("/vault/Client.md"),
        "deprecated since v2, currently maintained elsewhere",
        now,
        now,
    );
    assert!(flags.has_current_marker);
    assert!(!flags.is_outdated());
    Ok(())
}

#[test]
fn test_custom_marker_terms() -> Result<(), Box<dyn std::error::Error>> {
    let markers = MarkerConfig {
        outdated: vec!["legacy".to_string()],
        current: vec!["fresh".to_string()],
    };
    let analyzer = MetadataAnalyzer::new(&markers, &DuplicateConfig::default())?;
    assert!(analyzer.has_outdated_marker("Legacy importer"));
    assert!(!analyzer.has_outdated_marker("deprecated importer"));
    assert!(analyzer.has_current_marker("fresh build"));
    Ok(())
}

#[test]
fn test_stale_threshold() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    let now = Utc::now();
    let path = Path::new("/vault/Notes.md");
    let old = analyzer.analyze(path, "", now - Duration::days(45), now);
    let recent = analyzer.analyze(path, "", now - Duration::days(10), now);
    let boundary = analyzer.analyze(path, "", now - Duration::days(30), now);
    assert_eq!(old.days_since_modified, 45);
    assert!(old.is_stale(30));
    assert!(!recent.is_stale(30));
    assert!(!boundary.is_stale(30));
    Ok(())
}

#[test]
fn test_days_since_is_relative_to_now() -> Result<(), Box<dyn std::error::Error>> {
    let modified = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .ok_or("invalid date")?;
    let later = modified + Duration::days(3) + Duration::hours(23);
    assert_eq!(days_since(modified, later), 3);
    assert_eq!(days_since(modified, later + Duration::hours(1)), 4);
    assert_eq!(days_since(later, modified), 0);
    Ok(())
}

#[test]
fn test_unreadable_input_surfaces_error() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = default_analyzer()?;
    let input = NoteInput::unreadable("/vault/locked.md", "permission denied");
    let result = analyzer.analyze_input(&input, Utc::now());
    assert!(matches!(result, Err(AuditError::UnreadableNote { .. })));

    let stat = NoteStat {
        modified_at: Utc::now(),
        created_at: None,
        size_bytes: 7,
    };
    let loaded = NoteInput::loaded("/vault/ok.md", "current", stat);
    let flags = analyzer.analyze_input(&loaded, Utc::now())?;
    assert!(flags.has_current_marker);
    Ok(())
}

//! Integration tests for ordered category classification.

use omni_vault_audit::{AuditConfig, AuditError, CategoryRule, RuleCatalog, classify};

#[test]
fn test_first_matching_rule_wins() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = RuleCatalog::compile(&[
        CategoryRule::substring("brain", "C1"),
        CategoryRule::substring("brain init", "C2"),
    ])?;
    assert_eq!(classify("brain init guide", &catalog), Some("C1"));
    Ok(())
}

#[test]
fn test_reordering_rules_changes_result() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = RuleCatalog::compile(&[
        CategoryRule::substring("brain init", "C2"),
        CategoryRule::substring("brain", "C1"),
    ])?;
    assert_eq!(classify("brain init guide", &catalog), Some("C2"));
    assert_eq!(classify("brain dump", &catalog), Some("C1"));
    Ok(())
}

#[test]
fn test_matching_is_case_insensitive_on_name() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = RuleCatalog::compile(&[
        CategoryRule::substring("Protocol", "Protocols"),
        CategoryRule::regex(r"^readme$", "Readme"),
    ])?;
    assert_eq!(catalog.classify("MCP PROTOCOL notes"), Some("Protocols"));
    assert_eq!(catalog.classify("README"), Some("Readme"));
    assert_eq!(catalog.classify("readme-old"), None);
    Ok(())
}

#[test]
fn test_unmatched_name_is_uncategorized() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = RuleCatalog::compile(&[CategoryRule::substring("session", "Session Logs")])?;
    assert_eq!(catalog.classify("Grocery list"), None);
    Ok(())
}

#[test]
fn test_empty_catalog_is_rejected() {
    assert!(matches!(
        RuleCatalog::compile(&[]),
        Err(AuditError::EmptyRuleCatalog)
    ));
}

#[test]
fn test_invalid_regex_rule_is_rejected() {
    let result = RuleCatalog::compile(&[CategoryRule::regex("([unclosed", "Broken")]);
    assert!(matches!(
        result,
        Err(AuditError::InvalidRulePattern { .. })
    ));
}

#[test]
fn test_blank_substring_rule_is_rejected() {
    let result = RuleCatalog::compile(&[
        CategoryRule::substring("session", "Session Logs"),
        CategoryRule::substring("  ", "Everything"),
    ]);
    match result {
        Err(AuditError::InvalidRulePattern { pattern, reason }) => {
            assert_eq!(pattern, "  ");
            assert_eq!(reason, "empty substring pattern");
        }
        other => panic!("expected InvalidRulePattern, got {other:?}"),
    }
}

#[test]
fn test_labels_keep_catalog_order_without_repeats() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = RuleCatalog::compile(&[
        CategoryRule::substring("b", "Second"),
        CategoryRule::substring("a", "First"),
        CategoryRule::substring("c", "Second"),
    ])?;
    assert_eq!(catalog.labels(), vec!["Second", "First"]);
    assert_eq!(catalog.len(), 3);
    Ok(())
}

#[test]
fn test_default_catalog_prefers_brain_init_over_critical() -> Result<(), Box<dyn std::error::Error>>
{
    let catalog = RuleCatalog::compile(&AuditConfig::default().categories)?;
    assert_eq!(
        catalog.classify("Critical Brain Init Checklist"),
        Some("Brain Initialization")
    );
    assert_eq!(catalog.classify("Critical Fixes"), Some("Critical"));
    assert_eq!(catalog.classify("Testing Strategy"), Some("Testing"));
    Ok(())
}

//! Integration tests for wikilink extraction.

use omni_vault_audit::{extract_links, parse_wikilinks};

#[test]
fn test_extract_links_basic_forms() {
    let content = "See [[Alpha]], [[Beta|the beta note]] and [[Gamma#Setup]].";
    assert_eq!(extract_links(content), vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_extract_links_preserves_order_and_duplicates() {
    let content = "[[B]] then [[A]] then [[B]] again";
    assert_eq!(extract_links(content), vec!["B", "A", "B"]);
}

#[test]
fn test_extract_links_trims_target_whitespace() {
    assert_eq!(extract_links("[[  Spaced Name  | alias ]]"), vec!["Spaced Name"]);
}

#[test]
fn test_extract_links_empty_without_tokens() {
    assert!(extract_links("").is_empty());
    assert!(extract_links("plain text with [single] brackets").is_empty());
}

#[test]
fn test_extract_links_skips_malformed_tokens() {
    let content = "[[unterminated and [[Valid]] plus [[]] and [[#only-heading]] and [[line\nbreak]]";
    assert_eq!(extract_links(content), vec!["Valid"]);
}

#[test]
fn test_extract_links_counts_embeds_and_strips_extension() {
    let content = "![[diagram.md]] and [[folder\\Note.md|x]]";
    assert_eq!(extract_links(content), vec!["diagram", "folder/Note"]);
}

#[test]
fn test_extract_links_is_deterministic() {
    let content = "[[One]] [[Two|2]] [[Three#h]] [[One]] [[broken";
    let first = extract_links(content);
    let second = extract_links(content);
    assert_eq!(first, second);
}

#[test]
fn test_parse_wikilinks_reports_alias_section_and_offset() {
    let content = "Intro [[Design#Goals|goals]]";
    let links = parse_wikilinks(content);
    assert_eq!(links.len(), 1);
    let link = &links[0];
    assert_eq!(link.target, "Design");
    assert_eq!(link.alias.as_deref(), Some("goals"));
    assert_eq!(link.section.as_deref(), Some("Goals"));
    assert_eq!(link.offset, 6);
}

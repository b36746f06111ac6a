//! Integration tests for the note link graph.

use omni_vault_audit::{NoteGraph, build_graph};

fn pairs(raw: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    raw.iter()
        .map(|(name, links)| {
            (
                (*name).to_string(),
                links.iter().map(|link| (*link).to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_every_edge_appears_in_both_mappings() {
    let notes = pairs(&[("A", &["B", "C", "B"]), ("B", &["A"]), ("C", &[])]);
    let graph = build_graph(&notes);
    for (source, links) in &notes {
        for target in links {
            assert!(graph.outgoing(source).contains(target));
            assert!(graph.incoming(target).contains(source));
        }
    }
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_duplicates_and_order_are_preserved() {
    let graph = build_graph(&pairs(&[("A", &["C", "B", "C"]), ("B", &["C"])]));
    assert_eq!(graph.outgoing("A"), ["C", "B", "C"]);
    assert_eq!(graph.incoming("C"), ["A", "A", "B"]);
}

#[test]
fn test_dangling_targets_are_vertices() {
    let graph = build_graph(&pairs(&[("A", &["Missing"])]));
    assert!(graph.contains("Missing"));
    assert_eq!(graph.incoming("Missing"), ["A"]);
    assert!(graph.outgoing("Missing").is_empty());
    assert_eq!(graph.vertex_count(), 2);
}

#[test]
fn test_unknown_name_lookup_is_empty() {
    let graph = build_graph(&pairs(&[("A", &[])]));
    assert!(!graph.contains("Nowhere"));
    assert!(graph.outgoing("Nowhere").is_empty());
    assert!(graph.incoming("Nowhere").is_empty());
}

#[test]
fn test_vertex_order_follows_input_then_targets() {
    let graph = build_graph(&pairs(&[("Z", &["Q"]), ("A", &["Z", "P"])]));
    let vertices: Vec<&str> = graph.vertices().collect();
    assert_eq!(vertices, vec!["Z", "A", "Q", "P"]);
}

#[test]
fn test_rebuild_is_structurally_identical() {
    let notes = pairs(&[("A", &["B", "Dangling"]), ("B", &["A", "A"]), ("C", &[])]);
    assert_eq!(build_graph(&notes), build_graph(&notes));
}

#[test]
fn test_shared_names_merge_into_one_vertex() {
    let links_a = vec!["X".to_string()];
    let links_b = vec!["Y".to_string()];
    let graph = NoteGraph::build([
        ("Readme", links_a.as_slice()),
        ("Readme", links_b.as_slice()),
    ]);
    assert_eq!(graph.outgoing("Readme"), ["X", "Y"]);
    let edges: Vec<(&str, &str)> = graph.edges().collect();
    assert_eq!(edges, vec![("Readme", "X"), ("Readme", "Y")]);
}

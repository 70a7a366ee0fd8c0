use super::{extract, Extractor};
use crate::document::{DocumentNode, NodeKind, Rgb};
use crate::error::BridgeError;
use crate::note::NO_SECTION;

fn board() -> DocumentNode {
    DocumentNode::other("0:0", "DOCUMENT").with_children(vec![
        DocumentNode::note("n0", "Loose note"),
        DocumentNode::section("s1", "A").with_children(vec![
            DocumentNode::note("n1", "In A").with_fill(Rgb::new(1.0, 1.0, 1.0)),
            DocumentNode::section("s2", "B").with_children(vec![DocumentNode::other(
                "f1", "FRAME",
            )
            .with_children(vec![DocumentNode::note("n2", "Deep in B")])]),
            DocumentNode::note("n3", "Back in A"),
        ]),
        DocumentNode::section("s3", "").with_children(vec![DocumentNode::note("n4", "Unnamed")]),
    ])
}

#[test]
fn test_nearest_enclosing_section_wins() {
    let notes = extract(&board()).unwrap();

    assert_eq!(notes["n1"].section_name, "A");
    assert_eq!(notes["n2"].section_name, "B", "nested section overrides A");
    assert_eq!(notes["n3"].section_name, "A", "A is restored after leaving B");
}

#[test]
fn test_notes_outside_sections_get_sentinel() {
    let notes = extract(&board()).unwrap();

    assert_eq!(notes["n0"].section_name, NO_SECTION);
    assert_eq!(
        notes["n4"].section_name, NO_SECTION,
        "a section without a name does not override"
    );
    assert!(notes.values().all(|n| !n.section_name.is_empty()));
}

#[test]
fn test_document_order_and_other_nodes_skipped() {
    let notes = extract(&board()).unwrap();

    let ids: Vec<&str> = notes.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["n0", "n1", "n2", "n3", "n4"]);
}

#[test]
fn test_text_falls_back_to_name_then_empty() {
    let mut named = DocumentNode::new("a", NodeKind::Note, "Name only");
    named.text = None;
    let blank = DocumentNode::new("b", NodeKind::Note, "");
    let root = DocumentNode::other("r", "DOCUMENT").with_children(vec![named, blank]);

    let notes = extract(&root).unwrap();
    assert_eq!(notes["a"].raw_text, "Name only");
    assert_eq!(notes["b"].raw_text, "");
}

#[test]
fn test_color_hex_from_fill() {
    let notes = extract(&board()).unwrap();

    assert_eq!(notes["n1"].color_hex, "#ffffff");
    assert_eq!(notes["n0"].color_hex, "", "no fill means no color");
}

#[test]
fn test_duplicate_ids_last_seen_wins() {
    let root = DocumentNode::other("r", "DOCUMENT").with_children(vec![
        DocumentNode::note("dup", "first"),
        DocumentNode::note("other", "x"),
        DocumentNode::section("s", "Later").with_children(vec![DocumentNode::note("dup", "second")]),
    ]);

    let notes = extract(&root).unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes["dup"].raw_text, "second");
    assert_eq!(notes["dup"].section_name, "Later");

    let ids: Vec<&str> = notes.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["dup", "other"], "the first slot is kept");
}

#[test]
fn test_extraction_is_deterministic() {
    let root = board();
    let first = extract(&root).unwrap();
    let second = extract(&root).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_root_note_is_emitted() {
    let notes = extract(&DocumentNode::note("solo", "Just me")).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes["solo"].section_name, NO_SECTION);
}

#[test]
fn test_depth_bound() {
    let mut node = DocumentNode::note("leaf", "deep");
    for i in 0..10 {
        node = DocumentNode::other(format!("g{i}"), "GROUP").with_children(vec![node]);
    }

    assert_eq!(Extractor::new(10).extract(&node).unwrap().len(), 1);

    let err = Extractor::new(9).extract(&node).unwrap_err();
    match err {
        BridgeError::DepthExceeded { max_depth, node_id } => {
            assert_eq!(max_depth, 9);
            assert_eq!(node_id, "leaf");
        }
        other => panic!("unexpected error {other}"),
    }
}

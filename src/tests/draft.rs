use super::{build_initial, update_field, DraftField, DraftStore, FieldEdit, IssueDraft, UNTITLED};
use crate::error::BridgeError;
use crate::note::{NoteRecord, NO_SECTION};
use std::time::{Duration, Instant};

fn note(id: &str, text: &str) -> NoteRecord {
    NoteRecord {
        id: id.to_string(),
        raw_text: text.to_string(),
        section_name: NO_SECTION.to_string(),
        color_hex: String::new(),
    }
}

fn drafts() -> Vec<IssueDraft> {
    build_initial(&[
        note("a", "Fix bug\nDetails here"),
        note("b", "Second\nMore"),
        note("c", "Third"),
    ])
}

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn test_first_line_is_title() {
    let drafts = build_initial(&[note("1", "Fix bug\nDetails here")]);

    assert_eq!(drafts[0].id, "1");
    assert_eq!(drafts[0].title, "Fix bug");
    assert_eq!(drafts[0].description, "Details here");
    assert_eq!(drafts[0].original_text(), "Fix bug\nDetails here");
    assert!(drafts[0].label_ids.is_empty());
}

#[test]
fn test_only_first_newline_splits() {
    let drafts = build_initial(&[note("1", "Title\nline one\nline two\n")]);

    assert_eq!(drafts[0].title, "Title");
    assert_eq!(drafts[0].description, "line one\nline two\n");
}

#[test]
fn test_no_newline_means_empty_description() {
    let drafts = build_initial(&[note("1", "Just a title")]);

    assert_eq!(drafts[0].title, "Just a title");
    assert_eq!(drafts[0].description, "");
}

#[test]
fn test_blank_title_gets_placeholder() {
    let drafts = build_initial(&[note("1", ""), note("2", "   \nbody"), note("3", "\n")]);

    assert_eq!(drafts[0].title, UNTITLED);
    assert_eq!(drafts[0].description, "");
    assert_eq!(drafts[0].original_text(), "");

    assert_eq!(drafts[1].title, "Untitled Issue");
    assert_eq!(drafts[1].description, "body");
    assert_eq!(drafts[1].original_text(), "   \nbody");

    assert_eq!(drafts[2].title, UNTITLED);
    assert_eq!(drafts[2].description, "");
}

#[test]
fn test_update_field_touches_one_field_of_one_draft() {
    let before = drafts();
    let after = update_field(&before, "b", DraftField::Title, "Renamed");

    assert_eq!(before, drafts(), "input is not mutated");
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1].title, "Renamed");
    assert_eq!(after[1].description, before[1].description);
    assert_eq!(after[1].original_text(), before[1].original_text());
}

#[test]
fn test_update_field_unknown_id_is_noop() {
    let before = drafts();
    let after = update_field(&before, "missing", DraftField::Description, "x");

    assert_eq!(after, before);
}

#[test]
fn test_draft_field_parsing() {
    assert_eq!("title".parse::<DraftField>().unwrap(), DraftField::Title);
    assert_eq!(
        "description".parse::<DraftField>().unwrap(),
        DraftField::Description
    );
    assert!(matches!(
        "originalText".parse::<DraftField>(),
        Err(BridgeError::UnknownField(_))
    ));
}

#[test]
fn test_field_edit_parsing() {
    let edit: FieldEdit = "12:34.description=a=b".parse().unwrap();
    assert_eq!(edit.id, "12:34");
    assert_eq!(edit.field, DraftField::Description);
    assert_eq!(edit.value, "a=b");

    let edit: FieldEdit = "x.title=".parse().unwrap();
    assert_eq!(edit.value, "");

    assert!(matches!(
        "no-equals".parse::<FieldEdit>(),
        Err(BridgeError::MalformedEdit(_))
    ));
    assert!(matches!(
        ".title=x".parse::<FieldEdit>(),
        Err(BridgeError::MalformedEdit(_))
    ));
    assert!(matches!(
        "a.originalText=x".parse::<FieldEdit>(),
        Err(BridgeError::UnknownField(_))
    ));
}

#[test]
fn test_serialises_with_camel_case_keys() {
    let mut draft = build_initial(&[note("1", "T\nD")]).remove(0);
    draft.label_ids = vec!["gid://gitlab/Label/1".to_string()];

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "1",
            "title": "T",
            "description": "D",
            "originalText": "T\nD",
            "labelIds": ["gid://gitlab/Label/1"],
        })
    );
}

#[test]
fn test_store_updates_in_place_and_coalesces() {
    let mut store = DraftStore::new(drafts(), DELAY);
    let mut seen: Vec<Vec<IssueDraft>> = Vec::new();
    let mut sink = |d: &[IssueDraft]| seen.push(d.to_vec());
    let t0 = Instant::now();

    assert!(store.update_field("a", DraftField::Title, "F", t0));
    assert!(store.update_field("a", DraftField::Title, "Fi", t0 + Duration::from_millis(100)));
    assert!(store.update_field("a", DraftField::Title, "Fix", t0 + Duration::from_millis(200)));

    assert_eq!(store.get("a").unwrap().title, "Fix", "edits apply immediately");
    assert_eq!(store.poll(t0 + Duration::from_millis(450), &mut sink), 0);
    assert_eq!(store.poll(t0 + Duration::from_millis(500), &mut sink), 1);
    assert_eq!(store.poll(t0 + Duration::from_millis(900), &mut sink), 0, "fires once");

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].len(), 3, "the whole list is delivered");
    assert_eq!(seen[0][0].title, "Fix");
}

#[test]
fn test_store_edits_to_different_drafts_do_not_interfere() {
    let mut store = DraftStore::new(drafts(), DELAY);
    let mut count = 0;
    let mut sink = |_: &[IssueDraft]| count += 1;
    let t0 = Instant::now();

    store.update_field("a", DraftField::Title, "A", t0);
    store.update_field("b", DraftField::Description, "B", t0 + Duration::from_millis(200));

    // a's window is not restarted by the edit to b.
    assert_eq!(store.poll(t0 + Duration::from_millis(300), &mut sink), 1);
    assert_eq!(store.poll(t0 + Duration::from_millis(500), &mut sink), 1);
    assert_eq!(count, 2);
}

#[test]
fn test_store_unknown_id_is_ignored() {
    let mut store = DraftStore::new(drafts(), DELAY);
    let t0 = Instant::now();

    assert!(!store.update_field("zzz", DraftField::Title, "x", t0));
    assert_eq!(store.next_deadline(), None);
    assert_eq!(store.drafts(), drafts().as_slice());
}

#[test]
fn test_store_flush_and_labels() {
    let mut store = DraftStore::new(drafts(), DELAY);
    let t0 = Instant::now();
    store.update_field("c", DraftField::Description, "body", t0);
    store.set_label_ids(&["l1".to_string(), "l2".to_string()]);

    let mut last = Vec::new();
    assert_eq!(store.flush(&mut |d: &[IssueDraft]| last = d.to_vec()), 1);
    assert_eq!(last[2].description, "body");
    assert!(last.iter().all(|d| d.label_ids == ["l1", "l2"]));

    let drafts = store.into_drafts();
    assert_eq!(drafts[2].field(DraftField::Description), "body");
}

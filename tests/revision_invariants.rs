//! Revision invariant tests
//!
//! - Revisions are immutable, parent-linked snapshots
//! - Ids are content-derived and globally unique
//! - Parents always exist and belong to the same document
//! - Timestamps are store-assigned metadata

use serde_json::json;
use stratadb::revision::Author;
use stratadb::store::DocumentStore;

fn author() -> Author {
    Author::new("Ada", "ada@example.com")
}

// =============================================================================
// Parent Linkage
// =============================================================================

/// Each revision's parent equals the head at its commit time.
#[test]
fn test_parent_equals_previous_head() {
    let store = DocumentStore::in_memory();
    let first = store
        .create_document(json!({"v": 1}), author(), "one")
        .unwrap();
    let second = store
        .update_document(&first.document_id, None, json!({"v": 2}), author(), "two")
        .unwrap();
    let third = store
        .update_document(&first.document_id, None, json!({"v": 3}), author(), "three")
        .unwrap();

    assert!(first.parent.is_none());
    assert_eq!(second.parent.as_ref(), Some(&first.id));
    assert_eq!(third.parent.as_ref(), Some(&second.id));
}

/// Every revision reachable from a head exists and belongs to the
/// same document and state.
#[test]
fn test_lineage_stays_within_document_and_state() {
    let store = DocumentStore::in_memory();
    let created = store
        .create_document(json!({"v": 1}), author(), "init")
        .unwrap();
    for i in 2..=5 {
        store
            .update_document(&created.document_id, None, json!({"v": i}), author(), "edit")
            .unwrap();
    }

    for revision in store.list_revisions(&created.document_id, None).unwrap() {
        assert_eq!(revision.document_id, created.document_id);
        assert_eq!(revision.state, "master");
        if let Some(parent) = &revision.parent {
            let parent = store.get_revision(&created.document_id, parent).unwrap();
            assert_eq!(parent.document_id, created.document_id);
            assert_eq!(parent.state, "master");
        }
    }
}

// =============================================================================
// Id Uniqueness
// =============================================================================

/// Revision ids never repeat, across states or documents.
#[test]
fn test_revision_ids_globally_unique() {
    let store = DocumentStore::in_memory();
    let mut seen = std::collections::HashSet::new();

    for d in 0..3 {
        let created = store
            .create_document(json!({"doc": d}), author(), "init")
            .unwrap();
        assert!(seen.insert(created.id.clone()));

        for i in 0..3 {
            let rev = store
                .update_document(
                    &created.document_id,
                    Some("published"),
                    json!({"doc": d, "i": i}),
                    author(),
                    "edit",
                )
                .unwrap();
            assert!(seen.insert(rev.id.clone()));
        }
    }

    assert_eq!(seen.len(), 12);
}

/// Identical content under identical metadata still gets a distinct id
/// on recommit (the parent pointer differs).
#[test]
fn test_recommitting_same_content_gets_new_id() {
    let store = DocumentStore::in_memory();
    let content = json!({"title": "Hello"});

    let first = store
        .create_document(content.clone(), author(), "same message")
        .unwrap();
    let second = store
        .update_document(
            &first.document_id,
            None,
            content.clone(),
            author(),
            "same message",
        )
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.content, second.content);
}

// =============================================================================
// Content Round-Trip
// =============================================================================

/// Content written is returned structurally intact.
#[test]
fn test_content_round_trip() {
    let store = DocumentStore::in_memory();
    let content = json!({
        "title": "Hello",
        "tags": ["a", "b"],
        "nested": {"count": 3, "live": false, "note": null}
    });

    let created = store
        .create_document(content.clone(), author(), "init")
        .unwrap();
    let fetched = store.get_document(&created.document_id, None).unwrap();
    assert_eq!(fetched.content, content);

    let exact = store
        .get_revision(&created.document_id, &created.id)
        .unwrap();
    assert_eq!(exact.content, content);
}

/// Authorship and message are preserved verbatim.
#[test]
fn test_author_and_message_preserved() {
    let store = DocumentStore::in_memory();
    let created = store
        .create_document(
            json!({"v": 1}),
            Author::new("Grace Hopper", "grace@example.com"),
            "first draft",
        )
        .unwrap();

    let fetched = store
        .get_revision(&created.document_id, &created.id)
        .unwrap();
    assert_eq!(fetched.author.name, "Grace Hopper");
    assert_eq!(fetched.author.email, "grace@example.com");
    assert_eq!(fetched.message, "first draft");
}

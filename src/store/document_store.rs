//! The store facade
//!
//! One instance per process, explicitly owned and passed around (no
//! globals). All operations are callable from any number of threads;
//! the only synchronization point is the state registry's CAS.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::content::{self, DocumentDirectory, ObjectStore};
use crate::history::HistoryResolver;
use crate::index::{IndexEntry, IndexProjector, InMemoryIndex, SearchIndex, SearchQuery};
use crate::observability::{Event, Logger};
use crate::promotion::PromotionEngine;
use crate::revision::{Author, DocumentId, Revision, RevisionGraph, RevisionId};
use crate::state::{StateRegistry, DEFAULT_STATE};

use super::errors::{StoreError, StoreResult};

/// A document listing row: id plus the content of its freshest head.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub content: Value,
}

/// The versioned document store.
pub struct DocumentStore {
    config: StoreConfig,
    objects: Arc<ObjectStore>,
    directory: Arc<DocumentDirectory>,
    registry: Arc<StateRegistry>,
    graph: Arc<RevisionGraph>,
    resolver: HistoryResolver,
    promotions: PromotionEngine,
    index: Arc<dyn SearchIndex>,
}

impl DocumentStore {
    /// Build a store over the given search index.
    pub fn new(config: StoreConfig, index: Arc<dyn SearchIndex>) -> Self {
        let objects = Arc::new(ObjectStore::new());
        let directory = Arc::new(DocumentDirectory::new());
        let registry = Arc::new(StateRegistry::new());
        let projector = IndexProjector::new(Arc::clone(&index), config.index_retry_policy());
        let graph = Arc::new(RevisionGraph::new(
            Arc::clone(&objects),
            Arc::clone(&registry),
            Arc::clone(&directory),
            projector,
            config.max_commit_retries,
        ));
        let resolver = HistoryResolver::new(Arc::clone(&objects), Arc::clone(&registry));
        let promotions = PromotionEngine::new(
            Arc::clone(&graph),
            Arc::clone(&registry),
            Arc::clone(&objects),
        );

        Self {
            config,
            objects,
            directory,
            registry,
            graph,
            resolver,
            promotions,
            index,
        }
    }

    /// A store backed by the in-memory index, with default tuning.
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::default(), Arc::new(InMemoryIndex::new()))
    }

    /// Create a document: registers a fresh id and commits the first
    /// revision under `master`.
    pub fn create_document(
        &self,
        content: Value,
        author: Author,
        message: &str,
    ) -> StoreResult<Arc<Revision>> {
        // Validate before registering so a bad body leaves no trace
        content::validate(&content)?;

        let id = DocumentId::new();
        self.directory.register(id, DEFAULT_STATE, Utc::now());
        let revision = self
            .graph
            .commit(&id, DEFAULT_STATE, content, author, message)?;

        Logger::info(
            Event::DocumentCreated,
            &[
                ("document_id", &id.to_string()),
                ("revision_id", revision.id.as_str()),
            ],
        );
        Ok(revision)
    }

    /// Commit a new revision to an existing document.
    pub fn update_document(
        &self,
        id: &DocumentId,
        state: Option<&str>,
        content: Value,
        author: Author,
        message: &str,
    ) -> StoreResult<Arc<Revision>> {
        let state = state.unwrap_or(DEFAULT_STATE);
        let revision = self.graph.commit(id, state, content, author, message)?;
        Ok(revision)
    }

    /// Current head revision of a state (default `master`).
    pub fn get_document(&self, id: &DocumentId, state: Option<&str>) -> StoreResult<Arc<Revision>> {
        self.require_document(id)?;
        let state = state.unwrap_or(DEFAULT_STATE);
        let head = self
            .registry
            .head(id, state)
            .ok_or_else(|| StoreError::StateNotFound {
                state: state.to_string(),
            })?;
        // The pointer was published after the object, so a miss here
        // means the backing store lost data
        self.objects.get(&head).ok_or_else(|| {
            StoreError::StorageUnavailable(format!("head revision {} missing from object store", head))
        })
    }

    /// Exact revision by id, scoped to the document.
    pub fn get_revision(
        &self,
        id: &DocumentId,
        revision_id: &RevisionId,
    ) -> StoreResult<Arc<Revision>> {
        self.require_document(id)?;
        let revision = self
            .objects
            .get(revision_id)
            .ok_or_else(|| StoreError::RevisionNotFound(revision_id.clone()))?;
        if revision.document_id != *id {
            return Err(StoreError::RevisionNotFound(revision_id.clone()));
        }
        Ok(revision)
    }

    /// Full history of a state, newest first.
    pub fn list_revisions(
        &self,
        id: &DocumentId,
        state: Option<&str>,
    ) -> StoreResult<Vec<Arc<Revision>>> {
        self.require_document(id)?;
        let state = state.unwrap_or(DEFAULT_STATE);
        let mut revisions = Vec::new();
        for revision in self.resolver.history(id, state)? {
            revisions.push(revision?);
        }
        Ok(revisions)
    }

    /// Merged history of several states, newest event first.
    pub fn history_across(
        &self,
        id: &DocumentId,
        states: &[String],
    ) -> StoreResult<Vec<Arc<Revision>>> {
        self.require_document(id)?;
        Ok(self.resolver.history_across(id, states)?)
    }

    /// Promote one state's head content into another state.
    pub fn promote(
        &self,
        id: &DocumentId,
        from_state: &str,
        to_state: &str,
        author: Author,
        message: &str,
    ) -> StoreResult<Arc<Revision>> {
        self.require_document(id)?;
        Ok(self
            .promotions
            .promote(id, from_state, to_state, author, message)?)
    }

    /// All states of a document that have revisions, sorted by name.
    pub fn states(&self, id: &DocumentId) -> StoreResult<Vec<String>> {
        self.require_document(id)?;
        Ok(self.registry.states_of(id))
    }

    /// Documents ordered by last update, newest first. Each row carries
    /// the head content of the state that received that update.
    pub fn list_documents(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> StoreResult<Vec<DocumentSummary>> {
        let limit = limit.unwrap_or(self.config.default_list_limit);
        let mut summaries = Vec::new();
        for entry in self.directory.list(limit, offset) {
            let head = match self.registry.head(&entry.id, &entry.last_state) {
                Some(head) => head,
                // Registered but first commit has not landed yet
                None => continue,
            };
            let revision = self.objects.get(&head).ok_or_else(|| {
                StoreError::StorageUnavailable(format!(
                    "head revision {} missing from object store",
                    head
                ))
            })?;
            summaries.push(DocumentSummary {
                id: entry.id,
                content: revision.content.clone(),
            });
        }
        Ok(summaries)
    }

    /// Structured search over current content, delegated to the index.
    /// Best-effort freshness: the index may trail the canonical graph.
    pub fn search(&self, query: &SearchQuery) -> StoreResult<Vec<IndexEntry>> {
        Ok(self.index.search(query)?)
    }

    fn require_document(&self, id: &DocumentId) -> StoreResult<()> {
        if self.directory.contains(id) {
            Ok(())
        } else {
            Err(StoreError::DocumentNotFound(*id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn author() -> Author {
        Author::new("Ada", "ada@example.com")
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"title": "Hello", "tags": ["a", "b"]}), author(), "init")
            .unwrap();

        let fetched = store.get_document(&created.document_id, None).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.content, json!({"title": "Hello", "tags": ["a", "b"]}));
    }

    #[test]
    fn test_create_rejects_bad_content() {
        let store = DocumentStore::in_memory();
        let err = store
            .create_document(json!("not an object"), author(), "init")
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_CONTENT");
        assert!(store.list_documents(None, 0).unwrap().is_empty());
    }

    #[test]
    fn test_get_unknown_document() {
        let store = DocumentStore::in_memory();
        let err = store.get_document(&DocumentId::new(), None).unwrap_err();
        assert_eq!(err.code(), "DOCUMENT_NOT_FOUND");
    }

    #[test]
    fn test_get_state_without_revisions() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"t": 1}), author(), "init")
            .unwrap();
        let err = store
            .get_document(&created.document_id, Some("published"))
            .unwrap_err();
        assert_eq!(err.code(), "STATE_NOT_FOUND");
    }

    #[test]
    fn test_update_appends_to_master_by_default() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"v": 1}), author(), "init")
            .unwrap();
        let updated = store
            .update_document(&created.document_id, None, json!({"v": 2}), author(), "edit")
            .unwrap();

        assert_eq!(updated.parent.as_ref(), Some(&created.id));
        let revisions = store.list_revisions(&created.document_id, None).unwrap();
        assert_eq!(revisions.len(), 2);
        assert_eq!(revisions[0].id, updated.id);
        assert_eq!(revisions[1].id, created.id);
    }

    #[test]
    fn test_get_revision_scoped_to_document() {
        let store = DocumentStore::in_memory();
        let a = store.create_document(json!({"d": "a"}), author(), "a").unwrap();
        let b = store.create_document(json!({"d": "b"}), author(), "b").unwrap();

        // Right document, right revision
        let fetched = store.get_revision(&a.document_id, &a.id).unwrap();
        assert_eq!(fetched.id, a.id);

        // Revision exists but belongs to another document
        let err = store.get_revision(&a.document_id, &b.id).unwrap_err();
        assert_eq!(err.code(), "REVISION_NOT_FOUND");
    }

    #[test]
    fn test_states_lists_all_lineages() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"v": 1}), author(), "init")
            .unwrap();
        store
            .promote(&created.document_id, "master", "published", author(), "ship")
            .unwrap();

        assert_eq!(
            store.states(&created.document_id).unwrap(),
            vec!["master", "published"]
        );
    }

    #[test]
    fn test_list_documents_newest_first() {
        let store = DocumentStore::in_memory();
        let first = store.create_document(json!({"n": 1}), author(), "a").unwrap();
        let second = store.create_document(json!({"n": 2}), author(), "b").unwrap();

        // Touch the first document again so it becomes freshest
        std::thread::sleep(std::time::Duration::from_millis(2));
        store
            .update_document(&first.document_id, None, json!({"n": 3}), author(), "c")
            .unwrap();

        let listing = store.list_documents(None, 0).unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, first.document_id);
        assert_eq!(listing[0].content, json!({"n": 3}));
        assert_eq!(listing[1].id, second.document_id);
    }

    #[test]
    fn test_listing_reflects_latest_state_content() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"phase": "draft"}), author(), "init")
            .unwrap();
        store
            .update_document(
                &created.document_id,
                Some("published"),
                json!({"phase": "live"}),
                author(),
                "publish",
            )
            .unwrap();

        let listing = store.list_documents(None, 0).unwrap();
        assert_eq!(listing[0].content, json!({"phase": "live"}));
    }

    #[test]
    fn test_search_sees_committed_content() {
        let store = DocumentStore::in_memory();
        store
            .create_document(json!({"title": "Hello"}), author(), "init")
            .unwrap();

        let hits = store
            .search(&SearchQuery::default().with_term("title", json!("Hello")))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content["title"], "Hello");
    }

    #[test]
    fn test_history_across_promotion_first() {
        let store = DocumentStore::in_memory();
        let created = store
            .create_document(json!({"v": 1}), author(), "init")
            .unwrap();
        // Promotion must sort as the newer event
        std::thread::sleep(std::time::Duration::from_millis(2));
        let promoted = store
            .promote(&created.document_id, "master", "published", author(), "ship")
            .unwrap();

        let merged = store
            .history_across(
                &created.document_id,
                &["master".to_string(), "published".to_string()],
            )
            .unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, promoted.id);
        assert_eq!(merged[1].id, created.id);
    }
}

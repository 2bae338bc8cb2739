//! In-process document store for tests and offline runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{Collection, Document, DocumentStore, DocumentStoreError};

type Collections = HashMap<Collection, BTreeMap<String, Document>>;

/// Document store held in memory.
///
/// Listings come back ordered by document id.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<Collections>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Unavailable`] if the store lock is
    /// poisoned.
    pub fn document_count(&self, collection: Collection) -> Result<usize, DocumentStoreError> {
        Ok(self
            .lock()?
            .get(&collection)
            .map_or(0, BTreeMap::len))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, DocumentStoreError> {
        self.collections
            .lock()
            .map_err(|_| DocumentStoreError::unavailable("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self
            .lock()?
            .get(&collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_by_equality(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self
            .lock()?
            .get(&collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| document.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self
            .lock()?
            .get(&collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn upsert_by_id(
        &self,
        collection: Collection,
        id: &str,
        document: Document,
    ) -> Result<(), DocumentStoreError> {
        self.lock()?
            .entry(collection)
            .or_default()
            .insert(id.to_owned(), document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn upsert_replaces_whole_document() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_by_id(
                Collection::Reviews,
                "rev-1",
                document(json!({ "rating": 2, "comment": "meh" })),
            )
            .await
            .expect("first write");
        store
            .upsert_by_id(Collection::Reviews, "rev-1", document(json!({ "rating": 5 })))
            .await
            .expect("second write");

        let stored = store
            .get_by_id(Collection::Reviews, "rev-1")
            .await
            .expect("read")
            .expect("present");
        assert_eq!(stored, document(json!({ "rating": 5 })));
        assert_eq!(store.document_count(Collection::Reviews).expect("len"), 1);
    }

    #[tokio::test]
    async fn equality_filter_matches_field_value() {
        let store = InMemoryDocumentStore::new();
        for (id, region) in [("b", "north"), ("a", "north"), ("c", "south")] {
            store
                .upsert_by_id(
                    Collection::Recipes,
                    id,
                    document(json!({ "id": id, "regionId": region })),
                )
                .await
                .expect("write");
        }

        let north = store
            .list_by_equality(Collection::Recipes, "regionId", &json!("north"))
            .await
            .expect("query");
        let ids: Vec<&Value> = north.iter().filter_map(|doc| doc.get("id")).collect();
        assert_eq!(ids, vec![&json!("a"), &json!("b")]);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_by_id(Collection::Regions, "x", Document::new())
            .await
            .expect("write");

        assert!(store.list_all(Collection::Recipes).await.expect("list").is_empty());
        assert!(
            store
                .get_by_id(Collection::Recipes, "x")
                .await
                .expect("read")
                .is_none()
        );
    }
}

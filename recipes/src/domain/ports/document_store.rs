//! Driven port for the remote document store.
//!
//! The store holds schemaless JSON documents in named collections, addressed
//! by string id. Adapters own transport and wire-format details; domain
//! services own the typed records and the fail-soft policy on reads.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::define_port_error;

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Logical collections used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Region documents (`id`, `name`, `coordinate`).
    Regions,
    /// Recipe documents tagged with `regionId`.
    Recipes,
    /// Review documents tagged with `recipeId` and `userId`.
    Reviews,
}

impl Collection {
    /// Wire name of the collection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Recipes => "recipes",
            Self::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// Transport failure or a non-success response from the store.
        Unavailable { message: String } =>
            "document store unavailable: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode { message: String } =>
            "document store payload could not be decoded: {message}",
    }
}

/// Port for reading and writing documents.
///
/// Ids are non-empty and contain no `/`; callers pass validated id newtypes
/// through `AsRef<str>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`.
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, DocumentStoreError>;

    /// Documents in `collection` whose `field` equals `value`.
    async fn list_by_equality(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// The document with `id`, or `None` when absent.
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Create or fully replace the document with `id`.
    async fn upsert_by_id(
        &self,
        collection: Collection,
        id: &str,
        document: Document,
    ) -> Result<(), DocumentStoreError>;
}

/// Fixture store that holds nothing and accepts every write.
///
/// Use it where store behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocumentStore;

#[async_trait]
impl DocumentStore for FixtureDocumentStore {
    async fn list_all(
        &self,
        _collection: Collection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn list_by_equality(
        &self,
        _collection: Collection,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn get_by_id(
        &self,
        _collection: Collection,
        _id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(None)
    }

    async fn upsert_by_id(
        &self,
        _collection: Collection,
        _id: &str,
        _document: Document,
    ) -> Result<(), DocumentStoreError> {
        Ok(())
    }
}

/// Serialise a typed record into a document.
///
/// # Errors
///
/// Returns [`DocumentStoreError::Decode`] when the record does not serialise
/// to a JSON object.
pub fn encode_document<T: Serialize>(record: &T) -> Result<Document, DocumentStoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(DocumentStoreError::decode(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(error) => Err(DocumentStoreError::decode(error.to_string())),
    }
}

/// Deserialise a document into a typed record.
///
/// # Errors
///
/// Returns [`DocumentStoreError::Decode`] when the document does not match
/// the record shape.
pub fn decode_document<T: DeserializeOwned>(document: Document) -> Result<T, DocumentStoreError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|error| DocumentStoreError::decode(error.to_string()))
}

/// Deserialise every document, failing on the first mismatch.
///
/// # Errors
///
/// Returns [`DocumentStoreError::Decode`] for the first undecodable document.
pub fn decode_documents<T: DeserializeOwned>(
    documents: Vec<Document>,
) -> Result<Vec<T>, DocumentStoreError> {
    documents.into_iter().map(decode_document).collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        count: u32,
    }

    #[rstest]
    #[case(Collection::Regions, "regions")]
    #[case(Collection::Recipes, "recipes")]
    #[case(Collection::Reviews, "reviews")]
    fn collection_wire_names(#[case] collection: Collection, #[case] expected: &str) {
        assert_eq!(collection.as_str(), expected);
        assert_eq!(collection.to_string(), expected);
    }

    #[test]
    fn encode_then_decode_preserves_record() {
        let sample = Sample {
            id: "a".to_owned(),
            count: 2,
        };
        let document = encode_document(&sample).expect("encode");
        assert_eq!(document.get("count"), Some(&json!(2)));
        let decoded: Sample = decode_document(document).expect("decode");
        assert_eq!(decoded, sample);
    }

    #[test]
    fn encode_rejects_non_objects() {
        let error = encode_document(&vec![1, 2]).expect_err("arrays are not documents");
        assert!(matches!(error, DocumentStoreError::Decode { .. }));
    }

    #[test]
    fn decode_documents_fails_on_first_bad_document() {
        let good = encode_document(&Sample {
            id: "a".to_owned(),
            count: 1,
        })
        .expect("encode");
        let mut bad = Document::new();
        bad.insert("id".to_owned(), json!(7));

        let result: Result<Vec<Sample>, _> = decode_documents(vec![good, bad]);
        assert!(matches!(result, Err(DocumentStoreError::Decode { .. })));
    }

    #[tokio::test]
    async fn fixture_store_is_empty() {
        let store = FixtureDocumentStore;
        assert!(store
            .list_all(Collection::Regions)
            .await
            .expect("list")
            .is_empty());
        assert!(store
            .get_by_id(Collection::Recipes, "pho-bo")
            .await
            .expect("get")
            .is_none());
        store
            .upsert_by_id(Collection::Reviews, "rev-1", Document::new())
            .await
            .expect("fixture accepts writes");
    }
}

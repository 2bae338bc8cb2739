//! Reqwest-backed Firestore document store adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! serialisation, timeout and HTTP error mapping, and decoding of Firestore
//! typed values into plain JSON documents. When given a session source,
//! requests carry the signed-in user's ID token so security rules see
//! `request.auth`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use super::dto::{
    FirestoreDocumentDto, ListDocumentsResponseDto, RunQueryResponseItemDto, WriteDocumentDto,
    equality_query,
};
use crate::domain::Session;
use crate::domain::ports::{Collection, Document, DocumentStore, DocumentStoreError};

const DATABASE: &str = "(default)";

/// Document store adapter backed by the Firestore REST API.
pub struct FirestoreHttpStore {
    client: Client,
    base_url: Url,
    project_id: String,
    api_key: Option<String>,
    sessions: Option<watch::Receiver<Option<Session>>>,
}

impl FirestoreHttpStore {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// `base_url` is the API root, e.g. `https://firestore.googleapis.com/v1/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        project_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            project_id: project_id.into(),
            api_key: None,
            sessions: None,
        })
    }

    /// Send `key=<api_key>` with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Authenticate requests as the current session's user.
    ///
    /// Pass the identity provider's session receiver; each request reads the
    /// latest session and sends its ID token as a bearer token. Requests made
    /// while signed out, or with a session lacking a token, go unauthenticated.
    #[must_use]
    pub fn with_session_source(mut self, sessions: watch::Receiver<Option<Session>>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    fn bearer_token(&self) -> Option<String> {
        let sessions = self.sessions.as_ref()?;
        let current = sessions.borrow();
        current.as_ref()?.id_token().map(str::to_owned)
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url, DocumentStoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                DocumentStoreError::unavailable(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?;
            segments
                .pop_if_empty()
                .extend(["projects", self.project_id.as_str(), "databases", DATABASE]);
            segments.extend(tail);
        }
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn collection_url(&self, collection: Collection) -> Result<Url, DocumentStoreError> {
        self.endpoint(&["documents", collection.as_str()])
    }

    fn document_url(&self, collection: Collection, id: &str) -> Result<Url, DocumentStoreError> {
        if id.is_empty() || id.contains('/') {
            return Err(DocumentStoreError::unavailable(format!(
                "invalid document id {id:?}"
            )));
        }
        self.endpoint(&["documents", collection.as_str(), id])
    }

    fn run_query_url(&self) -> Result<Url, DocumentStoreError> {
        self.endpoint(&["documents:runQuery"])
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), DocumentStoreError> {
        let response = self
            .authorise(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }

    async fn send_checked<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, DocumentStoreError> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        decode_body(&body)
    }
}

#[async_trait]
impl DocumentStore for FirestoreHttpStore {
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, DocumentStoreError> {
        let base = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut url = base.clone();
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }
            debug!(collection = %collection, page = documents.len(), "listing documents");
            let page: ListDocumentsResponseDto = self.send_checked(self.client.get(url)).await?;
            for dto in page.documents {
                documents.push(into_document(dto)?);
            }
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(documents)
    }

    async fn list_by_equality(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let url = self.run_query_url()?;
        let body = equality_query(collection.as_str(), field, value);
        debug!(collection = %collection, field, "running equality query");
        let items: Vec<RunQueryResponseItemDto> = self
            .send_checked(self.client.post(url).json(&body))
            .await?;
        items
            .into_iter()
            .filter_map(|item| item.document)
            .map(into_document)
            .collect()
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let url = self.document_url(collection, id)?;
        debug!(collection = %collection, id, "fetching document");
        let (status, body) = self.send(self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        let dto: FirestoreDocumentDto = decode_body(&body)?;
        into_document(dto).map(Some)
    }

    async fn upsert_by_id(
        &self,
        collection: Collection,
        id: &str,
        document: Document,
    ) -> Result<(), DocumentStoreError> {
        let url = self.document_url(collection, id)?;
        let payload = WriteDocumentDto::from_document(&document);
        debug!(collection = %collection, id, "writing document");
        let (status, body) = self.send(self.client.patch(url).json(&payload)).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(())
    }
}

fn into_document(dto: FirestoreDocumentDto) -> Result<Document, DocumentStoreError> {
    dto.into_document().map_err(DocumentStoreError::decode)
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DocumentStoreError> {
    serde_json::from_slice(body).map_err(|error| {
        DocumentStoreError::decode(format!("invalid Firestore JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> DocumentStoreError {
    DocumentStoreError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DocumentStoreError {
    let preview = body_preview(body);
    if preview.is_empty() {
        DocumentStoreError::unavailable(format!("status {}", status.as_u16()))
    } else {
        DocumentStoreError::unavailable(format!("status {}: {preview}", status.as_u16()))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each port exposes a strongly typed error so adapters map their failures
//! into predictable variants instead of returning opaque errors.

mod macros;
pub(crate) use macros::define_port_error;

mod document_store;
mod identity_provider;

#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{
    Collection, Document, DocumentStore, DocumentStoreError, FixtureDocumentStore,
    decode_document, decode_documents, encode_document,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{AuthError, IdentityProvider, SessionChannel};

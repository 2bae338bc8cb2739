//! In-memory adapters used by tests, demos, and the offline import mode.

mod document_store;
mod identity_provider;

pub use document_store::InMemoryDocumentStore;
pub use identity_provider::InMemoryIdentityProvider;

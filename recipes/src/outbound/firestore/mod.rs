//! Firestore outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `DocumentStore`
//! port against the Firestore REST API.

mod dto;
mod http_store;

pub use http_store::FirestoreHttpStore;

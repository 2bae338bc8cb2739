//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **firestore**: Firestore REST implementation of `DocumentStore`.
//! - **firebase_auth**: Firebase Authentication implementation of
//!   `IdentityProvider`.
//! - **memory**: in-process implementations of both ports.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

pub mod firebase_auth;
pub mod firestore;
pub mod memory;

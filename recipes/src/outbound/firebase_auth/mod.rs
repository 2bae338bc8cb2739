//! Firebase Authentication outbound adapter.

mod dto;
mod http_provider;

pub use http_provider::FirebaseAuthProvider;

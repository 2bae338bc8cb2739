//! Regional recipes core library.
//!
//! Domain types and services live in [`domain`], document store and identity
//! adapters in [`outbound`], and screen state for the app in [`presentation`].

pub mod config;
pub mod domain;
pub mod outbound;
pub mod presentation;

//! Recommendation providers for encore.
//!
//! A [`RecommendationProvider`] turns a wizard's request into a list of
//! recommendation cards. Two providers exist: an offline stub that serves a
//! fixed list after a short delay, and an HTTP provider that calls the
//! external recommendation service. This crate also owns configuration
//! loading and the title search client.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod provider;
pub mod search;

pub use config::Config;
pub use error::{ProviderError, ProviderResult};
pub use provider::{
    build_provider, fulfil, HttpProvider, ProviderKind, RecommendationProvider, StubProvider,
};
pub use search::{SearchClient, SearchHit};

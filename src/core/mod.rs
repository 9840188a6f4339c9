//! Core modules: naming convention, family classification, dispatch and the
//! host seam.
//!
//! Everything here is synchronous and holds no state between calls beyond
//! the configuration a [`loader::Loader`] is built from.

pub mod config;
pub mod envelope;
pub mod error;
pub mod family;
pub mod hook;
pub mod host;
pub mod loader;
pub mod namespace;
pub mod probe;

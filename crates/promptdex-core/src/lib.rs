// Public fallible APIs in this crate share one concrete error contract
// (`LibraryError`); lookups signal absence with `Option`, never an error.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod models;
pub mod root;
pub(crate) mod scan;

pub use client::PromptLibrary;
pub use error::{LibraryError, Result};
pub use models::{Category, LibraryStats, Prompt, SearchOptions, SearchResult};

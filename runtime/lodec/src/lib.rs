//! Host library for the `lode` CLI.
//!
//! The binary in `main.rs` is a thin argument dispatcher; everything it does
//! lives here so commands are callable (and testable) as functions.

pub mod commands;
pub mod search;

pub use search::{assemble_search_path, search_path_from, PATH_ENV};

//! commentcov-core - Core library for Go comment coverage
//!
//! This crate finds every documentable entity of a Go source file (the
//! package, functions and methods, variables and constants, named types) and
//! pairs it with the comment groups that document it:
//!
//! - header comments end on the line right above the entity, or on its first
//!   line before its first token;
//! - inline comments lie within the entity's lines (trailing or nested).
//!
//! The output is an ordered list of [`CoverageItem`]s per file, the package
//! item first. Reporting, thresholds and percentages are left to consumers.
//!
//! # Features
//!
//! - `walk` - Enable [`WalkSources`] for gitignore-aware directory walking (brings in `ignore`)
//! - `parallel` - Measure files in parallel (brings in `rayon`)
//!
//! # Measuring
//!
//! ```
//! use commentcov_core::{MeasureOptions, MemorySources, Scope, measure_coverage};
//!
//! let items = measure_coverage(
//!     MemorySources::new().add("hoge.go", "package hoge\n\n// Doc\nfunc F() {}\n"),
//!     &MeasureOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].scope, Scope::File);
//! assert_eq!(items[1].scope, Scope::PublicFunction);
//! assert_eq!(items[1].header_comments[0].comment, "Doc\n");
//! ```
//!
//! Lower level, a file can be parsed once with [`go::parse`] and classified
//! with [`coverage::file_coverage`] or the per-entity routines next to it.

mod comment;
pub mod coverage;
mod error;
pub mod go;
mod position;
mod predicate;
mod sources;
pub mod syntax;

pub use comment::{CommentGroup, comment_text, is_only_nolint_annotation, normalize};
pub use coverage::{CoverageItem, MeasureOptions, Scope, is_exported};
pub use error::{Error, Result};
pub use go::ParseError;
pub use position::{Block, Position};
pub use predicate::{is_header, is_inline};
pub use sources::{MemorySources, PathSources, Sources, measure_file, measure_source};

#[cfg(feature = "walk")]
pub use sources::WalkSources;

/// Measure comment coverage of every file a [`Sources`] provides
pub fn measure_coverage(sources: impl Sources, options: &MeasureOptions) -> Result<Vec<CoverageItem>> {
    sources.extract(options)
}

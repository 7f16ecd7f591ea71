//! # lexner-core
//!
//! Core types for the lexner toolbox: shared data structures used across all crates.
//!
//! This crate provides:
//! - **Spans and records**: `Span`, `EntityRecord`, `DocumentEntitySet`
//! - **Dictionary matching output**: `MatchHit`, `SourceKind`, `EntityCheckResult`
//! - **Engine tokens**: `Token`, as handed over by a statistical NLP engine
//!
//! Nothing here compiles regexes or takes locks; the matching engine lives in
//! the `lexner` crate.

pub mod entity;
pub mod error;

pub use entity::{
    DocumentEntitySet, EntityCheckResult, EntityRecord, MatchHit, SourceKind, Span, Token,
};

pub use error::{Error, Result};

//! Shared source-location types used by the tokenizer, renderer and logging

pub mod span;

pub use span::{Position, SourceMap, Span};

//! Utility types and functions

pub mod config;
pub mod logger;
pub mod span;

pub use span::{Position, SourceDocument, Span};

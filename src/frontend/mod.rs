//! Frontend pipeline
//!
//! Foreign header text flows through these stages:
//! - [`lexer`] splits it into code, literal and directive runs
//! - [`preprocessor`] captures `#name body` lines
//! - [`comments`] rewrites foreign comments as host comments
//! - [`module`] resolves dotted names to headers and loads them
//!
//! [`symbols`] is bookkeeping shared with callers; nothing here reads it.

pub mod comments;
pub mod lexer;
pub mod module;
pub mod preprocessor;
pub mod symbols;

//! cheader
//!
//! Treats C/C++ headers as importable host modules: a dotted logical name is
//! resolved to a header on a search path, its preprocessor lines are captured,
//! and its `//` and `/* */` comments are rewritten as `#` comments (or `"""`
//! docstring blocks) without touching string and character literals.
//!
//! # Example
//!
//! ```
//! use cheader::frontend::comments::{translate, TranslateOptions};
//!
//! let out = translate("int x = 6 /* six */ + 4 /* four */;", &TranslateOptions::default()).unwrap();
//! assert_eq!(out, "int x = 6 + 4;\n# six\n# four");
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use frontend::comments::{translate, TranslateOptions};
pub use frontend::module::{BuildEnvironment, ModuleUnit};
pub use util::span::SourceDocument;

use std::path::{Path, PathBuf};

use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "cheader";

/// Translate the comments of a whole file
///
/// # Example
///
/// ```no_run
/// use cheader::{translate_file, Result, TranslateOptions};
///
/// fn main() -> Result<()> {
///     let text = translate_file("include/point.h".as_ref(), &TranslateOptions::default())?;
///     println!("{}", text);
///     Ok(())
/// }
/// ```
pub fn translate_file(
    path: &Path,
    options: &TranslateOptions,
) -> Result<String> {
    debug!("Translating {}", path.display());
    let document =
        SourceDocument::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let out = translate(document.content(), options)
        .with_context(|| format!("Failed to translate {}", path.display()))?;
    Ok(out)
}

/// Resolve and load a dotted module name from `paths` with default options
pub fn import(
    name: &str,
    paths: Vec<PathBuf>,
) -> Result<ModuleUnit> {
    let env = BuildEnvironment::new(paths);
    let unit = env
        .import(name)
        .with_context(|| format!("Failed to import {}", name))?;
    Ok(unit)
}

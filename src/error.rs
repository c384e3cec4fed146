use std::path::PathBuf;

use thiserror::Error;

/// Precondition violations raised while naming modules and recording references.
///
/// Every variant is fatal for the current scan: a report built after one of
/// these would silently misplace references.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XrefError {
    /// A module filename does not carry the `.py` extension.
    #[error("not a python module filename: {path:?}")]
    MissingExtension { path: String },

    /// A reference source still contains a path separator.
    #[error("reference source contains a path separator: {source_ref:?}")]
    PathSeparatorInSource { source_ref: String },

    /// An imported symbol is empty, whitespace-only, or dotted.
    #[error("malformed imported symbol: {symbol:?}")]
    MalformedSymbol { symbol: String },

    /// A relative reference climbs above the top-level package of `module`.
    #[error("relative import {reference:?} goes {depth} level(s) up from {module:?}, beyond its top-level package")]
    RelativeDepthExceeded {
        reference: String,
        module: String,
        depth: usize,
    },

    /// A declared module source does not exist under the project root.
    #[error("module source not found: {}", path.display())]
    MissingSource { path: PathBuf },
}

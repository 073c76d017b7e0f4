use std::io;

use thiserror::Error;

/// Everything that can go wrong while reading or transforming a colormap.
///
/// Reading errors are raised at the point of detection and never retried; a
/// failed parse yields no colormap rather than a best-effort one.
#[derive(Debug, Error)]
pub enum CptError {
    /// The underlying source could not be read.  Retry policy, if any,
    /// belongs to the caller.
    #[error("cannot read colormap source")]
    Source(#[from] io::Error),

    #[error("no data rows in colormap source")]
    NoData,
    #[error("line {line}: expected {expected} numeric fields, found {found}")]
    ShortRow { line: usize, expected: usize, found: usize },
    #[error("line {line}: invalid number {token:?}")]
    BadNumber { line: usize, token: String },
    #[error("degenerate position range: first and last x values are equal")]
    DegenerateRange,

    #[error("invalid levels: {0}")]
    InvalidLevels(String),
    #[error("invalid remap: {0}")]
    InvalidRemap(String),
}

use thiserror::Error;

use crate::GenerateError;
use crate::parse::ParseError;

/// Unified error type covering parsing, generation, output and I/O.
///
/// Returned by convenience methods like [`Grammar::from_dsl()`](crate::Grammar::from_dsl)
/// and [`Grammar::from_file()`](crate::Grammar::from_file).
#[derive(Debug, Error)]
pub enum UgenError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

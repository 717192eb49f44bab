//! Recipe failures.

use crate::value::PathError;
use thiserror::Error;

/// Failure raised by a recipe while it edits a draft.
///
/// The base value is never affected by a failed recipe: the draft is
/// discarded and nothing it touched is committed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RecipeError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("recipe failed: {0}")]
    Failed(String),
}

impl RecipeError {
    /// Convenience constructor for recipe-defined failures.
    pub fn failed(message: impl Into<String>) -> Self {
        RecipeError::Failed(message.into())
    }
}

//! Replay conflicts.

use super::Patch;
use crate::value::{Path, PathError};
use thiserror::Error;

/// A patch whose path no longer resolves in the value it is replayed on.
///
/// Usually the live context diverged from the snapshot the patch was
/// computed against.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("patch #{index} ({op} at '{path}') does not apply: {source}")]
pub struct PatchConflict {
    /// Position of the patch in its list.
    pub index: usize,
    pub op: &'static str,
    pub path: Path,
    pub source: PathError,
}

impl PatchConflict {
    pub(crate) fn new(index: usize, patch: &Patch, source: PathError) -> Self {
        Self {
            index,
            op: patch.op(),
            path: patch.path().clone(),
            source,
        }
    }
}

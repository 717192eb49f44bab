//! Checking a patch list before dispatch.

use super::apply::apply_one;
use super::{Patch, PatchConflict};
use crate::value::Value;
use stillwater::Validation;

/// Dry-run `patches` against `base` and collect every conflict.
///
/// Unlike [`apply_patches`](super::apply_patches), this does not stop at the
/// first failure: the result lists all patches that would be skipped.
pub fn validate_patches(base: &Value, patches: &[Patch]) -> Validation<(), Vec<PatchConflict>> {
    let mut working = base.clone();
    let conflicts: Vec<PatchConflict> = patches
        .iter()
        .enumerate()
        .filter_map(|(index, patch)| {
            apply_one(&mut working, patch)
                .err()
                .map(|source| PatchConflict::new(index, patch, source))
        })
        .collect();

    if conflicts.is_empty() {
        Validation::Success(())
    } else {
        Validation::Failure(conflicts)
    }
}

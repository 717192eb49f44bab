//! Path-addressed edits shared by drafts and patch replay.

use super::{Path, PathSegment, Value};
use std::sync::Arc;
use thiserror::Error;

/// A path that cannot be resolved or written in the current value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no value at '{path}'")]
    Unresolved { path: Path },

    #[error("cannot address into {kind} at '{path}'")]
    NotAContainer { path: Path, kind: &'static str },

    #[error("'{segment}' is not an array index at '{path}'")]
    NotAnIndex { path: Path, segment: String },

    #[error("index {index} out of bounds for array of length {len} at '{path}'")]
    IndexOutOfBounds {
        path: Path,
        index: usize,
        len: usize,
    },

    #[error("expected an array at '{path}', found {kind}")]
    NotAnArray { path: Path, kind: &'static str },

    #[error("the root value cannot be removed")]
    RootRemoval,
}

/// How a write treats the final segment when it addresses an array.
///
/// Object keys are always inserted or overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Shift later elements right; `index == len` appends.
    Insert,
    /// Overwrite an existing slot only.
    Replace,
    /// Overwrite an existing slot; `index == len` appends.
    Assign,
}

fn parent_mut<'a>(root: &'a mut Value, parent: &[PathSegment]) -> Result<&'a mut Value, PathError> {
    root.pointer_mut(parent).ok_or_else(|| PathError::Unresolved {
        path: Path::from(parent),
    })
}

fn array_index(parent: &[PathSegment], segment: &PathSegment) -> Result<usize, PathError> {
    segment.as_index().ok_or_else(|| PathError::NotAnIndex {
        path: Path::from(parent),
        segment: segment.to_string(),
    })
}

/// Write `value` at `path`. The empty path swaps the whole value.
pub(crate) fn write(
    root: &mut Value,
    path: &Path,
    value: Value,
    mode: WriteMode,
) -> Result<(), PathError> {
    let Some((parent_path, last)) = path.parent_and_last() else {
        *root = value;
        return Ok(());
    };

    match parent_mut(root, parent_path)? {
        Value::Object(map) => {
            Arc::make_mut(map).insert(last.as_key().into_owned(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = array_index(parent_path, last)?;
            let len = items.len();
            match mode {
                WriteMode::Insert if index <= len => Arc::make_mut(items).insert(index, value),
                WriteMode::Assign if index == len => Arc::make_mut(items).push(value),
                WriteMode::Assign | WriteMode::Replace if index < len => {
                    Arc::make_mut(items)[index] = value;
                }
                _ => {
                    return Err(PathError::IndexOutOfBounds {
                        path: path.clone(),
                        index,
                        len,
                    })
                }
            }
            Ok(())
        }
        other => Err(PathError::NotAContainer {
            path: Path::from(parent_path),
            kind: other.kind(),
        }),
    }
}

/// Remove and return the value at `path`.
pub(crate) fn remove(root: &mut Value, path: &Path) -> Result<Value, PathError> {
    let (parent_path, last) = path.parent_and_last().ok_or(PathError::RootRemoval)?;

    match parent_mut(root, parent_path)? {
        Value::Object(map) => {
            let key = last.as_key();
            if !map.contains_key(&*key) {
                return Err(PathError::Unresolved { path: path.clone() });
            }
            Arc::make_mut(map)
                .remove(&*key)
                .ok_or_else(|| PathError::Unresolved { path: path.clone() })
        }
        Value::Array(items) => {
            let index = array_index(parent_path, last)?;
            if index >= items.len() {
                return Err(PathError::IndexOutOfBounds {
                    path: path.clone(),
                    index,
                    len: items.len(),
                });
            }
            Ok(Arc::make_mut(items).remove(index))
        }
        other => Err(PathError::NotAContainer {
            path: Path::from(parent_path),
            kind: other.kind(),
        }),
    }
}

/// Append to the array at `path`.
pub(crate) fn push(root: &mut Value, path: &Path, value: Value) -> Result<(), PathError> {
    let target = root
        .pointer_mut(path)
        .ok_or_else(|| PathError::Unresolved { path: path.clone() })?;
    let kind = target.kind();
    let items = target.as_array_mut().ok_or_else(|| PathError::NotAnArray {
        path: path.clone(),
        kind,
    })?;
    items.push(value);
    Ok(())
}

//! Materializing a finished draft.
//!
//! `share` walks the finished tree against the base and puts the base's own
//! references back wherever the contents did not change. `diff` then emits
//! forward and inverse patches, skipping identical subtrees in O(1).

use crate::patch::Patch;
use crate::value::{Map, Path, Value};
use std::sync::Arc;

/// Rebuild `next` so that every subtree equal to the base counterpart is
/// the base's own reference. Returns `base` itself when nothing changed.
pub(crate) fn share(base: &Value, next: Value) -> Value {
    if Value::ptr_eq(base, &next) {
        return base.clone();
    }
    match (base, &next) {
        (Value::Object(old), Value::Object(new)) => {
            let mut unchanged = old.len() == new.len();
            let mut map = Map::new();
            for (key, value) in new.iter() {
                let value = match old.get(key) {
                    Some(previous) => {
                        let shared = share(previous, value.clone());
                        unchanged &= Value::ptr_eq(previous, &shared);
                        shared
                    }
                    None => {
                        unchanged = false;
                        value.clone()
                    }
                };
                map.insert(key.clone(), value);
            }
            if unchanged {
                base.clone()
            } else {
                Value::Object(Arc::new(map))
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            let mut unchanged = old.len() == new.len();
            let items: Vec<Value> = new
                .iter()
                .enumerate()
                .map(|(i, value)| match old.get(i) {
                    Some(previous) => {
                        let shared = share(previous, value.clone());
                        unchanged &= Value::ptr_eq(previous, &shared);
                        shared
                    }
                    None => value.clone(),
                })
                .collect();
            if unchanged {
                base.clone()
            } else {
                Value::Array(Arc::new(items))
            }
        }
        _ => next,
    }
}

/// Forward and inverse patch lists, built side by side.
#[derive(Default)]
pub(crate) struct PatchPair {
    pub forward: Vec<Patch>,
    pub inverse: Vec<Patch>,
}

impl PatchPair {
    fn replace(&mut self, path: Path, base: &Value, next: &Value) {
        self.forward.push(Patch::Replace {
            path: path.clone(),
            value: next.clone(),
        });
        self.inverse.push(Patch::Replace {
            path,
            value: base.clone(),
        });
    }
}

/// Emit the minimal edits turning `base` into `next` below `path`.
pub(crate) fn diff(base: &Value, next: &Value, path: &Path, out: &mut PatchPair) {
    if Value::ptr_eq(base, next) {
        return;
    }
    match (base, next) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, previous) in old.iter() {
                let child = path.child(key.as_str());
                match new.get(key) {
                    Some(current) => diff(previous, current, &child, out),
                    None => {
                        out.forward.push(Patch::Remove {
                            path: child.clone(),
                        });
                        out.inverse.push(Patch::Add {
                            path: child,
                            value: previous.clone(),
                        });
                    }
                }
            }
            for (key, current) in new.iter() {
                if !old.contains_key(key) {
                    let child = path.child(key.as_str());
                    out.forward.push(Patch::Add {
                        path: child.clone(),
                        value: current.clone(),
                    });
                    out.inverse.push(Patch::Remove { path: child });
                }
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            let common = old.len().min(new.len());
            for i in 0..common {
                diff(&old[i], &new[i], &path.child(i), out);
            }
            // Appended slots go in ascending order; their inverse removes
            // from the tail first so indices stay valid.
            for (i, current) in new.iter().enumerate().skip(common) {
                out.forward.push(Patch::Add {
                    path: path.child(i),
                    value: current.clone(),
                });
            }
            for i in (common..new.len()).rev() {
                out.inverse.push(Patch::Remove {
                    path: path.child(i),
                });
            }
            // Truncated slots mirror the above.
            for i in (common..old.len()).rev() {
                out.forward.push(Patch::Remove {
                    path: path.child(i),
                });
            }
            for (i, previous) in old.iter().enumerate().skip(common) {
                out.inverse.push(Patch::Add {
                    path: path.child(i),
                    value: previous.clone(),
                });
            }
        }
        _ => out.replace(path.clone(), base, next),
    }
}

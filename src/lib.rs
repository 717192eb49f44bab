//! Draftwise: immutable context updates for state machines
//!
//! Contexts are persistent [`Value`]s. Updates are written as recipes that
//! edit a short-lived [`Draft`]; the result shares every untouched subtree
//! with the previous context, and the previous context is never mutated.
//!
//! # Core Concepts
//!
//! - **Recipes**: imperative edits applied to a draft via [`produce`]
//! - **Actions**: `(context, event) -> context` functions built by [`assign`]
//!   (recipe runs inline) or [`assign_from_patch`] (replays precomputed patches)
//! - **Patch events**: [`make_patch_event`] turns a recipe into serializable
//!   forward and inverse [`Patch`] lists, computed against a snapshot
//! - **Machines**: a small engine in [`machine`] that runs actions on transitions
//!
//! # Example
//!
//! ```rust
//! use draftwise::{assign, Event, Value};
//! use serde_json::json;
//!
//! let increment = assign(|draft, _| {
//!     let count = draft.get("count").and_then(Value::as_i64).unwrap_or(0);
//!     draft.set("count", count + 1)?;
//!     Ok(())
//! });
//!
//! let context = Value::from(json!({"count": 0, "log": []}));
//! let next = increment(&context, &Event::new("INC")).unwrap();
//!
//! assert_eq!(next.get("count"), Some(&Value::from(1)));
//! assert_eq!(context.get("count"), Some(&Value::from(0)));
//! assert!(Value::ptr_eq(next.get("log").unwrap(), context.get("log").unwrap()));
//! ```

pub mod action;
pub mod checkpoint;
pub mod core;
pub mod draft;
pub mod machine;
pub mod patch;
pub mod value;

// Re-export commonly used types
pub use action::{
    assign, assign_from_patch, assign_from_patch_with, from_fn, make_patch_event, Action,
    ActionError, Event, PatchEvent,
};
pub use draft::{produce, produce_with_patches, Draft, Produced, RecipeError};
pub use patch::{
    apply_patches, replay_patches, validate_patches, ConflictPolicy, Patch, PatchConflict, Replay,
};
pub use value::{Map, Path, PathError, PathSegment, Value};

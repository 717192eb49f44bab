//! A small state machine engine whose context is a persistent [`Value`].
//!
//! Transitions carry [`Action`](crate::action::Action)s, so both the direct
//! and the patch-replaying adapters plug in unchanged.
//!
//! # Example
//!
//! ```rust
//! use draftwise::machine::{interpret, MachineBuilder, TransitionBuilder};
//! use draftwise::{make_patch_event, state_enum, Value};
//! use serde_json::json;
//!
//! state_enum! {
//!     enum Form {
//!         Editing,
//!     }
//! }
//!
//! let machine = MachineBuilder::new()
//!     .initial(Form::Editing)
//!     .context(json!({"name": "", "age": null}))
//!     .transition(TransitionBuilder::new().from(Form::Editing).on("UPDATE").assign_from_patch())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut service = interpret(machine);
//! let snapshot = service.context().clone();
//! let event = make_patch_event("UPDATE", &snapshot, |d| Ok(d.set("name", "David")?)).unwrap();
//! service.send(event).unwrap();
//!
//! assert_eq!(service.context(), &Value::from(json!({"name": "David", "age": null})));
//! ```
//!
//! [`Value`]: crate::value::Value

mod builder;
mod error;
mod interpreter;
mod machine;
mod macros;

pub use builder::{MachineBuilder, TransitionBuilder};
pub use error::{BuildError, TransitionError};
pub use interpreter::{interpret, Interpreter};
pub use machine::{Machine, MachineState, Transition};

//! Core state machine types.
//!
//! This module contains the pure pieces of the bundled engine:
//! - State definitions via the `State` trait
//! - Guard predicates over context and event
//! - Immutable history of taken transitions
//!
//! Nothing here performs I/O or mutates shared data.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;

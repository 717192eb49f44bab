//! The `State` trait for finite state values.
//!
//! States are the discrete half of a machine state; the context carries the
//! data half.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for the finite states of a machine.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: states are compared to select transitions
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states are stored in checkpoints
///
/// # Example
///
/// ```rust
/// use draftwise::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Form {
///     Editing,
///     Submitted,
/// }
///
/// impl State for Form {
///     fn name(&self) -> &str {
///         match self {
///             Self::Editing => "Editing",
///             Self::Submitted => "Submitted",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Submitted)
///     }
/// }
///
/// assert!(Form::Submitted.is_final());
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Final states accept no further events.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Editing,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Editing => "Editing",
                Self::Done => "Done",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Editing.name(), "Editing");
        assert_eq!(TestState::Done.name(), "Done");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Idle.is_final());
        assert!(!TestState::Editing.is_final());
        assert!(TestState::Done.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&TestState::Editing).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Editing);
    }
}

//! Guard predicates for transitions.

use crate::action::Event;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Pure predicate over the current context and the incoming event.
///
/// A transition whose guard rejects the pair is not taken.
///
/// # Example
///
/// ```rust
/// use draftwise::core::Guard;
/// use draftwise::{Event, Value};
/// use serde_json::json;
///
/// let below_limit = Guard::new(|ctx: &Value, _: &Event| {
///     ctx.get("count").and_then(Value::as_i64).unwrap_or(0) < 3
/// });
///
/// let inc = Event::new("INC");
/// assert!(below_limit.check(&Value::from(json!({"count": 2})), &inc));
/// assert!(!below_limit.check(&Value::from(json!({"count": 3})), &inc));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Value, &Event) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Event) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    pub fn check(&self, context: &Value, event: &Event) -> bool {
        (self.predicate)(context, event)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guard_reads_context() {
        let guard = Guard::new(|ctx: &Value, _: &Event| {
            ctx.get("ready").and_then(Value::as_bool) == Some(true)
        });
        let event = Event::new("GO");

        assert!(guard.check(&Value::from(json!({"ready": true})), &event));
        assert!(!guard.check(&Value::from(json!({"ready": false})), &event));
        assert!(!guard.check(&Value::Null, &event));
    }

    #[test]
    fn guard_reads_event_payload() {
        let guard = Guard::new(|_: &Value, event: &Event| {
            event.data.as_str().is_some_and(|s| !s.is_empty())
        });
        let context = Value::object();

        assert!(guard.check(&context, &Event::new("SET").with_data("x")));
        assert!(!guard.check(&context, &Event::new("SET").with_data("")));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|ctx: &Value, _: &Event| ctx.is_null());
        let event = Event::new("E");
        assert_eq!(
            guard.check(&Value::Null, &event),
            guard.check(&Value::Null, &event)
        );
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|_: &Value, event: &Event| event.kind == "OK");
        let copy = guard.clone();
        assert!(copy.check(&Value::Null, &Event::new("OK")));
    }
}

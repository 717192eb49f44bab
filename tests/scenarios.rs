//! End-to-end scenarios: actions running inside an interpreted machine.

use draftwise::machine::{interpret, MachineBuilder, TransitionBuilder, TransitionError};
use draftwise::{
    assign, make_patch_event, state_enum, ActionError, ConflictPolicy, Event, Value,
};
use serde_json::json;

state_enum! {
    enum Screen {
        Active,
    }
}

state_enum! {
    enum Form {
        Editing,
        Success,
    }
    final: [Success]
}

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn increment_from_original_state_is_pure() {
    let increment = assign(|draft, _| {
        let count = draft.get("count").and_then(Value::as_i64).unwrap_or(0);
        draft.set("count", count + 1)?;
        Ok(())
    });
    let machine = MachineBuilder::new()
        .id("counter")
        .initial(Screen::Active)
        .context(json!({"count": 0}))
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("INC")
                .action(increment),
        )
        .unwrap()
        .build()
        .unwrap();

    let initial = machine.initial_state();
    let once = machine.transition(&initial, &Event::new("INC")).unwrap();
    let again = machine.transition(&initial, &Event::new("INC")).unwrap();

    assert_eq!(once.context, value(json!({"count": 1})));
    assert_eq!(again.context, value(json!({"count": 1})));
    assert_eq!(initial.context, value(json!({"count": 0})));
}

#[test]
fn actions_on_one_transition_see_each_other() {
    let increment = assign(|draft, _| {
        let count = draft.get("count").and_then(Value::as_i64).unwrap_or(0);
        draft.set("count", count + 1)?;
        Ok(())
    });
    let push_baz = assign(|draft, _| {
        draft.push("foo.bar.baz", 0)?;
        Ok(())
    });
    let machine = MachineBuilder::new()
        .initial(Screen::Active)
        .context(json!({"count": 0, "foo": {"bar": {"baz": [1, 2, 3]}}}))
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("INC_TWICE")
                .action(increment.clone())
                .action(increment),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("PUSH_TWICE")
                .action(push_baz.clone())
                .action(push_baz),
        )
        .unwrap()
        .build()
        .unwrap();

    let initial = machine.initial_state();
    let counted = machine.transition(&initial, &Event::new("INC_TWICE")).unwrap();
    let pushed = machine.transition(&initial, &Event::new("PUSH_TWICE")).unwrap();

    assert_eq!(counted.context.get("count"), Some(&Value::from(2)));
    assert_eq!(
        pushed.context.get("foo"),
        Some(&value(json!({"bar": {"baz": [1, 2, 3, 0, 0]}})))
    );
    assert_eq!(
        initial.context,
        value(json!({"count": 0, "foo": {"bar": {"baz": [1, 2, 3]}}}))
    );
    assert!(Value::ptr_eq(
        counted.context.get("foo").unwrap(),
        initial.context.get("foo").unwrap()
    ));
}

#[test]
fn deep_append_twice_leaves_original_untouched() {
    let machine = MachineBuilder::new()
        .initial(Screen::Active)
        .context(json!({"foo": {"bar": {"baz": [1, 2, 3]}}}))
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("PUSH")
                .assign(|draft, _| {
                    draft.push("foo.bar.baz", 0)?;
                    Ok(())
                }),
        )
        .unwrap()
        .build()
        .unwrap();

    let initial = machine.initial_state();
    let once = machine.transition(&initial, &Event::new("PUSH")).unwrap();
    let twice = machine.transition(&once, &Event::new("PUSH")).unwrap();

    assert_eq!(
        twice.context,
        value(json!({"foo": {"bar": {"baz": [1, 2, 3, 0, 0]}}}))
    );
    assert_eq!(
        initial.context,
        value(json!({"foo": {"bar": {"baz": [1, 2, 3]}}}))
    );
    assert_eq!(
        once.context,
        value(json!({"foo": {"bar": {"baz": [1, 2, 3, 0]}}}))
    );
}

#[test]
fn form_patches_replay_against_live_context() {
    let machine = MachineBuilder::new()
        .id("form")
        .initial(Form::Editing)
        .context(json!({"name": "", "age": null}))
        .transition(
            TransitionBuilder::new()
                .from(Form::Editing)
                .on("UPDATE")
                .assign_from_patch(),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(Form::Editing)
                .on("SUBMIT")
                .to(Form::Success)
                .when(|ctx: &Value, _: &Event| {
                    ctx.get("name").and_then(Value::as_str) == Some("David")
                        && ctx.get("age").and_then(Value::as_i64) == Some(42)
                }),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut service = interpret(machine);

    // Both events are computed from the same, soon stale, snapshot.
    let snapshot = service.context().clone();
    let set_name = make_patch_event("UPDATE", &snapshot, |draft| {
        draft.set("name", "David")?;
        Ok(())
    })
    .unwrap();
    let set_age = make_patch_event("UPDATE", &snapshot, |draft| {
        draft.set("age", 42)?;
        Ok(())
    })
    .unwrap();

    // The guard holds back submission until both fields are in.
    service.send(set_name).unwrap();
    assert!(matches!(
        service.send("SUBMIT"),
        Err(TransitionError::NoTransition { .. })
    ));
    service.send(set_age).unwrap();

    assert_eq!(service.context(), &value(json!({"name": "David", "age": 42})));
    assert_eq!(snapshot, value(json!({"name": "", "age": null})));

    service.send("SUBMIT").unwrap();
    assert!(service.is_final());
    assert!(service.state().matches(&Form::Success));
    assert_eq!(service.history().events(), vec!["UPDATE", "UPDATE", "SUBMIT"]);
}

#[test]
fn patch_event_survives_the_wire() {
    let snapshot = value(json!({"todos": [{"text": "a", "done": false}]}));
    let event = make_patch_event("TOGGLE", &snapshot, |draft| {
        draft.set("todos.0.done", true)?;
        Ok(())
    })
    .unwrap();

    let wire = serde_json::to_string(&event).unwrap();
    let received: Event = serde_json::from_str(&wire).unwrap();

    let next = draftwise::assign_from_patch()(&snapshot, &received).unwrap();
    assert_eq!(next, value(json!({"todos": [{"text": "a", "done": true}]})));
}

#[test]
fn plain_event_to_patch_action_is_rejected() {
    let machine = MachineBuilder::new()
        .initial(Screen::Active)
        .context(json!({"name": ""}))
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("UPDATE")
                .assign_from_patch(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut service = interpret(machine);

    let err = service.send("UPDATE").unwrap_err();
    assert_eq!(
        err,
        TransitionError::ActionFailed {
            from: "Active".into(),
            event: "UPDATE".into(),
            source: ActionError::MissingPatches {
                event: "UPDATE".into()
            },
        }
    );
    assert_eq!(service.context(), &value(json!({"name": ""})));
    assert!(service.history().events().is_empty());
}

#[test]
fn strict_replay_rejects_stale_structure() {
    let machine = MachineBuilder::new()
        .initial(Screen::Active)
        .context(json!({"tags": ["a", "b"]}))
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("EDIT")
                .assign_from_patch_with(ConflictPolicy::Abort),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(Screen::Active)
                .on("CLEAR")
                .assign(|draft, _| {
                    draft.set("tags", Value::array())?;
                    Ok(())
                }),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut service = interpret(machine);

    let snapshot = service.context().clone();
    let edit = make_patch_event("EDIT", &snapshot, |draft| {
        draft.set("tags.1", "B")?;
        Ok(())
    })
    .unwrap();

    service.send("CLEAR").unwrap();
    let err = service.send(edit).unwrap_err();
    assert!(matches!(
        err,
        TransitionError::ActionFailed {
            source: ActionError::Conflict(_),
            ..
        }
    ));
    assert_eq!(service.context(), &value(json!({"tags": []})));
}

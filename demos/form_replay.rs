//! Form Patch Replay
//!
//! A form editor computes patch events from whatever snapshot it rendered,
//! then sends them to a running machine. The machine replays each patch
//! list against its live context, so edits computed from the same stale
//! snapshot still compose.
//!
//! Run with: cargo run --example form_replay

use draftwise::machine::{interpret, MachineBuilder, TransitionBuilder};
use draftwise::{make_patch_event, state_enum, Value};
use serde_json::json;

state_enum! {
    enum FormState {
        Editing,
        Submitted,
    }
    final: [Submitted]
}

fn main() {
    println!("=== Form Patch Replay Example ===\n");

    let machine = MachineBuilder::new()
        .id("profile-form")
        .initial(FormState::Editing)
        .context(json!({"name": "", "age": null, "tags": []}))
        .transition(
            TransitionBuilder::new()
                .from(FormState::Editing)
                .on("UPDATE")
                .assign_from_patch(),
        )
        .expect("valid transition")
        .transition(
            TransitionBuilder::new()
                .from(FormState::Editing)
                .on("SUBMIT")
                .to(FormState::Submitted)
                .when(|ctx: &Value, _| ctx.get("name").and_then(Value::as_str) != Some("")),
        )
        .expect("valid transition")
        .build()
        .expect("valid machine");

    let mut service = interpret(machine);
    let snapshot = service.context().clone();
    println!("Snapshot: {}", snapshot);

    let events = vec![
        make_patch_event("UPDATE", &snapshot, |d| Ok(d.set("name", "David")?)),
        make_patch_event("UPDATE", &snapshot, |d| Ok(d.set("age", 42)?)),
        make_patch_event("UPDATE", &snapshot, |d| Ok(d.push("tags", "admin")?)),
    ];

    for event in events {
        let event = event.expect("recipe applies to snapshot");
        println!(
            "\nSending {} with patches {}",
            event.kind,
            serde_json::to_string(&event.patches).unwrap_or_default()
        );
        let state = service.send(event).expect("transition succeeds");
        println!("Context: {}", state.context);
    }

    match service.send("SUBMIT") {
        Ok(state) => println!("\nSubmitted: {:?}", state.value),
        Err(err) => println!("\nSubmit rejected: {}", err),
    }

    println!("\nSnapshot is unchanged: {}", snapshot);
    println!("Events handled: {:?}", service.history().events());
}

//! Dialog Walkthrough
//!
//! This example walks a small dialog tree and prints every notification the
//! underlying state machine emits.
//!
//! Key concepts:
//! - Dialog trees loaded from JSON
//! - Nodes as states, edges as transition events
//! - Observing `enter-<node>` and `after-<edge>` notifications
//! - Queuing a follow-up transition from a hook
//!
//! Run with: cargo run --example dialog_walkthrough

use dialog_fsm::core::hook;
use dialog_fsm::dialog::{DialogError, DialogMachine, DialogTree};
use dialog_fsm::emitter::handler;
use dialog_fsm::machine::Notification;
use std::sync::Arc;

const TREE: &str = r#"{
  "start": "intro",
  "nodes": [
    { "id": "intro", "content": { "message": "Good Job!", "speaker": "John", "text": "What would you like to do?" } },
    { "id": "home", "content": { "speaker": "John", "text": "Heading home then." } },
    { "id": "road", "content": { "speaker": "John", "text": "Onwards!" } },
    { "id": "camp", "content": { "speaker": "John", "text": "We made camp for the night." } }
  ],
  "edges": [
    { "id": "go-home", "from_node": "intro", "to_node": "home", "content": "Go home" },
    { "id": "carry-on", "from_node": "intro", "to_node": "road", "content": "Carry on" },
    { "id": "nightfall", "from_node": "road", "to_node": "camp", "content": "" }
  ]
}"#;

fn main() -> Result<(), DialogError> {
    println!("=== Dialog Walkthrough ===\n");

    let mut dialog = DialogMachine::new(DialogTree::from_json(TREE)?);

    let print = handler(|name: &str, note: &Notification| {
        println!(
            "  [{name}] previous={:?} state={:?}",
            note.previous, note.state
        );
    });
    for name in ["start", "enter", "after"] {
        dialog.machine_mut().on(name, Arc::clone(&print));
    }

    // The road always leads to camp.
    dialog.machine_mut().hooks_mut().on_after = Some(hook(|ctx| {
        if ctx.current() == Some("road") {
            ctx.trigger("nightfall");
        }
        Ok(())
    }));

    dialog.start()?;
    show(&dialog);

    println!("\nChoosing \"Carry on\"");
    dialog.activate_edge("carry-on")?;
    show(&dialog);

    println!("\nTransition path: {:?}", dialog.machine().history().path());
    println!("\n=== Example Complete ===");
    Ok(())
}

fn show(dialog: &DialogMachine) {
    let Some(view) = dialog.dialog() else {
        println!("(no dialog)");
        return;
    };
    if !view.message.is_empty() {
        println!("{}", view.message);
    }
    println!("{}: {}", view.speaker, view.text);
    for (i, option) in view.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.text);
    }
}

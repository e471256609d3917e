//! Branching dialog on top of the state machine.
//!
//! A [`DialogTree`] is plain data loaded from JSON. A [`DialogMachine`]
//! turns it into a running [`StateMachine`](crate::machine::StateMachine)
//! and answers "what is on screen now" and "which choices are available".

mod error;
mod interpreter;
mod tree;

pub use error::DialogError;
pub use interpreter::{DialogMachine, DialogOption, DialogView};
pub use tree::{DialogEdge, DialogNode, DialogTree, NodeContent};

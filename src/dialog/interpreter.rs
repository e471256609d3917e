//! Dialog-tree interpreter backed by the state machine.

use crate::builder::MachineConfig;
use crate::core::{Source, StateDef};
use crate::dialog::error::DialogError;
use crate::dialog::tree::{DialogNode, DialogTree};
use crate::machine::{StateMachine, TransitionEvent};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One selectable choice of the current node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DialogOption {
    pub text: String,
    /// Id of the edge to pass to [`DialogMachine::activate_edge`].
    pub edge: String,
}

/// What should be shown for the current node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DialogView {
    pub message: String,
    pub text: String,
    pub speaker: String,
    pub options: Vec<DialogOption>,
}

/// Walks a [`DialogTree`].
///
/// Every node becomes a state and every edge a transition event named by the
/// edge id, so observers registered on [`machine_mut`](Self::machine_mut)
/// see `enter-<node>` and `after-<edge>` as the player moves through the
/// dialog.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::dialog::{DialogMachine, DialogTree};
///
/// let tree = DialogTree::from_json(r#"{
///     "start": "greet",
///     "nodes": [
///         { "id": "greet", "content": { "speaker": "Mary", "text": "Hi!" } },
///         { "id": "end", "content": { "text": "See you." } }
///     ],
///     "edges": [ { "id": "bye", "from_node": "greet", "to_node": "end", "content": "Bye" } ]
/// }"#).unwrap();
///
/// let mut dialog = DialogMachine::new(tree);
/// dialog.start().unwrap();
/// assert_eq!(dialog.dialog().unwrap().options[0].text, "Bye");
///
/// assert!(dialog.activate_edge("bye").unwrap());
/// assert_eq!(dialog.dialog().unwrap().text, "See you.");
/// ```
#[derive(Debug)]
pub struct DialogMachine {
    tree: DialogTree,
    node_index: HashMap<String, usize>,
    edge_index: HashMap<String, usize>,
    outgoing: HashMap<String, Vec<usize>>,
    fsm: StateMachine,
}

impl DialogMachine {
    pub fn new(tree: DialogTree) -> Self {
        let node_index: HashMap<String, usize> = tree
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();

        let mut edge_index = HashMap::new();
        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, edge) in tree.edges.iter().enumerate() {
            edge_index.insert(edge.id.clone(), index);
            outgoing.entry(edge.from_node.clone()).or_default().push(index);
        }

        let config = MachineConfig {
            initial: Some(tree.start.clone()),
            states: node_index
                .keys()
                .map(|id| (id.clone(), StateDef::new()))
                .collect(),
            events: tree
                .edges
                .iter()
                .map(|edge| {
                    TransitionEvent::new(
                        edge.id.clone(),
                        Source::state(edge.from_node.clone()),
                        edge.to_node.clone(),
                    )
                })
                .collect(),
            ..MachineConfig::default()
        };

        debug!(
            nodes = tree.nodes.len(),
            edges = tree.edges.len(),
            "dialog tree indexed"
        );

        Self {
            tree,
            node_index,
            edge_index,
            outgoing,
            fsm: StateMachine::new(config),
        }
    }

    /// Enter the tree's start node, restarting if already running.
    pub fn start(&mut self) -> Result<&mut Self, DialogError> {
        self.fsm.start()?;
        Ok(self)
    }

    pub fn current_node(&self) -> Option<&DialogNode> {
        let id = self.fsm.state()?;
        self.node_index.get(id).map(|&index| &self.tree.nodes[index])
    }

    /// Content and choices of the current node, or `None` before start.
    pub fn dialog(&self) -> Option<DialogView> {
        let node = self.current_node()?;
        let options = self
            .outgoing
            .get(&node.id)
            .map(|edges| {
                edges
                    .iter()
                    .map(|&index| {
                        let edge = &self.tree.edges[index];
                        DialogOption {
                            text: edge.content.clone(),
                            edge: edge.id.clone(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(DialogView {
            message: node.content.message.clone(),
            text: node.content.text.clone(),
            speaker: node.content.speaker.clone(),
            options,
        })
    }

    /// Follow an edge leaving the current node.
    ///
    /// Returns `Ok(false)` for unknown edges and for edges that leave some
    /// other node.
    pub fn activate_edge(&mut self, edge_id: &str) -> Result<bool, DialogError> {
        if !self.edge_index.contains_key(edge_id) {
            debug!(edge = edge_id, "unknown dialog edge");
            return Ok(false);
        }
        Ok(self.fsm.trigger(edge_id)?)
    }

    pub fn tree(&self) -> &DialogTree {
        &self.tree
    }

    pub fn machine(&self) -> &StateMachine {
        &self.fsm
    }

    /// Mutable access for registering observers and hooks.
    pub fn machine_mut(&mut self) -> &mut StateMachine {
        &mut self.fsm
    }
}

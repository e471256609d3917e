//! Dialog tree data.
//!
//! Nodes carry what is shown on screen, edges carry the choices leading from
//! one node to the next. Ids may be written as JSON strings or integers and
//! are always handled as strings.

use crate::dialog::error::DialogError;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeContent {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub speaker: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogNode {
    #[serde(deserialize_with = "id_from_json")]
    pub id: String,
    #[serde(default)]
    pub content: NodeContent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogEdge {
    #[serde(deserialize_with = "id_from_json")]
    pub id: String,
    #[serde(deserialize_with = "id_from_json")]
    pub from_node: String,
    #[serde(deserialize_with = "id_from_json")]
    pub to_node: String,
    /// Choice text offered for this edge.
    #[serde(default)]
    pub content: String,
}

/// A complete dialog graph.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::dialog::DialogTree;
///
/// let tree = DialogTree::from_json(r#"{
///     "start": 1,
///     "nodes": [
///         { "id": 1, "content": { "speaker": "John", "text": "Hello" } },
///         { "id": 2, "content": { "text": "Bye" } }
///     ],
///     "edges": [ { "id": "e1", "from_node": 1, "to_node": 2, "content": "Leave" } ]
/// }"#).unwrap();
///
/// assert_eq!(tree.start, "1");
/// assert_eq!(tree.edges[0].to_node, "2");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DialogTree {
    #[serde(deserialize_with = "id_from_json")]
    pub start: String,
    #[serde(default)]
    pub nodes: Vec<DialogNode>,
    #[serde(default)]
    pub edges: Vec<DialogEdge>,
}

impl DialogTree {
    pub fn from_json(json: &str) -> Result<Self, DialogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, DialogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

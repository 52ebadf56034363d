use crate::graph::Position;
use serde::{Deserialize, Serialize};

/// The serialized form of a graph, as stored by the host page.
///
/// ```
/// use fa_traversal::graph::{Graph, GraphRecord};
///
/// let json = r#"{
///     "nodes": [{"top": 10, "left": 20, "i": true}, {"top": "10", "left": "120", "f": true}],
///     "edges": [{"start": 0, "end": 1, "weight": "a"}]
/// }"#;
/// let record: GraphRecord = serde_json::from_str(json).unwrap();
/// let graph = Graph::try_from(record).unwrap();
/// assert_eq!(graph.num_states(), 2);
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct GraphRecord {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    /// Select shorthand traversal (multi-symbol labels are tracked as edge progress).
    #[serde(default)]
    pub shorthand: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Coordinate>,
    #[serde(rename = "i", default, skip_serializing_if = "is_false")]
    pub initial: bool,
    #[serde(rename = "f", default, skip_serializing_if = "is_false")]
    pub accepting: bool,
    #[serde(rename = "stateLabel", default, skip_serializing_if = "Option::is_none")]
    pub state_label: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start: usize,
    pub end: usize,
    /// Missing weight means a lambda transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

/// A layout coordinate. The host page stores these either as numbers or as strings.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(value) => Some(*value),
            Coordinate::Text(text) => text.trim().trim_end_matches("px").parse().ok(),
        }
    }
}

impl NodeRecord {
    pub fn position(&self) -> Option<Position> {
        let top = self.top.as_ref()?.value()?;
        let left = self.left.as_ref()?.value()?;
        Some(Position { top, left })
    }
}

impl EdgeRecord {
    pub fn new(start: usize, end: usize, weight: Option<&str>) -> EdgeRecord {
        EdgeRecord {
            start,
            end,
            weight: weight.map(str::to_string),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

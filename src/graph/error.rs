use crate::graph::StateId;
use thiserror::Error;

/// Reasons why a serialized graph cannot be turned into a [`crate::graph::Graph`].
///
/// All of these are detected before any traversal starts.
#[derive(Debug, Error)]
pub enum MalformedGraphError {
    #[error("cannot parse graph record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("graph has no initial state")]
    MissingInitialState,
    #[error("graph has more than one initial state ({first} and {second})")]
    MultipleInitialStates { first: StateId, second: StateId },
    #[error("edge #{edge} references node {node}, but the graph only has {num_states} nodes")]
    EdgeOutOfRange {
        edge: usize,
        node: usize,
        num_states: usize,
    },
}

//! The structural model of a finite accepter.
//!
//! A [`Graph`] is built once from a serialized [`GraphRecord`] (see [`Graph::from_json`]) and
//! is immutable afterwards. Simulation annotations (current, accepted, rejected) never live
//! here; see [`crate::render::Annotations`].

mod error;
mod label;
mod serialized;


pub use error::MalformedGraphError;
pub use label::{EPSILON, LAMBDA, Label, normalize_weight};
pub use serialized::{Coordinate, EdgeRecord, GraphRecord, NodeRecord};

use log::debug;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Identifies a state of a [`Graph`]. States are numbered in the order of the serialized nodes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateId(pub usize);

/// Identifies a transition of a [`Graph`].
///
/// One serialized edge can produce several transitions (one per `<br>` separated label).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub usize);

/// An unordered set of states. Ordered storage keeps logs and snapshots stable.
pub type StateSet = BTreeSet<StateId>;

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl Display for TransitionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Layout hint carried over from the serialized node. The core never interprets it.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    id: StateId,
    name: String,
    state_label: Option<String>,
    is_initial: bool,
    is_final: bool,
    position: Option<Position>,
    outgoing: Vec<TransitionId>,
}

impl State {
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Display name of the state (`q0`, `q1`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form label attached to the state in the serialized graph.
    pub fn state_label(&self) -> Option<&str> {
        self.state_label.as_deref()
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Outgoing transitions in the order they were declared.
    pub fn outgoing(&self) -> &[TransitionId] {
        &self.outgoing
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    id: TransitionId,
    source: StateId,
    target: StateId,
    label: Label,
    /// Index of the serialized edge this transition was read from, if any.
    edge: Option<usize>,
}

impl Transition {
    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn edge(&self) -> Option<usize> {
        self.edge
    }
}

/// An immutable finite accepter: states, labeled transitions and a single initial state.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    states: Vec<State>,
    transitions: Vec<Transition>,
    initial: StateId,
    shorthand: bool,
}

impl Graph {
    /// Parse a serialized graph record and build the [`Graph`].
    pub fn from_json(json: &str) -> Result<Graph, MalformedGraphError> {
        let record: GraphRecord = serde_json::from_str(json)?;
        Graph::try_from(record)
    }

    /// Build a graph from serialized nodes and edges.
    ///
    /// Fails if there is not exactly one initial node or if an edge references a node that does
    /// not exist. Nothing is constructed on failure.
    pub fn build(
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
    ) -> Result<Graph, MalformedGraphError> {
        let mut initial: Option<StateId> = None;
        let mut states = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            let id = StateId(i);
            if node.initial {
                if let Some(first) = initial {
                    return Err(MalformedGraphError::MultipleInitialStates { first, second: id });
                }
                initial = Some(id);
            }
            states.push(State {
                id,
                name: id.to_string(),
                state_label: node.state_label.clone(),
                is_initial: node.initial,
                is_final: node.accepting,
                position: node.position(),
                outgoing: Vec::new(),
            });
        }

        let Some(initial) = initial else {
            return Err(MalformedGraphError::MissingInitialState);
        };

        let mut transitions = Vec::new();
        for (i, edge) in edges.iter().enumerate() {
            for node in [edge.start, edge.end] {
                if node >= states.len() {
                    return Err(MalformedGraphError::EdgeOutOfRange {
                        edge: i,
                        node,
                        num_states: states.len(),
                    });
                }
            }

            let labels = match &edge.weight {
                Some(weight) => Label::parse_weight(weight),
                None => vec![Label::Lambda],
            };

            for label in labels {
                let id = TransitionId(transitions.len());
                states[edge.start].outgoing.push(id);
                transitions.push(Transition {
                    id,
                    source: StateId(edge.start),
                    target: StateId(edge.end),
                    label,
                    edge: Some(i),
                });
            }
        }

        debug!(
            "Built graph with {} states and {} transitions (initial={initial}).",
            states.len(),
            transitions.len()
        );

        Ok(Graph {
            states,
            transitions,
            initial,
            shorthand: false,
        })
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.0]
    }

    /// Outgoing transitions of `state`, in declaration order.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.state(state)
            .outgoing
            .iter()
            .map(move |id| self.transition(*id))
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.state(state).is_final
    }

    pub fn final_states(&self) -> StateSet {
        self.states
            .iter()
            .filter(|it| it.is_final)
            .map(|it| it.id)
            .collect()
    }

    /// True if the serialized graph asked for shorthand (collapsed path) traversal.
    pub fn is_shorthand(&self) -> bool {
        self.shorthand
    }

    /// Build the equivalent graph in which every [`Label::Path`] transition is replaced by a
    /// chain of single-symbol transitions through fresh, non-final intermediate states.
    ///
    /// Original states keep their identifiers. The result is never marked as shorthand.
    pub fn expand_paths(&self) -> Graph {
        let mut states: Vec<State> = self
            .states
            .iter()
            .map(|it| State {
                outgoing: Vec::new(),
                ..it.clone()
            })
            .collect();
        let mut transitions: Vec<Transition> = Vec::new();

        let mut push = |states: &mut Vec<State>,
                        source: StateId,
                        target: StateId,
                        label: Label,
                        edge: Option<usize>| {
            let id = TransitionId(transitions.len());
            states[source.0].outgoing.push(id);
            transitions.push(Transition {
                id,
                source,
                target,
                label,
                edge,
            });
        };

        for transition in &self.transitions {
            let Label::Path(symbols) = &transition.label else {
                push(
                    &mut states,
                    transition.source,
                    transition.target,
                    transition.label.clone(),
                    transition.edge,
                );
                continue;
            };

            let mut source = transition.source;
            for (k, symbol) in symbols.iter().enumerate() {
                let target = if k + 1 == symbols.len() {
                    transition.target
                } else {
                    let id = StateId(states.len());
                    states.push(State {
                        id,
                        name: format!("{}.{}", transition.id, k + 1),
                        state_label: None,
                        is_initial: false,
                        is_final: false,
                        position: None,
                        outgoing: Vec::new(),
                    });
                    id
                };
                push(
                    &mut states,
                    source,
                    target,
                    Label::Symbol(*symbol),
                    transition.edge,
                );
                source = target;
            }
        }

        Graph {
            states,
            transitions,
            initial: self.initial,
            shorthand: false,
        }
    }
}

impl TryFrom<GraphRecord> for Graph {
    type Error = MalformedGraphError;

    fn try_from(value: GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = Graph::build(&value.nodes, &value.edges)?;
        graph.shorthand = value.shorthand;
        Ok(graph)
    }
}

impl TryFrom<&GraphRecord> for Graph {
    type Error = MalformedGraphError;

    fn try_from(value: &GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = Graph::build(&value.nodes, &value.edges)?;
        graph.shorthand = value.shorthand;
        Ok(graph)
    }
}

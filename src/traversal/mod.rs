//! Nondeterministic traversal of an input string over a [`Graph`].
//!
//! # Modes
//!
//! - **Exact**: every transition consumes exactly one symbol (or none, for lambda transitions).
//!   Path labels never match.
//! - **Shorthand**: a transition can carry a collapsed path of several symbols. Such a
//!   transition is tracked as an [`EdgeCursor`] until its whole label is consumed, at which
//!   point its target joins the active states. Acceptance is identical to an exact traversal
//!   of the graph returned by [`Graph::expand_paths`].
//!
//! # Type Aliases
//!
//! - [`ExactTraversal`]: traversal computation using [`ExactStep`].
//! - [`ShorthandTraversal`]: traversal computation using [`ShorthandStep`].
//!
//! Both consume one input symbol per computation step and record a [`Step`] snapshot for
//! every consumed symbol.
//!
//! # Example
//!
//! ```
//! use fa_traversal::graph::Graph;
//! use fa_traversal::traversal::{ExactTraversal, TraversalConfig};
//! use computation_process::Algorithm;
//!
//! let graph = Graph::from_json(r#"{
//!     "nodes": [{"i": true}, {"f": true}],
//!     "edges": [{"start": 0, "end": 1, "weight": "a"}]
//! }"#).unwrap();
//!
//! let run = ExactTraversal::run(TraversalConfig::new(graph), "a").unwrap();
//! assert!(run.is_accepted());
//! ```

mod consume_input;
mod exact;
mod shorthand;
mod traversal_config;
mod traversal_state;

#[cfg(test)]
mod tests;

use crate::closure::initial_closure;
use crate::graph::{EPSILON, Graph, LAMBDA, StateSet, TransitionId};
use cancel_this::Cancellable;
use computation_process::{Algorithm, Computation};
use std::collections::BTreeSet;

pub use consume_input::ConsumeInput;
pub use exact::ExactStep;
pub use shorthand::ShorthandStep;
pub use traversal_config::{TraversalConfig, TraversalMode};
pub use traversal_state::{Step, TraversalRun, TraversalState};

/// Single-symbol exact step: `step(active, symbol) -> next active`.
pub use exact::step as step_exact;
/// Single-symbol shorthand step: `step(frontier, symbol) -> next frontier`.
pub use shorthand::step as step_shorthand;

/// A helper alias for a traversal driven by the [`SymbolStep`] operator `S`.
pub type TraversalComputation<S> =
    Computation<TraversalConfig, TraversalState, TraversalRun, ConsumeInput<S>>;

/// Traversal where every transition consumes at most one symbol.
pub type ExactTraversal = TraversalComputation<ExactStep>;

/// Traversal that tracks progress along multi-symbol (collapsed path) labels.
pub type ShorthandTraversal = TraversalComputation<ShorthandStep>;

/// A transition whose label is partially consumed.
///
/// `consumed` is the number of label symbols already matched, i.e. the index of the next
/// expected symbol. A cursor only exists while `consumed` is below the label length.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeCursor {
    pub transition: TransitionId,
    pub consumed: usize,
}

/// Everything the automaton "is doing" after a prefix of the input: the active states and
/// (in shorthand mode) the transitions that are still in flight.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frontier {
    pub states: StateSet,
    pub edges: BTreeSet<EdgeCursor>,
}

impl Frontier {
    /// The frontier before any input is consumed: lambda-closure of the initial state.
    pub fn initial(graph: &Graph) -> Frontier {
        Frontier {
            states: initial_closure(graph),
            edges: BTreeSet::new(),
        }
    }

    /// An empty frontier means the consumed prefix is rejected.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.edges.is_empty()
    }

    /// Number of active states plus in-flight edge cursors.
    pub fn size(&self) -> usize {
        self.states.len() + self.edges.len()
    }

    /// Distinct transitions that are currently in flight.
    pub fn active_edges(&self) -> BTreeSet<TransitionId> {
        self.edges.iter().map(|it| it.transition).collect()
    }

    /// True if at least one active state is final. In-flight edges never accept.
    pub fn is_accepting(&self, graph: &Graph) -> bool {
        self.states.iter().any(|it| graph.is_final(*it))
    }
}

impl From<StateSet> for Frontier {
    fn from(value: StateSet) -> Self {
        Frontier {
            states: value,
            edges: BTreeSet::new(),
        }
    }
}

/// Final outcome of a traversal. Rejection is a normal result, not an error.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// Consumes one input symbol over a [`Frontier`].
///
/// Implementors are stateless; [`ConsumeInput`] iterates them over the whole input.
pub trait SymbolStep {
    const MODE: TraversalMode;

    fn step(graph: &Graph, frontier: &Frontier, symbol: char) -> Cancellable<Frontier>;
}

/// Run the traversal selected by `config.mode` on `input` to completion.
pub fn traverse(config: &TraversalConfig, input: &str) -> Cancellable<TraversalRun> {
    match config.mode {
        TraversalMode::Exact => ExactTraversal::run(config.clone(), input),
        TraversalMode::Shorthand => ShorthandTraversal::run(config.clone(), input),
    }
}

/// Split an input string into symbols. A string consisting of exactly one lambda (or epsilon)
/// glyph stands for the empty input.
pub fn normalize_input(input: &str) -> Vec<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(LAMBDA | EPSILON), None) => Vec::new(),
        _ => input.chars().collect(),
    }
}

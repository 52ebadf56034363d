use crate::graph::Graph;

/// Which traversal algorithm drives a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalMode {
    #[default]
    Exact,
    Shorthand,
}

/// A "flat" configuration object for a traversal run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalConfig {
    /// The automaton being traversed.
    pub graph: Graph,
    /// Traversal algorithm (default: shorthand if the graph was serialized with
    /// `shorthand: true`, exact otherwise).
    pub mode: TraversalMode,
    /// Cancel the run if the number of active states plus in-flight edges exceeds this
    /// bound (default: `usize::MAX`).
    pub max_active_states: usize,
}

impl From<Graph> for TraversalConfig {
    fn from(value: Graph) -> Self {
        TraversalConfig::new(value)
    }
}

impl From<&Graph> for TraversalConfig {
    fn from(value: &Graph) -> Self {
        TraversalConfig::new(value.clone())
    }
}

impl TraversalConfig {
    /// Create a new [`TraversalConfig`], picking the mode requested by the graph.
    pub fn new(graph: Graph) -> TraversalConfig {
        let mode = if graph.is_shorthand() {
            TraversalMode::Shorthand
        } else {
            TraversalMode::Exact
        };
        TraversalConfig {
            graph,
            mode,
            max_active_states: usize::MAX,
        }
    }

    pub fn with_mode(mut self, mode: TraversalMode) -> TraversalConfig {
        self.mode = mode;
        self
    }
}

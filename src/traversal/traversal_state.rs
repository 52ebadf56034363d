use crate::graph::{Graph, StateSet, TransitionId};
use crate::traversal::{EdgeCursor, Frontier, TraversalMode, Verdict, normalize_input};
use std::collections::BTreeSet;

/// One recorded point of a traversal: the frontier after `consumed` input symbols.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    consumed: usize,
    symbol: Option<char>,
    frontier: Frontier,
}

impl Step {
    pub(crate) fn initial(frontier: Frontier) -> Step {
        Step {
            consumed: 0,
            symbol: None,
            frontier,
        }
    }

    pub(crate) fn after(index: usize, symbol: char, frontier: Frontier) -> Step {
        Step {
            consumed: index + 1,
            symbol: Some(symbol),
            frontier,
        }
    }

    /// Number of input symbols consumed up to (and including) this step.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Index of the input symbol consumed by this step (`None` for the initial step).
    pub fn symbol_index(&self) -> Option<usize> {
        self.consumed.checked_sub(1)
    }

    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn states(&self) -> &StateSet {
        &self.frontier.states
    }

    pub fn edges(&self) -> &BTreeSet<EdgeCursor> {
        &self.frontier.edges
    }

    pub fn active_edges(&self) -> BTreeSet<TransitionId> {
        self.frontier.active_edges()
    }
}

/// Mutable state of a running traversal.
///
/// The frontier is computed lazily by the first computation step (it needs the graph, which
/// lives in the configuration).
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalState {
    pub(crate) input: Vec<char>,
    pub(crate) frontier: Option<Frontier>,
    pub(crate) steps: Vec<Step>,
    pub(crate) failed_at: Option<usize>,
}

impl From<Vec<char>> for TraversalState {
    fn from(value: Vec<char>) -> Self {
        TraversalState {
            input: value,
            frontier: None,
            steps: Vec::new(),
            failed_at: None,
        }
    }
}

impl From<&str> for TraversalState {
    fn from(value: &str) -> Self {
        TraversalState::from(normalize_input(value))
    }
}

impl From<String> for TraversalState {
    fn from(value: String) -> Self {
        TraversalState::from(value.as_str())
    }
}

impl TraversalState {
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// Steps recorded so far.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of input symbols consumed so far.
    pub fn consumed(&self) -> usize {
        self.steps.last().map(|it| it.consumed).unwrap_or(0)
    }

    /// True once the input is exhausted or the frontier became empty.
    pub fn is_finished(&self) -> bool {
        match &self.frontier {
            None => false,
            Some(frontier) => frontier.is_empty() || self.consumed() >= self.input.len(),
        }
    }

    pub(crate) fn finish(&self, graph: &Graph, mode: TraversalMode) -> TraversalRun {
        let accepting = self
            .frontier
            .as_ref()
            .is_some_and(|it| it.is_accepting(graph));
        let verdict = if self.failed_at.is_none() && accepting {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        };
        TraversalRun {
            mode,
            input: self.input.clone(),
            steps: self.steps.clone(),
            verdict,
            failed_at: self.failed_at,
        }
    }
}

/// The complete, immutable record of one traversal.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalRun {
    mode: TraversalMode,
    input: Vec<char>,
    steps: Vec<Step>,
    verdict: Verdict,
    failed_at: Option<usize>,
}

impl TraversalRun {
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// The initial step followed by one step per consumed symbol. If the run was rejected
    /// mid-input, the last step is the one that consumed the failing symbol.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Index of the input symbol after which no state or edge remained active.
    pub fn failed_at(&self) -> Option<usize> {
        self.failed_at
    }

    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// States active at the end of the run (empty if the run failed mid-input).
    pub fn final_states(&self) -> StateSet {
        self.last_step()
            .map(|it| it.states().clone())
            .unwrap_or_default()
    }
}

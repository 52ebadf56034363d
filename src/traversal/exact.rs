use crate::closure::lambda_closure;
use crate::graph::{Graph, Label, StateSet};
use crate::traversal::{Frontier, SymbolStep, TraversalMode};
use cancel_this::{Cancellable, is_cancelled};
use log::trace;

/// Follows every transition labeled exactly with the consumed symbol.
pub struct ExactStep;

/// Union the targets of all `symbol` transitions leaving `states` and close the result under
/// lambda transitions. An empty result means the prefix is rejected.
pub fn step(graph: &Graph, states: &StateSet, symbol: char) -> Cancellable<StateSet> {
    let mut reached = StateSet::new();
    for state in states {
        is_cancelled!()?;
        for transition in graph.transitions_from(*state) {
            if transition.label() == &Label::Symbol(symbol) {
                trace!("Matched `{symbol}` on {state} -> {}.", transition.target());
                reached.insert(transition.target());
            }
        }
    }
    Ok(lambda_closure(graph, &reached))
}

impl SymbolStep for ExactStep {
    const MODE: TraversalMode = TraversalMode::Exact;

    fn step(graph: &Graph, frontier: &Frontier, symbol: char) -> Cancellable<Frontier> {
        step(graph, &frontier.states, symbol).map(Frontier::from)
    }
}

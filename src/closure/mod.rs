//! Lambda-closure: everything reachable from a set of states without consuming input.


use crate::graph::{Graph, StateSet};
use crate::log_states;
use log::trace;

/// Compute the smallest superset of `states` that is closed under lambda transitions.
///
/// Each state is expanded at most once, so lambda cycles terminate.
///
/// # Panics
///
/// Panics if `states` contains a state that does not belong to `graph`.
pub fn lambda_closure(graph: &Graph, states: &StateSet) -> StateSet {
    let mut closure = StateSet::new();
    let mut stack: Vec<_> = states.iter().copied().collect();

    while let Some(state) = stack.pop() {
        if !closure.insert(state) {
            continue;
        }

        for transition in graph.transitions_from(state) {
            if transition.label().is_lambda() && !closure.contains(&transition.target()) {
                trace!("Lambda {} -> {}.", state, transition.target());
                stack.push(transition.target());
            }
        }
    }

    if closure.len() > states.len() {
        trace!(
            "Lambda closure grew from {} to ({}).",
            states.len(),
            log_states(&closure)
        );
    }

    closure
}

/// Lambda-closure of the initial state; the active set before any input is consumed.
pub fn initial_closure(graph: &Graph) -> StateSet {
    lambda_closure(graph, &StateSet::from([graph.initial_state()]))
}

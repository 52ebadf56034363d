use crate::closure::lambda_closure;
use crate::graph::{Graph, StateSet};
use crate::traversal::{EdgeCursor, Frontier, SymbolStep, TraversalMode};
use cancel_this::{Cancellable, is_cancelled};
use log::trace;
use std::collections::BTreeSet;

/// Follows single-symbol transitions and advances progress along collapsed path labels.
pub struct ShorthandStep;

/// Consume `symbol` from `frontier`.
///
/// In-flight cursors whose next expected symbol is `symbol` advance; a cursor that reaches the
/// end of its label contributes its target to the next active states. Every active state also
/// starts each outgoing transition whose label begins with `symbol`: single-symbol labels
/// complete immediately, longer ones become new cursors. Both branches are taken when a state
/// has both kinds. The reached states are closed under lambda transitions.
///
/// An empty result (no states, no cursors) means the prefix is rejected.
pub fn step(graph: &Graph, frontier: &Frontier, symbol: char) -> Cancellable<Frontier> {
    let mut reached = StateSet::new();
    let mut edges = BTreeSet::new();

    let mut advance = |cursor: EdgeCursor| {
        let transition = graph.transition(cursor.transition);
        let symbols = transition.label().symbols();
        if symbols.get(cursor.consumed) != Some(&symbol) {
            return;
        }

        let consumed = cursor.consumed + 1;
        if consumed == symbols.len() {
            trace!(
                "Completed `{}` on {} -> {}.",
                transition.label(),
                transition.source(),
                transition.target()
            );
            reached.insert(transition.target());
        } else {
            trace!(
                "Advanced `{}` on {} to {consumed}/{}.",
                transition.label(),
                transition.id(),
                symbols.len()
            );
            edges.insert(EdgeCursor {
                transition: cursor.transition,
                consumed,
            });
        }
    };

    for cursor in &frontier.edges {
        is_cancelled!()?;
        advance(*cursor);
    }

    for state in &frontier.states {
        is_cancelled!()?;
        for transition in graph.transitions_from(*state) {
            advance(EdgeCursor {
                transition: transition.id(),
                consumed: 0,
            });
        }
    }

    Ok(Frontier {
        states: lambda_closure(graph, &reached),
        edges,
    })
}

impl SymbolStep for ShorthandStep {
    const MODE: TraversalMode = TraversalMode::Shorthand;

    fn step(graph: &Graph, frontier: &Frontier, symbol: char) -> Cancellable<Frontier> {
        step(graph, frontier, symbol)
    }
}

use crate::traversal::traversal_state::Step;
use crate::traversal::{Frontier, SymbolStep, TraversalConfig, TraversalRun, TraversalState};
use crate::{log_states, simple_type_name};
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, info};
use std::marker::PhantomData;

/// A helper implementation of [`ComputationStep`] that feeds the input to a [`SymbolStep`]
/// operator one symbol at a time, recording a [`Step`] after each symbol.
///
/// The first call records the initial frontier. The computation completes once the input is
/// exhausted or the frontier becomes empty.
pub struct ConsumeInput<S: SymbolStep>(PhantomData<S>);

impl<S: SymbolStep> ComputationStep<TraversalConfig, TraversalState, TraversalRun>
    for ConsumeInput<S>
{
    fn step(context: &TraversalConfig, state: &mut TraversalState) -> Completable<TraversalRun> {
        let Some(frontier) = &state.frontier else {
            let frontier = Frontier::initial(&context.graph);
            debug!(
                "[0/{}] {} starts in ({}).",
                state.input.len(),
                simple_type_name::<S>(),
                log_states(&frontier.states)
            );
            state.steps.push(Step::initial(frontier.clone()));
            state.frontier = Some(frontier);
            return Err(Suspended);
        };

        let position = state.consumed();
        if state.is_finished() {
            let run = state.finish(&context.graph, S::MODE);
            info!(
                "{} finished after {}/{} symbols: {:?}.",
                simple_type_name::<S>(),
                position,
                state.input.len(),
                run.verdict()
            );
            return Ok(run);
        }

        let symbol = state.input[position];
        let next = S::step(&context.graph, frontier, symbol)?;

        if next.size() > context.max_active_states {
            debug!(
                "[{}/{}] {} canceled (exceeded active state count).",
                position + 1,
                state.input.len(),
                simple_type_name::<S>()
            );

            return Err(Cancelled::new("TraversalConfig::max_active_states").into());
        }

        if next.is_empty() {
            debug!(
                "[{}/{}] {} rejected `{symbol}`.",
                position + 1,
                state.input.len(),
                simple_type_name::<S>()
            );
            state.failed_at = Some(position);
        } else {
            debug!(
                "[{}/{}] {} consumed `{symbol}` into ({}; edges={}).",
                position + 1,
                state.input.len(),
                simple_type_name::<S>(),
                log_states(&next.states),
                next.edges.len()
            );
        }

        state.steps.push(Step::after(position, symbol, next.clone()));
        state.frontier = Some(next);
        Err(Suspended)
    }
}

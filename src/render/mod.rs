//! What an external renderer needs to draw one point of a traversal.
//!
//! The graph is never annotated in place. Instead, every [`Frame`] carries an [`Annotations`]
//! map keyed by state and transition identity, rebuilt from the recorded
//! [`TraversalRun`] for the requested position.


use crate::graph::{Graph, StateId, StateSet, TransitionId};
use crate::traversal::{TraversalRun, Verdict};
use std::collections::BTreeMap;

/// Display status of one input symbol.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SymbolStatus {
    Pending,
    Matched,
    Rejected,
    Accepted,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StateMark {
    Current,
    Rejected,
    Accepted,
}

/// Transient marks for one frame. Keys always belong to the traversed graph.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Annotations {
    pub states: BTreeMap<StateId, StateMark>,
    /// In-flight transitions and how many label symbols each entry has consumed.
    pub edges: BTreeMap<TransitionId, Vec<usize>>,
}

impl Annotations {
    pub fn state(&self, state: StateId) -> Option<StateMark> {
        self.states.get(&state).copied()
    }

    fn mark_all(&mut self, states: &StateSet, mark: StateMark) {
        for state in states {
            self.states.insert(*state, mark);
        }
    }
}

/// One renderable point of a traversal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    /// Playback position of this frame.
    pub position: usize,
    /// Input symbols consumed at this point.
    pub consumed: usize,
    pub annotations: Annotations,
    pub symbols: Vec<SymbolStatus>,
    /// Only present on the final (verdict) frame.
    pub verdict: Option<Verdict>,
}

/// Receives frames produced during playback. Implemented by the host renderer.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

impl RenderSink for Vec<Frame> {
    fn render(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}

impl Frame {
    /// Build the frame at `position` of `run`, which must be a traversal of `graph`.
    ///
    /// Positions `0..run.steps().len()` show the recorded steps; the position right after
    /// the last step shows the verdict. Larger positions are clamped to the verdict frame.
    pub fn at(graph: &Graph, run: &TraversalRun, position: usize) -> Frame {
        let steps = run.steps();
        if position >= steps.len() {
            return Frame::verdict(graph, run, steps.len());
        }

        let step = &steps[position];
        let mut annotations = Annotations::default();
        let mut symbols = vec![SymbolStatus::Pending; run.input().len()];
        for status in symbols.iter_mut().take(step.consumed()) {
            *status = SymbolStatus::Matched;
        }

        match step.symbol_index().filter(|it| Some(*it) == run.failed_at()) {
            Some(failing) => {
                symbols[failing] = SymbolStatus::Rejected;
                if let Some(previous) = position.checked_sub(1).map(|it| &steps[it]) {
                    annotations.mark_all(previous.states(), StateMark::Rejected);
                }
            }
            None => annotations.mark_all(step.states(), StateMark::Current),
        }

        for cursor in step.edges() {
            annotations
                .edges
                .entry(cursor.transition)
                .or_default()
                .push(cursor.consumed);
        }

        Frame {
            position,
            consumed: step.consumed(),
            annotations,
            symbols,
            verdict: None,
        }
    }

    fn verdict(graph: &Graph, run: &TraversalRun, position: usize) -> Frame {
        let len = run.input().len();
        let consumed = run.last_step().map(|it| it.consumed()).unwrap_or(0);
        let mut annotations = Annotations::default();
        let mut symbols = vec![SymbolStatus::Pending; len];
        for status in symbols.iter_mut().take(consumed) {
            *status = SymbolStatus::Matched;
        }

        match run.verdict() {
            Verdict::Accepted => {
                if let Some(last) = symbols.last_mut() {
                    *last = SymbolStatus::Accepted;
                }
                for state in run.final_states() {
                    if graph.is_final(state) {
                        annotations.states.insert(state, StateMark::Accepted);
                    }
                }
            }
            Verdict::Rejected => {
                let from = run.failed_at().unwrap_or(len.saturating_sub(1));
                for status in symbols.iter_mut().skip(from) {
                    *status = SymbolStatus::Rejected;
                }
                let last_active = run
                    .steps()
                    .iter()
                    .rev()
                    .find(|it| !it.states().is_empty())
                    .map(|it| it.states().clone())
                    .unwrap_or_default();
                annotations.mark_all(&last_active, StateMark::Rejected);
            }
        }

        Frame {
            position,
            consumed,
            annotations,
            symbols,
            verdict: Some(run.verdict()),
        }
    }
}

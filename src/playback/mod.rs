//! Forward/backward replay of a finished traversal.
//!
//! A [`Playback`] never recomputes anything; it only moves a cursor over the frames of an
//! already recorded [`TraversalRun`]. There is one frame per recorded step plus a trailing
//! verdict frame.


use crate::graph::Graph;
use crate::render::{Frame, RenderSink};
use crate::traversal::{Step, TraversalRun};
use log::trace;

#[derive(Clone, Debug)]
pub struct Playback {
    graph: Graph,
    run: TraversalRun,
    position: usize,
}

impl Playback {
    /// Start a playback of `run` (a traversal of `graph`) at the initial step.
    pub fn new(graph: Graph, run: TraversalRun) -> Playback {
        Playback {
            graph,
            run,
            position: 0,
        }
    }

    pub fn run(&self) -> &TraversalRun {
        &self.run
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of frames: recorded steps plus the verdict frame.
    pub fn len(&self) -> usize {
        self.run.steps().len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.len()
    }

    /// The recorded step at the current position, or `None` on the verdict frame.
    pub fn current_step(&self) -> Option<&Step> {
        self.run.steps().get(self.position)
    }

    /// Move one frame forward. Returns `false` (and does nothing) on the last frame.
    pub fn forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        trace!("Playback forward to {}/{}.", self.position, self.len() - 1);
        true
    }

    /// Move one frame backward. Returns `false` (and does nothing) on the first frame.
    pub fn backward(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.position -= 1;
        trace!("Playback backward to {}/{}.", self.position, self.len() - 1);
        true
    }

    /// Single-step until the current position equals `position`, or the boundary in that
    /// direction is reached. Returns the final position.
    pub fn jump_to(&mut self, position: usize) -> usize {
        while self.position < position && self.forward() {}
        while self.position > position && self.backward() {}
        self.position
    }

    /// Jump to the frame showing the state right after input symbol `index` was consumed.
    pub fn jump_to_symbol(&mut self, index: usize) -> usize {
        self.jump_to(index + 1)
    }

    pub fn rewind(&mut self) {
        self.jump_to(0);
    }

    /// Frame at the current position.
    pub fn frame(&self) -> Frame {
        Frame::at(&self.graph, &self.run, self.position)
    }

    /// Push the current frame to `sink`.
    pub fn replay<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.render(&self.frame());
    }

    /// Push every frame from the start to `sink` without moving the cursor.
    pub fn replay_all<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for position in 0..self.len() {
            sink.render(&Frame::at(&self.graph, &self.run, position));
        }
    }
}

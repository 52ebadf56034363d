//! A simulation session: one graph, at most one traversal run at a time.


use crate::graph::{Graph, MalformedGraphError};
use crate::playback::Playback;
use crate::traversal::{TraversalConfig, TraversalMode, traverse};
use cancel_this::Cancellable;
use log::info;

pub struct Simulation {
    config: TraversalConfig,
    playback: Option<Playback>,
}

impl Simulation {
    pub fn new<C: Into<TraversalConfig>>(config: C) -> Simulation {
        Simulation {
            config: config.into(),
            playback: None,
        }
    }

    /// Parse a serialized graph and open a session for it.
    pub fn from_json(json: &str) -> Result<Simulation, MalformedGraphError> {
        Ok(Simulation::new(Graph::from_json(json)?))
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.config.graph
    }

    pub fn mode(&self) -> TraversalMode {
        self.config.mode
    }

    /// Change the traversal mode. Discards the current run.
    pub fn set_mode(&mut self, mode: TraversalMode) {
        self.config.mode = mode;
        self.playback = None;
    }

    /// Traverse `input` from scratch, replacing any previous run, and return its playback
    /// positioned at the initial step.
    pub fn start(&mut self, input: &str) -> Cancellable<&mut Playback> {
        self.playback = None;
        let run = traverse(&self.config, input)?;
        info!(
            "Session run on {:?} ({} symbols): {:?}.",
            input,
            run.input().len(),
            run.verdict()
        );
        let playback = Playback::new(self.config.graph.clone(), run);
        Ok(self.playback.insert(playback))
    }

    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    pub fn playback_mut(&mut self) -> Option<&mut Playback> {
        self.playback.as_mut()
    }

    /// End the current run, discarding its history.
    pub fn reset(&mut self) {
        self.playback = None;
    }
}

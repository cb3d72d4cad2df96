use self::{
    observer::MoveLog,
    scram::ScramStrategy,
    seek::SeekStrategy,
    state::{NodeId, ScramState, SeekState},
};
use crate::{error::Result, graphs::WeightedDigraph};

pub mod observer;
pub mod scram;
pub mod seek;
pub mod state;

/// A player of both game phases.
pub trait SewerDiver {
    /// Must return exactly when standing on the target.
    fn seek<S: SeekState + ?Sized>(&mut self, state: &mut S) -> Result<()>;

    /// Must return exactly when standing on the exit, without ever running
    /// out of steps.
    fn scram<S>(&mut self, state: &mut S) -> Result<()>
    where
        S: ScramState + ?Sized,
        S::Graph: WeightedDigraph<Vertex = NodeId>;
}

/// Plays seek with [`SeekStrategy`] and scram with [`ScramStrategy`],
/// keeping a log of the moves of the latest run of each phase.
#[derive(Default)]
pub struct Diver {
    seek_strategy: SeekStrategy,
    scram_strategy: ScramStrategy<NodeId>,
    seek_log: MoveLog<NodeId>,
    scram_log: MoveLog<NodeId>,
}

impl Diver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seek_log(&self) -> &MoveLog<NodeId> {
        &self.seek_log
    }

    pub fn scram_log(&self) -> &MoveLog<NodeId> {
        &self.scram_log
    }
}

impl SewerDiver for Diver {
    fn seek<S: SeekState + ?Sized>(&mut self, state: &mut S) -> Result<()> {
        self.seek_log = MoveLog::new();
        self.seek_strategy.run(state, &mut self.seek_log)
    }

    fn scram<S>(&mut self, state: &mut S) -> Result<()>
    where
        S: ScramState + ?Sized,
        S::Graph: WeightedDigraph<Vertex = NodeId>,
    {
        self.scram_log = MoveLog::new();
        self.scram_strategy.run(state, &mut self.scram_log)
    }
}

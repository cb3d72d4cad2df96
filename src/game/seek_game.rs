use std::sync::Arc;

use log::debug;

use crate::{
    diver::state::{NodeId, NodeStatus, SeekState},
    error::{Error, Result},
    sewer::Sewer,
};

/// Seek phase of a game: the diver starts at the entrance and only sees its
/// neighbors and their Manhattan distance to the ring.
#[derive(Clone, Debug)]
pub struct SeekGame {
    sewer: Arc<Sewer>,
    position: NodeId,
    steps_taken: u32,
}

impl SeekGame {
    pub fn new(sewer: Arc<Sewer>) -> SeekGame {
        let position = sewer.entrance();
        SeekGame {
            sewer,
            position,
            steps_taken: 0,
        }
    }

    pub fn sewer(&self) -> &Sewer {
        &self.sewer
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn found_ring(&self) -> bool {
        self.position == self.sewer.ring()
    }

    fn heuristic(&self, id: NodeId) -> u32 {
        self.sewer.distance_to_ring(id).unwrap_or(u32::MAX)
    }
}

impl SeekState for SeekGame {
    fn current_location(&self) -> NodeId {
        self.position
    }

    fn neighbors(&self) -> Vec<NodeStatus> {
        self.sewer
            .neighbors(self.position)
            .map(|id| NodeStatus::new(id, self.heuristic(id)))
            .collect()
    }

    fn distance_to_target(&self) -> u32 {
        self.heuristic(self.position)
    }

    fn move_to(&mut self, id: NodeId) -> Result<()> {
        if self.sewer.edge_between(self.position, id).is_none() {
            return Err(Error::not_adjacent(&self.position, &id));
        }
        debug!("seek step {}: {} -> {}", self.steps_taken + 1, self.position, id);
        self.position = id;
        self.steps_taken += 1;
        Ok(())
    }
}

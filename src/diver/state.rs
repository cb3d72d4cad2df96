use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{error::Result, graphs::WeightedDigraph};

pub type NodeId = u64;

/// What the seek phase can see of one neighbor: its id and its grid (not
/// graph) distance to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeStatus {
    id: NodeId,
    distance_to_target: u32,
}

impl NodeStatus {
    pub fn new(id: NodeId, distance_to_target: u32) -> NodeStatus {
        NodeStatus {
            id,
            distance_to_target,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn distance_to_target(&self) -> u32 {
        self.distance_to_target
    }
}

// Closer to the target first, id on ties.
impl Ord for NodeStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_to_target
            .cmp(&other.distance_to_target)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for NodeStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Local view of an unknown graph while searching for the target. Nothing
/// beyond the current vertex and its neighbors is revealed.
pub trait SeekState {
    fn current_location(&self) -> NodeId;

    /// Every vertex one move away, each with its heuristic distance to the
    /// target.
    fn neighbors(&self) -> Vec<NodeStatus>;

    /// Heuristic distance from the current vertex to the target; zero exactly
    /// when standing on it.
    fn distance_to_target(&self) -> u32;

    /// Moves to the neighbor `id`. Fails with
    /// [`NotAdjacent`](crate::error::Error::NotAdjacent) otherwise.
    fn move_to(&mut self, id: NodeId) -> Result<()>;
}

/// Full view of the graph while heading for the exit under a step budget.
pub trait ScramState {
    type Graph: WeightedDigraph;

    fn graph(&self) -> &Self::Graph;

    fn current_vertex(&self) -> <Self::Graph as WeightedDigraph>::Vertex;

    fn exit_vertex(&self) -> <Self::Graph as WeightedDigraph>::Vertex;

    fn all_vertices(&self) -> Vec<<Self::Graph as WeightedDigraph>::Vertex>;

    /// Value still lying on `vertex`; zero once collected.
    fn value(&self, vertex: &<Self::Graph as WeightedDigraph>::Vertex) -> u32;

    fn remaining_budget(&self) -> u32;

    /// Moves along the edge to `vertex` and collects its value. Fails with
    /// [`NotAdjacent`](crate::error::Error::NotAdjacent) or
    /// [`BudgetExceeded`](crate::error::Error::BudgetExceeded) without
    /// changing anything.
    fn move_to(&mut self, vertex: &<Self::Graph as WeightedDigraph>::Vertex) -> Result<()>;
}

use ahash::{HashSet, HashSetExt};
use log::{debug, info};

use super::{
    observer::MoveObserver,
    state::{NodeId, SeekState},
};
use crate::{
    error::{Error, Result},
    queue::{heap_queue::HeapQueue, PriorityQueue},
};

/// Depth-first walk through an unknown graph, greedy on the heuristic.
///
/// At every vertex the unvisited neighbor closest to the target (by the
/// heuristic) is entered next. At a dead end the walk backs up along an
/// explicit stack of departed vertices, so depth is bounded by heap memory
/// and not by the call stack. Every reachable vertex is eventually visited,
/// so the target is found whenever it is reachable.
///
/// Backing up uses the edge that was just travelled in reverse, so every
/// move must be reversible (true for the sewer graphs, whose edges come in
/// pairs).
#[derive(Default)]
pub struct SeekStrategy {
    visited: HashSet<NodeId>,
    backtrack: Vec<NodeId>,
    frontier: HeapQueue<NodeId>,
    steps: usize,
}

impl SeekStrategy {
    pub fn new() -> Self {
        SeekStrategy {
            visited: HashSet::new(),
            backtrack: Vec::new(),
            frontier: HeapQueue::new(),
            steps: 0,
        }
    }

    /// Moves taken by the last run, backtracking included.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Walks until standing on the target and returns `Ok` only then. Fails
    /// with [`Error::TargetUnreachable`] once every reachable vertex has been
    /// visited without finding it.
    pub fn run<S>(&mut self, state: &mut S, observer: &mut dyn MoveObserver<NodeId>) -> Result<()>
    where
        S: SeekState + ?Sized,
    {
        self.visited.clear();
        self.backtrack.clear();
        self.steps = 0;

        loop {
            if state.distance_to_target() == 0 {
                info!("seek reached the target after {} steps", self.steps);
                return Ok(());
            }

            let here = state.current_location();
            self.visited.insert(here);

            let next = match self.closest_unvisited_neighbor(state)? {
                Some(next) => {
                    self.backtrack.push(here);
                    next
                }
                None => match self.backtrack.pop() {
                    Some(previous) => {
                        debug!("dead end at {}, backing up to {}", here, previous);
                        previous
                    }
                    None => return Err(Error::TargetUnreachable),
                },
            };

            state.move_to(next)?;
            self.steps += 1;
            observer.on_move(&here, &next);
        }
    }

    fn closest_unvisited_neighbor<S>(&mut self, state: &S) -> Result<Option<NodeId>>
    where
        S: SeekState + ?Sized,
    {
        self.frontier.clear();
        for neighbor in state.neighbors() {
            if self.visited.contains(&neighbor.id()) || self.frontier.contains(&neighbor.id()) {
                continue;
            }
            self.frontier
                .add(neighbor.id(), neighbor.distance_to_target() as f64)?;
        }

        match self.frontier.extract_min() {
            Ok(next) => Ok(Some(next)),
            Err(Error::EmptyQueue) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Searches for the target with a fresh [`SeekStrategy`].
pub fn seek<S: SeekState + ?Sized>(state: &mut S) -> Result<()> {
    SeekStrategy::new().run(state, &mut ())
}

#[cfg(test)]
mod tests {
    use super::{seek, SeekStrategy};
    use crate::{
        diver::{
            observer::MoveLog,
            state::{NodeId, NodeStatus, SeekState},
        },
        error::{Error, Result},
    };

    /// Graph given as adjacency lists; the heuristic is a lookup table.
    struct TableState {
        adjacency: Vec<Vec<NodeId>>,
        heuristic: Vec<u32>,
        position: NodeId,
    }

    impl SeekState for TableState {
        fn current_location(&self) -> NodeId {
            self.position
        }

        fn neighbors(&self) -> Vec<NodeStatus> {
            self.adjacency[self.position as usize]
                .iter()
                .map(|&id| NodeStatus::new(id, self.heuristic[id as usize]))
                .collect()
        }

        fn distance_to_target(&self) -> u32 {
            self.heuristic[self.position as usize]
        }

        fn move_to(&mut self, id: NodeId) -> Result<()> {
            if !self.adjacency[self.position as usize].contains(&id) {
                return Err(Error::not_adjacent(&self.position, &id));
            }
            self.position = id;
            Ok(())
        }
    }

    #[test]
    fn misleading_heuristic_backtracks() {
        // 1 looks closest but is a dead end; the target is 3 behind 2.
        let mut state = TableState {
            adjacency: vec![vec![1, 2], vec![0], vec![0, 3], vec![2]],
            heuristic: vec![3, 1, 2, 0],
            position: 0,
        };
        let mut log: MoveLog<NodeId> = MoveLog::new();
        let mut strategy = SeekStrategy::new();
        strategy.run(&mut state, &mut log).unwrap();

        assert_eq!(state.position, 3);
        assert_eq!(log.route(), vec![0, 1, 0, 2, 3]);
        assert_eq!(strategy.steps(), 4);
    }

    #[test]
    fn already_on_target() {
        let mut state = TableState {
            adjacency: vec![vec![]],
            heuristic: vec![0],
            position: 0,
        };
        assert_eq!(seek(&mut state), Ok(()));
    }

    #[test]
    fn exhausts_region_without_target() {
        let mut state = TableState {
            adjacency: vec![vec![1], vec![0, 2], vec![1]],
            heuristic: vec![4, 3, 2],
            position: 0,
        };
        assert_eq!(seek(&mut state), Err(Error::TargetUnreachable));
        assert_eq!(state.position, 0);
    }
}

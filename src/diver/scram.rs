use std::{collections::VecDeque, fmt::Debug, hash::Hash};

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use log::{debug, info};

use super::{observer::MoveObserver, state::ScramState};
use crate::{
    error::{Error, Result},
    graphs::{Distance, WeightedDigraph},
    queue::heap_queue::HeapQueue,
    search::dijkstra::ShortestPaths,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScramPhase<V> {
    PlanningDetour,
    MovingToValue(V),
    MovingToExit,
}

/// Heads for the exit within the step budget, detouring for the most
/// valuable vertex whose detour is still affordable.
///
/// Before every move the distances from the current vertex are recomputed.
/// A vertex `c` is affordable while
/// `distance(current, c) + distance(c, exit) <= remaining budget`. The check
/// is repeated at every vertex boundary; once it fails the strategy heads
/// for the exit for good. As long as the budget covers the distance to the
/// exit when the run starts, this invariant keeps it covered after every
/// move.
///
/// Distances from candidates to the exit are cached, so the graph must not
/// change during a run.
pub struct ScramStrategy<V> {
    phase: ScramPhase<V>,
    // Uncollected (value, vertex) pairs, most valuable first.
    candidates: Vec<(u32, V)>,
    visited: HashSet<V>,
    exit_distances: HashMap<V, Option<Distance>>,
    route: VecDeque<(V, Distance)>,
    route_goal: Option<V>,
}

impl<V: Clone + Eq + Hash + Debug> Default for ScramStrategy<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash + Debug> ScramStrategy<V> {
    pub fn new() -> Self {
        ScramStrategy {
            phase: ScramPhase::PlanningDetour,
            candidates: Vec::new(),
            visited: HashSet::new(),
            exit_distances: HashMap::new(),
            route: VecDeque::new(),
            route_goal: None,
        }
    }

    pub fn phase(&self) -> &ScramPhase<V> {
        &self.phase
    }

    /// Moves until standing on the exit with no affordable detour left, and
    /// returns `Ok` only there. The exit may be passed through, or be the
    /// starting vertex, while a detour is still under way.
    ///
    /// Fails with [`Error::BudgetExceeded`] before issuing any move if the
    /// exit is farther away than the remaining budget, and with
    /// [`Error::Unreachable`] if there is no path to the exit at all.
    pub fn run<S>(&mut self, state: &mut S, observer: &mut dyn MoveObserver<V>) -> Result<()>
    where
        S: ScramState + ?Sized,
        S::Graph: WeightedDigraph<Vertex = V>,
    {
        self.reset(state);
        let exit = state.exit_vertex();

        loop {
            let current = state.current_vertex();
            self.visited.insert(current.clone());
            let remaining = state.remaining_budget();

            let (next, cost) = {
                let graph = state.graph();
                let mut paths = ShortestPaths::new(graph);
                paths.single_source_distances(current.clone())?;

                let distance_to_exit = paths.get_distance(&exit)?;
                if distance_to_exit > remaining as Distance {
                    return Err(Error::BudgetExceeded {
                        cost: distance_to_exit as u32,
                        remaining,
                    });
                }

                let visited = &self.visited;
                self.candidates
                    .retain(|(_, vertex)| !visited.contains(vertex) && state.value(vertex) > 0);
                self.update_phase(graph, &paths, &exit, remaining as Distance)?;

                if current == exit && self.phase == ScramPhase::MovingToExit {
                    info!("scram reached the exit with {} steps left", remaining);
                    return Ok(());
                }

                self.next_step(graph, &paths, &exit)?
            };

            // Never asks the state for a move the budget cannot pay for,
            // even though the feasibility check above already rules it out.
            if cost > remaining as Distance {
                return Err(Error::BudgetExceeded {
                    cost: cost as u32,
                    remaining,
                });
            }
            state.move_to(&next)?;
            observer.on_move(&current, &next);
            debug!(
                "moved {:?} -> {:?}, {} steps left",
                current,
                next,
                state.remaining_budget()
            );
        }
    }

    fn reset<S>(&mut self, state: &S)
    where
        S: ScramState + ?Sized,
        S::Graph: WeightedDigraph<Vertex = V>,
    {
        self.phase = ScramPhase::PlanningDetour;
        self.visited.clear();
        self.exit_distances.clear();
        self.route.clear();
        self.route_goal = None;

        self.candidates = state
            .all_vertices()
            .into_iter()
            .filter_map(|vertex| {
                let value = state.value(&vertex);
                (value > 0).then_some((value, vertex))
            })
            .collect();
        // Stable, so equal values keep the order the state listed them in.
        self.candidates.sort_by(|a, b| b.0.cmp(&a.0));
    }

    fn update_phase<G>(
        &mut self,
        graph: &G,
        paths: &ShortestPaths<'_, G, HeapQueue<V>>,
        exit: &V,
        budget: Distance,
    ) -> Result<()>
    where
        G: WeightedDigraph<Vertex = V> + ?Sized,
    {
        if let ScramPhase::MovingToValue(target) = self.phase.clone() {
            if self.visited.contains(&target) {
                self.phase = ScramPhase::PlanningDetour;
            } else if !self.is_affordable(graph, paths, &target, exit, budget)? {
                debug!("detour to {:?} no longer affordable, heading for the exit", target);
                self.phase = ScramPhase::MovingToExit;
            }
        }

        if self.phase == ScramPhase::PlanningDetour {
            self.phase = match self.most_valuable_affordable(graph, paths, exit, budget)? {
                Some(target) => {
                    debug!("detouring to {:?}", target);
                    ScramPhase::MovingToValue(target)
                }
                None => {
                    debug!("no affordable detour left, heading for the exit");
                    ScramPhase::MovingToExit
                }
            };
        }

        Ok(())
    }

    fn most_valuable_affordable<G>(
        &mut self,
        graph: &G,
        paths: &ShortestPaths<'_, G, HeapQueue<V>>,
        exit: &V,
        budget: Distance,
    ) -> Result<Option<V>>
    where
        G: WeightedDigraph<Vertex = V> + ?Sized,
    {
        for index in 0..self.candidates.len() {
            let candidate = self.candidates[index].1.clone();
            if self.is_affordable(graph, paths, &candidate, exit, budget)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn is_affordable<G>(
        &mut self,
        graph: &G,
        paths: &ShortestPaths<'_, G, HeapQueue<V>>,
        candidate: &V,
        exit: &V,
        budget: Distance,
    ) -> Result<bool>
    where
        G: WeightedDigraph<Vertex = V> + ?Sized,
    {
        let Some(to_candidate) = paths.distance(candidate) else {
            return Ok(false);
        };
        if to_candidate > budget {
            return Ok(false);
        }
        let Some(to_exit) = self.exit_distance(graph, candidate, exit)? else {
            return Ok(false);
        };
        Ok(to_candidate + to_exit <= budget)
    }

    fn exit_distance<G>(&mut self, graph: &G, from: &V, exit: &V) -> Result<Option<Distance>>
    where
        G: WeightedDigraph<Vertex = V> + ?Sized,
    {
        if let Some(&distance) = self.exit_distances.get(from) {
            return Ok(distance);
        }

        let mut paths = ShortestPaths::new(graph);
        paths.single_source_distances(from.clone())?;
        let distance = paths.distance(exit);
        self.exit_distances.insert(from.clone(), distance);
        Ok(distance)
    }

    // The route to the current goal is planned once per goal and followed
    // edge by edge; every suffix of a shortest path is itself shortest.
    fn next_step<G>(
        &mut self,
        graph: &G,
        paths: &ShortestPaths<'_, G, HeapQueue<V>>,
        exit: &V,
    ) -> Result<(V, Distance)>
    where
        G: WeightedDigraph<Vertex = V> + ?Sized,
    {
        let goal = match &self.phase {
            ScramPhase::MovingToValue(target) => target.clone(),
            _ => exit.clone(),
        };

        if self.route.is_empty() || self.route_goal.as_ref() != Some(&goal) {
            self.route = paths
                .best_path(&goal)?
                .iter()
                .map(|edge| (graph.dest(edge), graph.weight(edge)))
                .collect();
            self.route_goal = Some(goal.clone());
        }

        self.route
            .pop_front()
            .ok_or_else(|| Error::unreachable(&goal))
    }
}

/// Heads for the exit with a fresh [`ScramStrategy`].
pub fn scram<S: ScramState + ?Sized>(state: &mut S) -> Result<()> {
    ScramStrategy::<<S::Graph as WeightedDigraph>::Vertex>::new().run(state, &mut ())
}

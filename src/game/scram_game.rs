use std::sync::Arc;

use ahash::HashMap;
use log::debug;

use crate::{
    diver::state::{NodeId, ScramState},
    error::{Error, Result},
    sewer::Sewer,
};

/// Scram phase of a game: full view of the sewer, a step budget, and coins
/// to pick up on the way to the exit.
///
/// Coins lying on a node are collected the first time the diver stands on
/// it, including the start node.
#[derive(Clone, Debug)]
pub struct ScramGame {
    sewer: Arc<Sewer>,
    position: NodeId,
    steps_left: u32,
    coins: HashMap<NodeId, u32>,
    coins_collected: u64,
}

impl ScramGame {
    pub fn new(sewer: Arc<Sewer>, start: NodeId, budget: u32) -> Result<ScramGame> {
        if sewer.tile(start).is_none() {
            return Err(Error::unreachable(&start));
        }
        let coins = sewer
            .nodes()
            .iter()
            .filter_map(|&id| {
                let coins = sewer.tile(id)?.coins();
                (coins > 0).then_some((id, coins))
            })
            .collect();

        let mut game = ScramGame {
            sewer,
            position: start,
            steps_left: budget,
            coins,
            coins_collected: 0,
        };
        game.grab_coins();
        Ok(game)
    }

    pub fn sewer(&self) -> &Sewer {
        &self.sewer
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    pub fn steps_left(&self) -> u32 {
        self.steps_left
    }

    pub fn coins_collected(&self) -> u64 {
        self.coins_collected
    }

    pub fn reached_exit(&self) -> bool {
        self.position == self.sewer.ring()
    }

    fn grab_coins(&mut self) {
        if let Some(coins) = self.coins.remove(&self.position) {
            debug!("picked up {} coins at {}", coins, self.position);
            self.coins_collected += coins as u64;
        }
    }
}

impl ScramState for ScramGame {
    type Graph = Sewer;

    fn graph(&self) -> &Sewer {
        &self.sewer
    }

    fn current_vertex(&self) -> NodeId {
        self.position
    }

    fn exit_vertex(&self) -> NodeId {
        self.sewer.ring()
    }

    fn all_vertices(&self) -> Vec<NodeId> {
        self.sewer.nodes().to_vec()
    }

    fn value(&self, vertex: &NodeId) -> u32 {
        self.coins.get(vertex).copied().unwrap_or(0)
    }

    fn remaining_budget(&self) -> u32 {
        self.steps_left
    }

    fn move_to(&mut self, vertex: &NodeId) -> Result<()> {
        let edge = self
            .sewer
            .edge_between(self.position, *vertex)
            .ok_or_else(|| Error::not_adjacent(&self.position, vertex))?;
        if edge.length() > self.steps_left {
            return Err(Error::BudgetExceeded {
                cost: edge.length(),
                remaining: self.steps_left,
            });
        }

        self.position = *vertex;
        self.steps_left -= edge.length();
        self.grab_coins();
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use super::Distance;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DirectedWeightedEdge<V> {
    tail: V,
    head: V,
    weight: Distance,
}

impl<V: Clone> DirectedWeightedEdge<V> {
    /// Returns `None` for a negative or non-finite weight.
    pub fn new(tail: V, head: V, weight: Distance) -> Option<DirectedWeightedEdge<V>> {
        if !weight.is_finite() || weight < 0.0 {
            return None;
        }

        Some(DirectedWeightedEdge { tail, head, weight })
    }

    pub fn tail(&self) -> &V {
        &self.tail
    }

    pub fn head(&self) -> &V {
        &self.head
    }

    pub fn weight(&self) -> Distance {
        self.weight
    }

    pub fn reversed(&self) -> DirectedWeightedEdge<V> {
        DirectedWeightedEdge {
            tail: self.head.clone(),
            head: self.tail.clone(),
            weight: self.weight,
        }
    }
}

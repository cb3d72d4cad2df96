use serde::{Deserialize, Serialize};

use crate::graphs::Distance;

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// distance of a shortest path, if there exists one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathTestCase<V> {
    pub request: ShortestPathRequest<V>,
    pub distance: Option<Distance>,
}

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathRequest<V> {
    pub source: V,
    pub target: V,
}

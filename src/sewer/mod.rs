use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

use self::tile::{Tile, TileType};
use crate::{
    diver::state::NodeId,
    error::{Error, Result},
    graphs::{Distance, WeightedDigraph},
    search::dijkstra::ShortestPaths,
};

pub mod format;
pub mod layout;
pub mod tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SewerEdge {
    tail: NodeId,
    head: NodeId,
    length: u32,
}

impl SewerEdge {
    pub fn new(tail: NodeId, head: NodeId, length: u32) -> SewerEdge {
        SewerEdge { tail, head, length }
    }

    pub fn tail(&self) -> NodeId {
        self.tail
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn length(&self) -> u32 {
        self.length
    }
}

/// A grid of tiles with a weighted graph over its open tiles.
///
/// Every open tile is a node, and edges run between orthogonally adjacent
/// open tiles. There is exactly one entrance, and a ring node which may be
/// the entrance itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sewer {
    rows: usize,
    cols: usize,
    entrance: NodeId,
    ring: NodeId,
    nodes: Vec<NodeId>,
    tiles: HashMap<NodeId, Tile>,
    exits: HashMap<NodeId, Vec<SewerEdge>>,
}

impl WeightedDigraph for Sewer {
    type Vertex = NodeId;
    type Edge = SewerEdge;

    fn out_edges(&self, vertex: &NodeId) -> Box<dyn Iterator<Item = SewerEdge> + '_> {
        Box::new(self.exits(*vertex).iter().copied())
    }

    fn source(&self, edge: &SewerEdge) -> NodeId {
        edge.tail
    }

    fn dest(&self, edge: &SewerEdge) -> NodeId {
        edge.head
    }

    fn weight(&self, edge: &SewerEdge) -> Distance {
        edge.length as Distance
    }
}

impl Sewer {
    /// Builds a sewer from its open tiles and edges. Fails if a tile lies
    /// off the grid or is a wall, if ids or positions repeat, if there is not
    /// exactly one entrance, if `ring` is not a node, or if an edge has an
    /// unknown endpoint. Edges must join orthogonally adjacent tiles and come
    /// in pairs, `a -> b` and `b -> a` with the same length.
    pub(crate) fn assemble(
        rows: usize,
        cols: usize,
        ring: NodeId,
        tiles: Vec<(NodeId, Tile)>,
        edges: Vec<SewerEdge>,
    ) -> std::result::Result<Sewer, String> {
        let mut positions = HashSet::new();
        let mut tile_map = HashMap::with_capacity(tiles.len());
        let mut entrances = Vec::new();

        for (id, tile) in tiles {
            if tile.row() >= rows || tile.col() >= cols {
                return Err(format!("node {} lies outside the {}x{} grid", id, rows, cols));
            }
            if !tile.tile_type().is_open() {
                return Err(format!("node {} is a wall", id));
            }
            if !positions.insert((tile.row(), tile.col())) {
                return Err(format!("two nodes share row {}, column {}", tile.row(), tile.col()));
            }
            if tile.tile_type() == TileType::Entrance {
                entrances.push(id);
            }
            if tile_map.insert(id, tile).is_some() {
                return Err(format!("node {} is defined twice", id));
            }
        }

        let entrance = match entrances.as_slice() {
            [entrance] => *entrance,
            _ => return Err(format!("expected one entrance, found {}", entrances.len())),
        };
        if !tile_map.contains_key(&ring) {
            return Err(format!("ring node {} does not exist", ring));
        }

        let mut exits: HashMap<NodeId, Vec<SewerEdge>> = HashMap::new();
        for edge in edges {
            for endpoint in [edge.tail, edge.head] {
                if !tile_map.contains_key(&endpoint) {
                    return Err(format!("edge references unknown node {}", endpoint));
                }
            }
            if tile_map[&edge.tail].manhattan_distance(&tile_map[&edge.head]) != 1 {
                return Err(format!(
                    "edge {} -> {} joins tiles that are not adjacent",
                    edge.tail, edge.head
                ));
            }
            exits.entry(edge.tail).or_default().push(edge);
        }

        for edge in exits.values().flatten() {
            let reverse = exits
                .get(&edge.head)
                .and_then(|back| back.iter().find(|back| back.head == edge.tail));
            if reverse.map(SewerEdge::length) != Some(edge.length) {
                return Err(format!(
                    "edge {} -> {} of length {} has no matching way back",
                    edge.tail, edge.head, edge.length
                ));
            }
        }

        let mut nodes: Vec<NodeId> = tile_map.keys().copied().collect();
        nodes.sort_unstable();

        Ok(Sewer {
            rows,
            cols,
            entrance,
            ring,
            nodes,
            tiles: tile_map,
            exits,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn entrance(&self) -> NodeId {
        self.entrance
    }

    pub fn ring(&self) -> NodeId {
        self.ring
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of open tiles, which is the size of the graph.
    pub fn open_tile_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn tile(&self, id: NodeId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.row() == row && tile.col() == col)
            .map(|(id, _)| *id)
    }

    pub fn exits(&self, id: NodeId) -> &[SewerEdge] {
        self.exits.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.exits(id).iter().map(SewerEdge::head)
    }

    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<SewerEdge> {
        self.exits(from).iter().find(|edge| edge.head == to).copied()
    }

    pub fn total_coins(&self) -> u64 {
        self.tiles.values().map(|tile| tile.coins() as u64).sum()
    }

    /// Manhattan distance from the node to the ring, ignoring walls.
    pub fn distance_to_ring(&self, id: NodeId) -> Option<u32> {
        let ring = self.tiles.get(&self.ring)?;
        Some(self.tiles.get(&id)?.manhattan_distance(ring))
    }

    /// Length of a shortest path from `from` to the ring.
    pub fn min_path_length_to_ring(&self, from: NodeId) -> Result<u32> {
        let mut paths = ShortestPaths::new(self);
        paths.single_source_distances(from)?;
        Ok(paths.get_distance(&self.ring)? as u32)
    }

    pub(crate) fn describe(&self) -> String {
        format!(
            "{}x{} sewer with {} open tiles",
            self.rows,
            self.cols,
            self.open_tile_count()
        )
    }

    pub(crate) fn require_node(&self, row: usize, col: usize) -> Result<NodeId> {
        self.node_at(row, col).ok_or(Error::NoOpenTile { row, col })
    }
}

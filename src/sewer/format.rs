//! Line oriented text format for sewers.
//!
//! The first line reads `rows:cols,trgt:<ring id>`. Every further line
//! describes one node as `id,row,col,coins,TYPE=other-length,...`, listing
//! its outgoing edges after the `=`.

use std::{fmt, str::FromStr};

use itertools::Itertools;

use super::{tile::Tile, Sewer, SewerEdge};
use crate::{
    diver::state::NodeId,
    error::{Error, Result},
};

impl fmt::Display for Sewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:{},trgt:{}", self.rows, self.cols, self.ring)?;
        for &id in &self.nodes {
            let Some(tile) = self.tiles.get(&id) else {
                continue;
            };
            let exits = self
                .exits(id)
                .iter()
                .map(|edge| format!("{}-{}", edge.head(), edge.length()))
                .join(",");
            writeln!(
                f,
                "{},{},{},{},{}={}",
                id,
                tile.row(),
                tile.col(),
                tile.coins(),
                tile.tile_type(),
                exits
            )?;
        }
        Ok(())
    }
}

impl FromStr for Sewer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Sewer> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| Error::parse(1, "missing header"))?;
        let (rows, cols, ring) =
            parse_header(header).map_err(|reason| Error::parse(header_line, reason))?;

        let mut tiles = Vec::new();
        let mut edges: Vec<(usize, SewerEdge)> = Vec::new();
        for (line, text) in lines {
            let (id, tile, exits) = parse_node(text).map_err(|reason| Error::parse(line, reason))?;
            tiles.push((id, tile));
            edges.extend(
                exits
                    .into_iter()
                    .map(|(head, length)| (line, SewerEdge::new(id, head, length))),
            );
        }

        let known: ahash::HashSet<NodeId> = tiles.iter().map(|(id, _)| *id).collect();
        if let Some((line, edge)) = edges.iter().find(|(_, edge)| !known.contains(&edge.head())) {
            return Err(Error::parse(
                *line,
                format!("edge to unknown node {}", edge.head()),
            ));
        }

        let edges = edges.into_iter().map(|(_, edge)| edge).collect();
        Sewer::assemble(rows, cols, ring, tiles, edges)
            .map_err(|reason| Error::parse(header_line, reason))
    }
}

impl Sewer {
    /// Parses the text format described in the module docs.
    pub fn from_text(text: &str) -> Result<Sewer> {
        text.parse()
    }

    /// Renders the text format read by [`Sewer::from_text`].
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

fn number<T: FromStr>(field: &str, what: &str) -> std::result::Result<T, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("invalid {} {:?}", what, field))
}

fn parse_header(header: &str) -> std::result::Result<(usize, usize, NodeId), String> {
    let (dimensions, target) = header
        .split_once(',')
        .ok_or_else(|| format!("malformed header {:?}", header))?;
    let (rows, cols) = dimensions
        .split_once(':')
        .ok_or_else(|| format!("malformed dimensions {:?}", dimensions))?;
    let ring = target
        .strip_prefix("trgt:")
        .ok_or_else(|| format!("malformed target {:?}", target))?;
    Ok((number(rows, "row count")?, number(cols, "column count")?, number(ring, "ring id")?))
}

type NodeLine = (NodeId, Tile, Vec<(NodeId, u32)>);

fn parse_node(text: &str) -> std::result::Result<NodeLine, String> {
    let (info, exits) = text
        .split_once('=')
        .ok_or_else(|| "missing '=' between node and edges".to_string())?;

    let fields: Vec<&str> = info.split(',').collect();
    let [id, row, col, coins, tile_type] = fields.as_slice() else {
        return Err(format!("expected 5 node fields, found {}", fields.len()));
    };
    let id: NodeId = number(id, "node id")?;
    let tile = Tile::new(
        number(row, "row")?,
        number(col, "column")?,
        number(coins, "coin count")?,
        tile_type.trim().parse()?,
    );

    let exits = exits
        .split(',')
        .map(str::trim)
        .filter(|exit| !exit.is_empty())
        .map(|exit| {
            let (other, length) = exit
                .split_once('-')
                .ok_or_else(|| format!("malformed edge {:?}", exit))?;
            Ok((number(other, "node id")?, number(length, "edge length")?))
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;

    Ok((id, tile, exits))
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Error,
        graphs::WeightedDigraph,
        sewer::{tile::TileType, Sewer},
    };

    const SMALL: &str = "\
3:4,trgt:6
5,1,1,0,ENTRANCE=6-2
6,1,2,120,RING=5-2,10-7
10,2,2,0,FLOOR=6-7
";

    #[test]
    fn reads_nodes_and_edges() {
        let sewer: Sewer = SMALL.parse().unwrap();
        assert_eq!((sewer.rows(), sewer.cols()), (3, 4));
        assert_eq!(sewer.entrance(), 5);
        assert_eq!(sewer.ring(), 6);
        assert_eq!(sewer.nodes(), &[5, 6, 10]);
        assert_eq!(sewer.tile(6).unwrap().coins(), 120);
        assert_eq!(sewer.tile(10).unwrap().tile_type(), TileType::Floor);
        assert_eq!(sewer.neighbors(6).collect::<Vec<_>>(), vec![5, 10]);
        assert_eq!(sewer.out_edges(&10).count(), 1);
        assert_eq!(sewer.min_path_length_to_ring(10), Ok(7));
    }

    #[test]
    fn writes_what_it_reads() {
        let sewer: Sewer = SMALL.parse().unwrap();
        assert_eq!(sewer.to_text(), SMALL);
    }

    #[test]
    fn node_without_edges() {
        let sewer = Sewer::from_text("1:1,trgt:0\n0,0,0,0,ENTRANCE=\n").unwrap();
        assert_eq!(sewer.open_tile_count(), 1);
        assert!(sewer.exits(0).is_empty());
    }

    #[test]
    fn rejects_one_way_edges() {
        let one_way = SMALL.replace("10,2,2,0,FLOOR=6-7", "10,2,2,0,FLOOR=");
        assert!(matches!(
            one_way.parse::<Sewer>(),
            Err(Error::Parse { line: 1, .. })
        ));

        let uneven = SMALL.replace("FLOOR=6-7", "FLOOR=6-3");
        assert!(uneven.parse::<Sewer>().is_err());
    }

    #[test]
    fn rejects_edges_between_distant_tiles() {
        let diagonal = SMALL
            .replace("ENTRANCE=6-2", "ENTRANCE=6-2,10-4")
            .replace("FLOOR=6-7", "FLOOR=6-7,5-4");
        assert!(matches!(
            diagonal.parse::<Sewer>(),
            Err(Error::Parse { line: 1, .. })
        ));

        let looped = SMALL.replace("FLOOR=6-7", "FLOOR=6-7,10-1");
        assert!(looped.parse::<Sewer>().is_err());
    }

    #[test]
    fn reports_line_of_error() {
        let broken = SMALL.replace("10-7", "10-x");
        assert!(matches!(
            broken.parse::<Sewer>(),
            Err(Error::Parse { line: 3, .. })
        ));

        let dangling = SMALL.replace("10,2,2,0,FLOOR=6-7", "10,2,2,0,FLOOR=11-7");
        assert!(matches!(
            dangling.parse::<Sewer>(),
            Err(Error::Parse { line: 4, .. })
        ));

        let no_entrance = SMALL.replace("ENTRANCE", "FLOOR");
        assert!(matches!(
            no_entrance.parse::<Sewer>(),
            Err(Error::Parse { line: 1, .. })
        ));

        assert!(matches!(
            "".parse::<Sewer>(),
            Err(Error::Parse { line: 1, .. })
        ));
    }
}

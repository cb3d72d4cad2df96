use super::{
    tile::{Tile, TileType},
    Sewer, SewerEdge,
};
use crate::{
    diver::state::NodeId,
    error::{Error, Result},
};

impl Sewer {
    /// Builds a sewer from a character map, one string per grid row.
    ///
    /// `#` is a wall, `.` plain floor, `E` the entrance and `R` the ring.
    /// A digit `1`-`9` is floor carrying a hundred coins per unit. Adjacent
    /// open tiles are joined in both directions by edges of `edge_length`.
    /// Without an `R` the ring is the entrance, as in a sewer one has to
    /// scram out of. Node ids are `row * cols + col`.
    pub fn from_layout(layout: &[&str], edge_length: u32) -> Result<Sewer> {
        let rows = layout.len();
        let cols = layout.first().map_or(0, |row| row.chars().count());

        let mut grid: Vec<Vec<Option<Tile>>> = Vec::with_capacity(rows);
        let mut entrance = None;
        let mut ring = None;
        for (row, text) in layout.iter().enumerate() {
            let line = row + 1;
            if text.chars().count() != cols {
                return Err(Error::parse(
                    line,
                    format!("expected {} columns, found {}", cols, text.chars().count()),
                ));
            }

            let mut cells = Vec::with_capacity(cols);
            for (col, symbol) in text.chars().enumerate() {
                let id = (row * cols + col) as NodeId;
                let tile = match symbol {
                    '#' => None,
                    '.' => Some(Tile::new(row, col, 0, TileType::Floor)),
                    'E' => {
                        if entrance.replace(id).is_some() {
                            return Err(Error::parse(line, "second entrance"));
                        }
                        Some(Tile::new(row, col, 0, TileType::Entrance))
                    }
                    'R' => {
                        if ring.replace(id).is_some() {
                            return Err(Error::parse(line, "second ring"));
                        }
                        Some(Tile::new(row, col, 0, TileType::Ring))
                    }
                    '1'..='9' => {
                        let coins = symbol.to_digit(10).unwrap_or(0) * 100;
                        Some(Tile::new(row, col, coins, TileType::Floor))
                    }
                    other => {
                        return Err(Error::parse(line, format!("unknown symbol {:?}", other)));
                    }
                };
                cells.push(tile);
            }
            grid.push(cells);
        }

        let entrance = entrance.ok_or_else(|| Error::parse(1, "layout has no entrance"))?;
        let ring = ring.unwrap_or(entrance);

        let id = |row: usize, col: usize| (row * cols + col) as NodeId;
        let mut tiles = Vec::new();
        let mut edges = Vec::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(tile) = cell else {
                    continue;
                };
                tiles.push((id(row, col), *tile));

                let south = grid.get(row + 1).and_then(|below| below[col]).map(|_| (row + 1, col));
                let east = cells.get(col + 1).copied().flatten().map(|_| (row, col + 1));
                for (other_row, other_col) in south.into_iter().chain(east) {
                    let (here, there) = (id(row, col), id(other_row, other_col));
                    edges.push(SewerEdge::new(here, there, edge_length));
                    edges.push(SewerEdge::new(there, here, edge_length));
                }
            }
        }

        Sewer::assemble(rows, cols, ring, tiles, edges).map_err(|reason| Error::parse(1, reason))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Error,
        sewer::{tile::TileType, Sewer},
    };

    #[test]
    fn corridor_with_coins() {
        let sewer = Sewer::from_layout(&["#####", "#E3R#", "#####"], 2).unwrap();
        assert_eq!(sewer.open_tile_count(), 3);
        assert_eq!(sewer.entrance(), 6);
        assert_eq!(sewer.ring(), 8);
        assert_eq!(sewer.tile(7).unwrap().coins(), 300);
        assert_eq!(sewer.tile(8).unwrap().tile_type(), TileType::Ring);
        assert_eq!(sewer.min_path_length_to_ring(6), Ok(4));
        assert_eq!(sewer.distance_to_ring(6), Some(2));
        assert_eq!(sewer.node_at(1, 2), Some(7));
        assert_eq!(sewer.node_at(0, 0), None);
    }

    #[test]
    fn ring_defaults_to_entrance() {
        let sewer = Sewer::from_layout(&["E.", ".."], 1).unwrap();
        assert_eq!(sewer.ring(), sewer.entrance());
        assert_eq!(sewer.neighbors(0).count(), 2);
        assert_eq!(sewer.neighbors(3).count(), 2);
    }

    #[test]
    fn walls_block_edges() {
        let sewer = Sewer::from_layout(&["E#R", "..."], 1).unwrap();
        assert!(sewer.edge_between(0, 2).is_none());
        assert_eq!(sewer.min_path_length_to_ring(0), Ok(4));
    }

    #[test]
    fn rejects_bad_layouts() {
        assert!(matches!(
            Sewer::from_layout(&["E.", "..."], 1),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(matches!(
            Sewer::from_layout(&["E.", ".E"], 1),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(matches!(
            Sewer::from_layout(&["..", "R?"], 1),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(Sewer::from_layout(&["..", "R."], 1).is_err());
    }
}

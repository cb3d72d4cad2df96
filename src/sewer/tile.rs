use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Ring,
    Entrance,
    Wall,
}

impl TileType {
    pub fn name(&self) -> &'static str {
        match self {
            TileType::Floor => "FLOOR",
            TileType::Ring => "RING",
            TileType::Entrance => "ENTRANCE",
            TileType::Wall => "WALL",
        }
    }

    pub fn is_open(&self) -> bool {
        *self != TileType::Wall
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLOOR" => Ok(TileType::Floor),
            "RING" => Ok(TileType::Ring),
            "ENTRANCE" => Ok(TileType::Entrance),
            "WALL" => Ok(TileType::Wall),
            other => Err(format!("unknown tile type {:?}", other)),
        }
    }
}

/// One grid cell. Coins lying on the tile are part of the map; collecting
/// them is tracked by the game, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    row: usize,
    col: usize,
    coins: u32,
    tile_type: TileType,
}

impl Tile {
    pub fn new(row: usize, col: usize, coins: u32, tile_type: TileType) -> Tile {
        Tile {
            row,
            col,
            coins,
            tile_type,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn manhattan_distance(&self, other: &Tile) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{Tile, TileType};

    #[test]
    fn tile_type_names_parse_back() {
        for tile_type in [TileType::Floor, TileType::Ring, TileType::Entrance, TileType::Wall] {
            assert_eq!(tile_type.name().parse::<TileType>(), Ok(tile_type));
        }
        assert!("floor".parse::<TileType>().is_err());
    }

    #[test]
    fn manhattan() {
        let a = Tile::new(1, 5, 0, TileType::Floor);
        let b = Tile::new(4, 2, 0, TileType::Ring);
        assert_eq!(a.manhattan_distance(&b), 6);
        assert_eq!(b.manhattan_distance(&a), 6);
    }
}

// Coordinate translation and per-tick tile lookup
//
// Positions arrive from the host as flattened indices (y * width + x). The free
// functions here translate between the two forms; `Grid` holds the tile
// classification for one tick so every lookup after construction is O(1).

use crate::types::{Coord, Direction, GameMap, Tile};

/// Flattens an in-bounds coordinate into a cell index
pub fn to_index(coord: Coord, width: i32) -> usize {
    (coord.y * width + coord.x) as usize
}

/// Expands a cell index back into a coordinate
pub fn to_coord(index: usize, width: i32) -> Coord {
    let width = width as usize;
    Coord {
        x: (index % width) as i32,
        y: (index / width) as i32,
    }
}

/// Coordinate after one step in `direction`; bounds are not checked
pub fn step(direction: Direction, coord: Coord) -> Coord {
    let (dx, dy) = direction.delta();
    Coord {
        x: coord.x + dx,
        y: coord.y + dy,
    }
}

pub fn is_out_of_bounds(coord: Coord, width: i32, height: i32) -> bool {
    coord.x < 0 || coord.x >= width || coord.y < 0 || coord.y >= height
}

pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Tile classification of the whole map, built once per tick
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds the lookup table from the map's occupied tiles
    pub fn from_map<M: GameMap>(map: &M) -> Self {
        let width = map.width().max(0);
        let height = map.height().max(0);
        let mut tiles = vec![Tile::Empty; (width as usize) * (height as usize)];

        for (index, tile) in map.occupied_tiles() {
            if let Some(slot) = tiles.get_mut(index) {
                *slot = tile;
            }
        }

        Grid {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_out_of_bounds(&self, coord: Coord) -> bool {
        is_out_of_bounds(coord, self.width, self.height)
    }

    /// Index of the coordinate, `None` when it lies outside the map
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.is_out_of_bounds(coord) {
            None
        } else {
            Some(to_index(coord, self.width))
        }
    }

    pub fn tile_at(&self, coord: Coord) -> Tile {
        match self.index_of(coord) {
            Some(index) => self.tiles[index],
            None => Tile::OutOfBounds,
        }
    }

    pub fn is_safe(&self, coord: Coord) -> bool {
        self.tile_at(coord).is_safe()
    }

    /// Neighbours of `coord` that can be moved onto, in direction order
    pub fn safe_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::all()
            .into_iter()
            .map(move |dir| step(dir, coord))
            .filter(move |next| self.is_safe(*next))
    }
}

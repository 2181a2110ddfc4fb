use crate::{cardinal_neighbours, GridView};
use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::debug;
use petgraph::unionfind::UnionFind;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Floor,
    Wall,
}

/// A single map tile. Walkability is stored separately from the kind so that, for instance, a
/// floor tile can be temporarily blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub walkable: bool,
}

impl Tile {
    pub fn new(kind: TileKind, walkable: bool) -> Tile {
        Tile { kind, walkable }
    }
    pub fn floor() -> Tile {
        Tile::new(TileKind::Floor, true)
    }
    pub fn wall() -> Tile {
        Tile::new(TileKind::Wall, false)
    }
}

/// [TileMap] is a sparse mapping from coordinates to [Tile]s. Coordinates without a tile are
/// treated as blocked. In addition it maintains connected components of the traversable tiles
/// using a [UnionFind] structure indexed by the insertion index of each tile, so that callers can
/// cheaply ask whether a goal is reachable at all.
#[derive(Clone, Debug)]
pub struct TileMap {
    pub size: i32,
    tiles: FxIndexMap<Point, Tile>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for TileMap {
    fn default() -> TileMap {
        TileMap::new(0)
    }
}

impl TileMap {
    /// Creates an empty map with the given logical size.
    pub fn new(size: i32) -> TileMap {
        TileMap {
            size,
            tiles: FxIndexMap::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }

    /// Creates a dense `size` by `size` map where every tile is `tile`.
    pub fn filled(size: i32, tile: Tile) -> TileMap {
        let mut map = TileMap::new(size);
        for x in 0..size {
            for y in 0..size {
                map.tiles.insert(Point::new(x, y), tile);
            }
        }
        map.generate_components();
        map
    }

    /// Builds a map from text rows where `.` is floor and `#` is wall. Any other character leaves
    /// the coordinate without a tile. Row `y` holds the tiles `(0, y)`, `(1, y)`, ...
    pub fn from_rows(rows: &[&str]) -> TileMap {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut map = TileMap::new(rows.len().max(width) as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = match c {
                    '.' => Tile::floor(),
                    '#' => Tile::wall(),
                    _ => continue,
                };
                map.tiles.insert(Point::new(x as i32, y as i32), tile);
            }
        }
        map.generate_components();
        map
    }

    pub fn get(&self, point: &Point) -> Option<&Tile> {
        self.tiles.get(point)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, &Tile)> {
        self.tiles.iter()
    }

    /// Places a tile. Joins newly connected components and flags the components as dirty if they
    /// are (potentially) broken apart or if a new coordinate was added.
    pub fn set_tile(&mut self, point: Point, tile: Tile) {
        let was_traversable = self.is_traversable(&point);
        let (ix, previous) = self.tiles.insert_full(point, tile);
        if previous.is_none() {
            self.components_dirty = true;
            return;
        }
        if was_traversable && !self.is_traversable(&point) {
            self.components_dirty = true;
        } else if !self.components_dirty && self.is_traversable(&point) {
            for n in cardinal_neighbours(&point) {
                if self.is_traversable(&n) {
                    if let Some(n_ix) = self.tiles.get_index_of(&n) {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }

    /// Removes a tile, after which the coordinate is blocked.
    pub fn remove_tile(&mut self, point: &Point) -> Option<Tile> {
        let removed = self.tiles.shift_remove(point);
        if removed.is_some() {
            self.components_dirty = true;
        }
        removed
    }

    /// Checks if start and goal are traversable and on the same component.
    pub fn reachable(&mut self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Dirty components are regenerated
    /// first, since tile indices shift when tiles are added or removed.
    pub fn unreachable(&mut self, start: &Point, goal: &Point) -> bool {
        self.update();
        if !self.is_traversable(start) || !self.is_traversable(goal) {
            return true;
        }
        match (self.tiles.get_index_of(start), self.tiles.get_index_of(goal)) {
            (Some(start_ix), Some(goal_ix)) => !self.components.equiv(start_ix, goal_ix),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable neighbours into the same
    /// components. Only the positive neighbours are visited since links are symmetric.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.tiles.len());
        self.components_dirty = false;
        for (ix, point) in self.tiles.keys().enumerate() {
            if !self.is_traversable(point) {
                continue;
            }
            let right = point.x.checked_add(1).map(|x| Point::new(x, point.y));
            let down = point.y.checked_add(1).map(|y| Point::new(point.x, y));
            for n in [right, down].into_iter().flatten() {
                if self.is_traversable(&n) {
                    if let Some(n_ix) = self.tiles.get_index_of(&n) {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl GridView for TileMap {
    fn contains(&self, point: &Point) -> bool {
        self.tiles.contains_key(point)
    }
    fn is_walkable(&self, point: &Point) -> bool {
        self.tiles.get(point).map_or(false, |t| t.walkable)
    }
    fn bound(&self) -> i32 {
        self.size
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size {
            let row = (0..self.size)
                .map(|x| match self.tiles.get(&Point::new(x, y)) {
                    Some(t) if t.walkable => '.',
                    Some(_) => '#',
                    None => ' ',
                })
                .collect::<String>();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

//! # bounded_grid_path
//!
//! A grid-based pathfinding system for turn-based agents. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on a 4-connected, sparse tile map
//! under a hard iteration budget: a search either reaches the goal, runs out of budget and hands
//! back the route to the last expanded tile, or proves that the goal cannot be reached.
//!
//! Routes are consumed by an [Agent](action::Agent), which turns them into a queue of
//! cardinal [Move](action::Move)s and commits one per turn.
//!
//! Note that the heuristic is the squared Euclidean distance, which overestimates on a
//! 4-connected grid. Returned routes are short but not guaranteed to be shortest.
pub mod action;
pub mod bounded_astar;
pub mod solver;
pub mod tile_map;

pub use grid_util::point::Point;

pub use action::{moves_along, ActionError, Agent, Move};
pub use solver::{BoundedAstar, Diagnostic, PathResult, SearchReport};
pub use tile_map::{Tile, TileKind, TileMap};

/// Coordinate of a tile on the map.
pub type Coordinate = Point;

/// Default number of pop-and-expand iterations a search may perform.
pub const MAX_ITERATIONS: usize = 70;

/// Horizontal scale factor in the in-bounds check. The x axis is bounded by `bound * TILE_SIZE`
/// while the y axis is bounded by `bound`, see [GridView::in_bounds].
pub const TILE_SIZE: i32 = 32;

/// Cardinal neighbour offsets, in the order in which successors are generated.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Read-only view of a tile map as needed by the pathfinder. The map must not change while a
/// search is running, which the shared borrow taken by [BoundedAstar] enforces.
pub trait GridView {
    /// Whether a tile exists at this coordinate.
    fn contains(&self, point: &Point) -> bool;
    /// Whether the tile at this coordinate can be walked on. Absent tiles are not walkable.
    fn is_walkable(&self, point: &Point) -> bool;
    /// Logical size of the map used for range checks.
    fn bound(&self) -> i32;

    /// Range check applied before tile lookups. The x axis allows `bound * TILE_SIZE` while the
    /// y axis allows `bound`, both inclusive. The scaled bound saturates at `i32::MAX`.
    fn in_bounds(&self, point: &Point) -> bool {
        let bound = self.bound();
        point.x >= 0
            && point.x <= bound.saturating_mul(TILE_SIZE)
            && point.y >= 0
            && point.y <= bound
    }

    /// Whether a search may step onto this coordinate: in bounds, present and walkable, checked
    /// in that order.
    fn is_traversable(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.contains(point) && self.is_walkable(point)
    }
}

/// The cardinal neighbours of a point, in [NEIGHBOUR_OFFSETS] order. Neighbours that would lie
/// outside the `i32` range are skipped.
pub fn cardinal_neighbours(point: &Point) -> impl Iterator<Item = Point> {
    let point = *point;
    NEIGHBOUR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        Some(Point::new(
            point.x.checked_add(dx)?,
            point.y.checked_add(dy)?,
        ))
    })
}

/// Squared Euclidean distance between two points, saturating at `i32::MAX`.
pub fn squared_distance(p1: &Point, p2: &Point) -> i32 {
    let dx = i64::from(p1.x) - i64::from(p2.x);
    let dy = i64::from(p1.y) - i64::from(p2.y);
    let d = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
    i32::try_from(d).unwrap_or(i32::MAX)
}

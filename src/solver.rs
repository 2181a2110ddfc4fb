use crate::bounded_astar::{bounded_astar, SearchOutcome};
use crate::{cardinal_neighbours, squared_distance, GridView, MAX_ITERATIONS};
use core::fmt;
use grid_util::point::Point;
use log::{warn, Level};

/// Outcome of a path request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Route from start to goal, both inclusive.
    Complete(Vec<Point>),
    /// The iteration budget ran out. Route from start to the last expanded tile, which is
    /// usually not the goal.
    Truncated(Vec<Point>),
    /// The goal cannot be reached from the start.
    NoPath,
}

impl PathResult {
    /// The route, if any. Both [Complete](PathResult::Complete) and
    /// [Truncated](PathResult::Truncated) results carry one.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Complete(path) | PathResult::Truncated(path) => Some(path.as_slice()),
            PathResult::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            PathResult::Complete(path) | PathResult::Truncated(path) => Some(path),
            PathResult::NoPath => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PathResult::Complete(_))
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, PathResult::Truncated(_))
    }
}

/// Non-fatal signal raised when a search does not reach its goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub start: Point,
    pub goal: Point,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (({}, {}) -> ({}, {}))",
            self.message, self.start.x, self.start.y, self.goal.x, self.goal.y
        )
    }
}

/// A [PathResult] together with bookkeeping about the search that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub result: PathResult,
    /// Number of pop-and-expand iterations performed.
    pub iterations: usize,
    /// Steps taken along the returned route, [None] for [PathResult::NoPath].
    pub cost: Option<i32>,
    pub diagnostic: Option<Diagnostic>,
}

/// Iteration-capped A* over a 4-connected [GridView]. Every step costs 1 and the heuristic is the
/// squared Euclidean distance to the goal.
#[derive(Clone, Debug)]
pub struct BoundedAstar {
    pub max_iterations: usize,
}

impl Default for BoundedAstar {
    fn default() -> BoundedAstar {
        BoundedAstar::new()
    }
}

impl BoundedAstar {
    pub fn new() -> BoundedAstar {
        BoundedAstar {
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(max_iterations: usize) -> BoundedAstar {
        BoundedAstar { max_iterations }
    }

    /// Neighbours of `node` that can be stepped onto, in generation order, each with cost 1.
    pub fn successors<G: GridView>(&self, grid: &G, node: &Point) -> Vec<(Point, i32)> {
        cardinal_neighbours(node)
            .into_iter()
            .filter(|p| grid.is_traversable(p))
            .map(|p| (p, 1))
            .collect()
    }

    /// Squared Euclidean distance. Not admissible on a 4-connected grid.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        squared_distance(p1, p2)
    }

    /// Computes a route from start to goal. Neither endpoint needs to be walkable: a blocked
    /// start simply has no successors and the search ends with [PathResult::NoPath].
    pub fn find_path<G: GridView>(&self, grid: &G, start: Point, goal: Point) -> PathResult {
        self.search(grid, start, goal).result
    }

    /// Like [find_path](Self::find_path), but also reports how the search went. Truncated and
    /// failed searches are logged as warnings.
    pub fn search<G: GridView>(&self, grid: &G, start: Point, goal: Point) -> SearchReport {
        let search = bounded_astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            self.max_iterations,
        );
        let (result, cost, diagnostic) = match search.outcome {
            SearchOutcome::Success(path, cost) => (PathResult::Complete(path), Some(cost), None),
            SearchOutcome::BudgetExceeded(path, cost) => {
                let diagnostic = Diagnostic {
                    level: Level::Warn,
                    message: format!(
                        "giving up on pathfinding after {} iterations",
                        search.iterations
                    ),
                    start,
                    goal,
                };
                (PathResult::Truncated(path), Some(cost), Some(diagnostic))
            }
            SearchOutcome::Exhausted => {
                let diagnostic = Diagnostic {
                    level: Level::Warn,
                    message: "couldn't get a path to destination".to_owned(),
                    start,
                    goal,
                };
                (PathResult::NoPath, None, Some(diagnostic))
            }
        };
        if let Some(diagnostic) = &diagnostic {
            warn!("{}", diagnostic);
        }
        SearchReport {
            result,
            iterations: search.iterations,
            cost,
            diagnostic,
        }
    }
}

//! Turning routes into turn-by-turn movement.
//!
//! An [Agent] keeps the waypoints of its current route in a queue. Each turn the front waypoint is
//! converted into a cardinal [Move], the move is committed if the destination is walkable, and the
//! waypoint is consumed either way.
use crate::solver::{BoundedAstar, PathResult};
use crate::GridView;
use grid_util::point::Point;
use log::debug;
use std::collections::VecDeque;
use thiserror::Error;

/// A single grid step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Offset of this move. `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Move> {
        match (dx, dy) {
            (1, 0) => Some(Move::Right),
            (-1, 0) => Some(Move::Left),
            (0, 1) => Some(Move::Down),
            (0, -1) => Some(Move::Up),
            _ => None,
        }
    }

    /// The point reached by taking this move from `from`, or `None` past the edge of the
    /// coordinate range.
    pub fn apply(self, from: &Point) -> Option<Point> {
        let (dx, dy) = self.delta();
        Some(Point::new(from.x.checked_add(dx)?, from.y.checked_add(dy)?))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("waypoint ({}, {}) is not a cardinal neighbour of ({}, {})", .to.x, .to.y, .from.x, .from.y)]
    NonAdjacentWaypoint { from: Point, to: Point },
}

fn move_between(from: &Point, to: &Point) -> Result<Move, ActionError> {
    let delta = to.x.checked_sub(from.x).zip(to.y.checked_sub(from.y));
    delta
        .and_then(|(dx, dy)| Move::from_delta(dx, dy))
        .ok_or(ActionError::NonAdjacentWaypoint {
            from: *from,
            to: *to,
        })
}

/// Translates a route into the moves that follow it.
pub fn moves_along(path: &[Point]) -> Result<Vec<Move>, ActionError> {
    path.windows(2)
        .map(|pair| move_between(&pair[0], &pair[1]))
        .collect()
}

/// A turn-taking entity that follows routes one step per turn.
#[derive(Clone, Debug)]
pub struct Agent {
    pub position: Point,
    pub action_queue: VecDeque<Point>,
    pub moving: bool,
}

impl Agent {
    pub fn new(position: Point) -> Agent {
        Agent {
            position,
            action_queue: VecDeque::new(),
            moving: false,
        }
    }

    /// Plans a route to `goal` and queues its waypoints. A truncated route is queued as well, so
    /// the agent makes progress towards the goal. If there is no route the queue is cleared.
    pub fn set_path_to_goal<G: GridView>(
        &mut self,
        grid: &G,
        solver: &BoundedAstar,
        goal: Point,
    ) -> PathResult {
        let result = solver.find_path(grid, self.position, goal);
        self.action_queue.clear();
        if let Some(path) = result.path() {
            // The first point is the agent's own position
            self.action_queue.extend(path.iter().skip(1).copied());
        }
        self.moving = !self.action_queue.is_empty();
        result
    }

    /// The move that leads to the next waypoint, if there is one.
    pub fn next_move(&self) -> Result<Option<Move>, ActionError> {
        self.action_queue
            .front()
            .map(|next| move_between(&self.position, next))
            .transpose()
    }

    /// Moves one step if the destination is walkable. Returns whether the agent moved.
    pub fn step<G: GridView>(&mut self, grid: &G, action: Move) -> bool {
        match action.apply(&self.position) {
            Some(target) if grid.contains(&target) && grid.is_walkable(&target) => {
                self.position = target;
                true
            }
            _ => {
                debug!(
                    "move {:?} blocked from ({}, {})",
                    action, self.position.x, self.position.y
                );
                false
            }
        }
    }

    /// Takes the next queued move. The waypoint is consumed whether or not the step succeeds,
    /// but it is left in place if it is not a neighbour of the agent.
    pub fn take_turn<G: GridView>(&mut self, grid: &G) -> Result<Option<Move>, ActionError> {
        let action = match self.next_move()? {
            Some(action) => action,
            None => return Ok(None),
        };
        self.step(grid, action);
        self.action_queue.pop_front();
        self.moving = !self.action_queue.is_empty();
        Ok(Some(action))
    }
}

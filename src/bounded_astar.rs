//! This module implements a budgeted variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Unlike the usual formulation it keeps every pushed node as a separate entry: there is no
//! decrease-key, stale duplicates stay in the open set and are expanded again when popped, and a
//! search that runs out of iterations returns the route to the node it was last working on.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use num_traits::ops::saturating::SaturatingAdd;
use num_traits::Zero;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// A node created during a single search. Parents are indices into the search's node arena, so
/// the links form a tree rooted at the start node.
#[derive(Clone, Debug)]
struct SearchNode<N, C> {
    node: N,
    parent: Option<usize>,
    g: C,
    f: C,
}

/// Open set entry. Ordered by `f` only, with ties going to the earlier insertion. Identity of the
/// node it refers to plays no role here.
struct SmallestCostHolder<C> {
    f: C,
    index: usize,
}

impl<C: PartialEq> Eq for SmallestCostHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f.eq(&other.f) && self.index == other.index
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both keys are reversed
        match other.f.cmp(&self.f) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// How a bounded search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    /// The goal was popped from the open set. Holds the path and its cost.
    Success(Vec<N>, C),
    /// The iteration budget ran out. Holds the path to the last popped node and its cost.
    BudgetExceeded(Vec<N>, C),
    /// The open set ran empty before the goal was reached.
    Exhausted,
}

/// Result of [bounded_astar]: the outcome and the number of pop-and-expand iterations performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedSearch<N, C> {
    pub outcome: SearchOutcome<N, C>,
    pub iterations: usize,
}

enum SearchState {
    Running,
    Success(usize),
    BudgetExceeded(usize),
    Exhausted,
}

fn reverse_path<N, C>(nodes: &[SearchNode<N, C>], start: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path: Vec<N> = itertools::unfold(Some(start), |i| {
        i.map(|ix| {
            let node = &nodes[ix];
            *i = node.parent;
            node.node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` for at most `max_iterations` pops. `successors` yields neighbours with
/// their move cost, `heuristic` estimates the remaining cost and `success` recognises the goal.
///
/// A successor is dropped if its node has already been expanded, or if the open set already
/// holds an entry for the same node whose cost is at most the successor's cost. Costs saturate
/// instead of overflowing.
pub fn bounded_astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_iterations: usize,
) -> BoundedSearch<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut nodes: Vec<SearchNode<N, C>> = vec![SearchNode {
        node: start.clone(),
        parent: None,
        g: Zero::zero(),
        f: Zero::zero(),
    }];
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        f: Zero::zero(),
        index: 0,
    });
    let mut closed: FxIndexSet<N> = FxIndexSet::default();
    let mut iterations = 0;
    // Before the first pop the start node stands in as the current node
    let mut current = 0;
    let mut state = SearchState::Running;

    while let SearchState::Running = state {
        state = if iterations >= max_iterations && !to_see.is_empty() {
            SearchState::BudgetExceeded(current)
        } else if let Some(SmallestCostHolder { index, .. }) = to_see.pop() {
            iterations += 1;
            current = index;
            let node = nodes[index].node.clone();
            let g = nodes[index].g;
            closed.insert(node.clone());
            if success(&node) {
                SearchState::Success(index)
            } else {
                for (successor, move_cost) in successors(&node) {
                    if closed.contains(&successor) {
                        continue;
                    }
                    let new_g = g.saturating_add(&move_cost);
                    let dominated = to_see.iter().any(|open| {
                        let other = &nodes[open.index];
                        other.node == successor && other.g <= new_g
                    });
                    if dominated {
                        continue;
                    }
                    let f = new_g.saturating_add(&heuristic(&successor));
                    nodes.push(SearchNode {
                        node: successor,
                        parent: Some(index),
                        g: new_g,
                        f,
                    });
                    let index = nodes.len() - 1;
                    to_see.push(SmallestCostHolder {
                        f: nodes[index].f,
                        index,
                    });
                }
                SearchState::Running
            }
        } else {
            SearchState::Exhausted
        };
    }

    let outcome = match state {
        SearchState::Success(ix) => SearchOutcome::Success(reverse_path(&nodes, ix), nodes[ix].g),
        SearchState::BudgetExceeded(ix) => {
            SearchOutcome::BudgetExceeded(reverse_path(&nodes, ix), nodes[ix].g)
        }
        SearchState::Exhausted | SearchState::Running => SearchOutcome::Exhausted,
    };
    BoundedSearch {
        outcome,
        iterations,
    }
}

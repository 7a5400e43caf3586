//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Every node reached so far lives in a single index map keyed by position whose values
//! hold the index of the parent entry, so the map doubles as the node arena and the path
//! is recovered by walking indices.
use crate::config::GoalTest;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::time::Instant;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the origin.
const NO_PARENT: usize = usize::MAX;
/// Expansions between two reads of the clock.
const DEADLINE_CHECK_INTERVAL: usize = 256;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Limits {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
}

impl Limits {
    fn exceeded(&self, expansions: usize) -> bool {
        if self.max_expansions.is_some_and(|max| expansions >= max) {
            return true;
        }
        match self.deadline {
            Some(deadline) if expansions % DEADLINE_CHECK_INTERVAL == 0 => {
                Instant::now() >= deadline
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Outcome<N, C> {
    /// Path from the goal back to the start, goal first.
    Found {
        path: Vec<N>,
        cost: C,
        expansions: usize,
    },
    /// The open set ran dry.
    Exhausted { expansions: usize },
    /// A [Limits] bound was hit first.
    Abandoned { expansions: usize },
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K> Eq for SmallestCostHolder<K> {}

impl<K> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours whichever entry was pushed
        // first, so equal estimates resolve to the first-encountered node
        match other.estimated_cost.partial_cmp(&self.estimated_cost) {
            Some(Ordering::Equal) | None => other.sequence.cmp(&self.sequence),
            Some(s) => s,
        }
    }
}

/// Walks parent indices from `index` to the start, yielding the node at `index` first.
pub(crate) fn reconstruct<N: Clone, V>(
    parents: &FxIndexMap<N, (usize, V)>,
    index: usize,
) -> Vec<N> {
    std::iter::successors(parents.get_index(index), |&(_, &(parent, _))| {
        parents.get_index(parent)
    })
    .map(|(node, _)| node.clone())
    .collect()
}

/// Best-first search from `start`. A successor is kept only if no entry for its position
/// exists yet or the known one is strictly more expensive; in that case the entry is
/// overwritten, re-opening the position even if it was expanded before.
pub(crate) fn best_first<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    goal_test: GoalTest,
    limits: Limits,
) -> Outcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (NO_PARENT, Zero::zero()));
    if goal_test == GoalTest::FirstGenerated && success(start) {
        return Outcome::Found {
            path: vec![start.clone()],
            cost: Zero::zero(),
            expansions: 0,
        };
    }

    let mut to_see = BinaryHeap::new();
    let mut sequence = 0;
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        sequence,
        index: 0,
    });
    let mut expansions = 0;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // We may have inserted a node several time into the binary heap if we found
            // a better way to access it. Ensure that we are currently dealing with the
            // best path and discard the others.
            if cost > c {
                continue;
            }
            if goal_test == GoalTest::Finalized && success(node) {
                return Outcome::Found {
                    path: reconstruct(&parents, index),
                    cost,
                    expansions,
                };
            }
            if limits.exceeded(expansions) {
                return Outcome::Abandoned { expansions };
            }
            expansions += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            if goal_test == GoalTest::FirstGenerated && success(&successor) {
                let (n, _) = parents.insert_full(successor, (index, new_cost));
                return Outcome::Found {
                    path: reconstruct(&parents, n),
                    cost: new_cost,
                    expansions,
                };
            }
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            sequence += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                sequence,
                index: n,
            });
        }
    }
    Outcome::Exhausted { expansions }
}

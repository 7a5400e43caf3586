use crate::best_first::{best_first, Limits, Outcome};
use crate::config::GoalTest;
use crate::cost::CostModel;
use crate::error::PlanError;
use crate::terrain_map::TerrainMap;
use crate::N_SMALLVEC_SIZE;
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info, warn};
use smallvec::SmallVec;
use std::time::{Duration, Instant};

pub mod astar;
pub mod dijkstra;

/// Knobs of a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchOptions {
    pub goal_test: GoalTest,
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

/// Result of a successful search between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct LegPath {
    /// Traversed acres, goal first and origin last.
    pub cells: Vec<Point>,
    /// Travel time of the path under the solver's [CostModel].
    pub cost: f64,
    /// Number of nodes taken from the open set.
    pub expansions: usize,
}

impl LegPath {
    pub fn goal(&self) -> Option<&Point> {
        self.cells.first()
    }

    pub fn origin(&self) -> Option<&Point> {
        self.cells.last()
    }

    /// The acres from origin to goal.
    pub fn walking_order(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells.iter().rev()
    }
}

pub trait LegSolver {
    fn cost_model(&self) -> &CostModel;

    fn options(&self) -> &SearchOptions;

    /// Estimated remaining travel time from `point` to `goal`.
    fn heuristic(&self, map: &TerrainMap, point: &Point, goal: &Point) -> f64;

    /// Neighbours of `node` that can be stepped to, with the time the step takes.
    fn successors(
        &self,
        map: &TerrainMap,
        node: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        map.neighborhood_points(node)
            .into_iter()
            .filter_map(|p| {
                self.cost_model()
                    .edge_cost(map, *node, p)
                    .map(|cost| (p, cost))
            })
            .collect()
    }

    /// Sums the step costs along a path, [None] if some step cannot be taken.
    fn path_cost(&self, map: &TerrainMap, path: &[Point]) -> Option<f64> {
        path.iter()
            .tuple_windows()
            .map(|(p1, p2)| self.cost_model().edge_cost(map, *p1, *p2))
            .sum()
    }

    /// Computes the least-time path from `origin` to `goal`. `Ok(None)` means the goal
    /// cannot be reached, which includes either endpoint sitting on untraversable terrain.
    /// Errors are reserved for waypoints outside the map and for exhausted search limits.
    fn find_path(
        &self,
        map: &TerrainMap,
        origin: Point,
        goal: Point,
    ) -> Result<Option<LegPath>, PlanError> {
        map.check_waypoint(0, origin)?;
        map.check_waypoint(1, goal)?;
        // Check if origin and goal are on the same connected component.
        if map.unreachable(&origin, &goal) {
            info!("{:?} is not reachable from {:?}", goal, origin);
            return Ok(None);
        }
        let options = self.options();
        let limits = Limits {
            max_expansions: options.max_expansions,
            deadline: options.time_limit.map(|limit| Instant::now() + limit),
        };
        let outcome = best_first(
            &origin,
            |node| self.successors(map, node),
            |point| self.heuristic(map, point, &goal),
            |point| *point == goal,
            options.goal_test,
            limits,
        );
        match outcome {
            Outcome::Found {
                path,
                cost,
                expansions,
            } => {
                debug!(
                    "{:?} -> {:?}: {} acres, cost {:.2}, {} expansions",
                    origin,
                    goal,
                    path.len(),
                    cost,
                    expansions
                );
                Ok(Some(LegPath {
                    cells: path,
                    cost,
                    expansions,
                }))
            }
            Outcome::Exhausted { expansions } => {
                warn!(
                    "Reachable goal {:?} could not be pathed to from {:?} after {} expansions",
                    goal, origin, expansions
                );
                Ok(None)
            }
            Outcome::Abandoned { expansions } => {
                warn!(
                    "Search from {:?} to {:?} stopped after {} expansions",
                    origin, goal, expansions
                );
                Err(PlanError::SearchLimit {
                    from: origin,
                    to: goal,
                    expansions,
                })
            }
        }
    }
}

//! Chains single-leg searches into a course.
use crate::error::PlanError;
use crate::solver::{LegPath, LegSolver};
use crate::terrain_map::TerrainMap;
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
#[cfg(not(feature = "parallel"))]
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bookkeeping of one solved leg.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegSummary {
    pub from: Point,
    pub to: Point,
    pub cost: f64,
    /// Acres on the leg, both endpoints included.
    pub cells: usize,
    pub expansions: usize,
}

/// A planned course. Cells run in walking order from the first control to the last,
/// with every intermediate control appearing once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    cells: Vec<Point>,
    legs: Vec<LegSummary>,
}

impl Route {
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// The cells from the final goal back to the start.
    pub fn goal_first(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells.iter().rev()
    }

    pub fn legs(&self) -> &[LegSummary] {
        &self.legs
    }

    pub fn total_cost(&self) -> f64 {
        self.legs.iter().map(|leg| leg.cost).sum()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Plans a route visiting `waypoints` in order. Every leg is an independent search over
/// the same read-only map, so with `parallel` set (and the `parallel` feature enabled)
/// the legs are searched on rayon's thread pool. Results are stitched together in leg
/// order either way, and the first failing leg in that order is the one reported.
pub fn plan_route<S>(
    solver: &S,
    map: &TerrainMap,
    waypoints: &[Point],
    parallel: bool,
) -> Result<Route, PlanError>
where
    S: LegSolver + Sync,
{
    if waypoints.len() < 2 {
        return Err(PlanError::TooFewWaypoints(waypoints.len()));
    }
    for (index, point) in waypoints.iter().enumerate() {
        map.check_waypoint(index, *point)?;
    }
    let legs: Vec<(Point, Point)> = waypoints.iter().copied().tuple_windows().collect();
    let solve = |leg: usize| -> Result<LegPath, PlanError> {
        let (from, to) = legs[leg];
        solver
            .find_path(map, from, to)?
            .ok_or(PlanError::Unreachable { leg, from, to })
    };
    let results = run_legs(legs.len(), parallel, solve);

    let mut route = Route::default();
    for (leg, result) in results.into_iter().enumerate() {
        let path = result?;
        let (from, to) = legs[leg];
        route.legs.push(LegSummary {
            from,
            to,
            cost: path.cost,
            cells: path.cells.len(),
            expansions: path.expansions,
        });
        append_leg(&mut route.cells, &path);
    }
    info!(
        "Planned {} legs over {} acres, total cost {:.2}",
        route.legs.len(),
        route.cells.len(),
        route.total_cost()
    );
    Ok(route)
}

/// Appends a leg in walking order, leaving out its origin when it is already the last cell.
fn append_leg(cells: &mut Vec<Point>, path: &LegPath) {
    let mut walk = path.walking_order().peekable();
    if cells.last() == walk.peek().copied() {
        walk.next();
    }
    cells.extend(walk);
}

#[cfg(feature = "parallel")]
fn run_legs<F>(count: usize, parallel: bool, solve: F) -> Vec<Result<LegPath, PlanError>>
where
    F: Fn(usize) -> Result<LegPath, PlanError> + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(solve).collect()
    } else {
        (0..count).map(solve).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_legs<F>(count: usize, parallel: bool, solve: F) -> Vec<Result<LegPath, PlanError>>
where
    F: Fn(usize) -> Result<LegPath, PlanError>,
{
    if parallel {
        warn!("Built without the parallel feature, searching legs one after another");
    }
    (0..count).map(solve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, SimpleGrid};
    use crate::solver::astar::AstarSolver;
    use crate::terrain::Terrain;

    fn open_map(width: usize, height: usize) -> TerrainMap {
        TerrainMap::flat(SimpleGrid::new(width, height, Terrain::OpenLand))
    }

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn leg_boundary_appears_once() {
        let map = open_map(3, 3);
        let solver = AstarSolver::new();
        let route = plan_route(&solver, &map, &points(&[(0, 0), (2, 0), (2, 2)]), false).unwrap();
        assert_eq!(
            route.cells(),
            points(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]).as_slice()
        );
        let boundary = Point::new(2, 0);
        assert_eq!(route.cells().iter().filter(|p| **p == boundary).count(), 1);
        assert_eq!(route.legs().len(), 2);
        assert_eq!(route.legs()[1].from, boundary);
    }

    #[test]
    fn goal_first_reverses_the_walk() {
        let map = open_map(4, 4);
        let solver = AstarSolver::new();
        let route = plan_route(&solver, &map, &points(&[(0, 0), (3, 3)]), false).unwrap();
        assert_eq!(route.goal_first().next(), Some(&Point::new(3, 3)));
        assert_eq!(route.goal_first().last(), Some(&Point::new(0, 0)));
        let cost: f64 = route.legs().iter().map(|leg| leg.cost).sum();
        assert_eq!(route.total_cost(), cost);
        assert!(route.total_cost() > 0.0);
    }

    #[test]
    fn repeated_waypoint_adds_nothing() {
        let map = open_map(3, 1);
        let solver = AstarSolver::new();
        let route = plan_route(&solver, &map, &points(&[(0, 0), (0, 0), (1, 0)]), false).unwrap();
        assert_eq!(route.cells(), points(&[(0, 0), (1, 0)]).as_slice());
        assert_eq!(route.legs()[0].cost, 0.0);
    }

    #[test]
    fn unreachable_leg_is_named() {
        // |.~.|
        // |.~.|
        let mut terrain = SimpleGrid::new(3, 2, Terrain::OpenLand);
        terrain.set(1, 0, Terrain::Water);
        terrain.set(1, 1, Terrain::Water);
        let map = TerrainMap::flat(terrain);
        let solver = AstarSolver::new();
        let err = plan_route(&solver, &map, &points(&[(0, 0), (0, 1), (2, 0)]), false)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::Unreachable {
                leg: 1,
                from: Point::new(0, 1),
                to: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn rejects_bad_courses() {
        let map = open_map(3, 3);
        let solver = AstarSolver::new();
        assert_eq!(
            plan_route(&solver, &map, &points(&[(1, 1)]), false),
            Err(PlanError::TooFewWaypoints(1))
        );
        assert!(matches!(
            plan_route(&solver, &map, &points(&[(0, 0), (1, 1), (1, 3)]), false),
            Err(PlanError::WaypointOutOfBounds { index: 2, .. })
        ));
    }

    #[test]
    fn parallel_legs_match_sequential() {
        let mut terrain = SimpleGrid::new(20, 20, Terrain::OpenLand);
        for y in 2..18 {
            terrain.set(10, y, Terrain::ImpassableVegetation);
        }
        let map = TerrainMap::flat(terrain);
        let solver = AstarSolver::new();
        let course = points(&[(0, 0), (19, 10), (3, 15), (15, 19), (0, 0)]);
        let sequential = plan_route(&solver, &map, &course, false).unwrap();
        let parallel = plan_route(&solver, &map, &course, true).unwrap();
        assert_eq!(sequential, parallel);
    }
}

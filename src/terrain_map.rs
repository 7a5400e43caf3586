use crate::error::PlanError;
use crate::grid::{self, ElevationGrid, Grid, SimpleGrid, TerrainGrid};
use crate::terrain::Terrain;
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [TerrainMap] pairs the terrain classes with the elevations of the same area and
/// maintains information about which traversable acres are connected using a
/// [UnionFind] structure. The map is immutable once built, so the components are
/// generated once and answer reachability queries before any search runs.
#[derive(Clone, Debug)]
pub struct TerrainMap {
    terrain: TerrainGrid,
    elevation: ElevationGrid,
    components: UnionFind<usize>,
}

impl TerrainMap {
    /// Combines the two grids, rejecting them if their dimensions differ.
    pub fn new(terrain: TerrainGrid, elevation: ElevationGrid) -> Result<TerrainMap, PlanError> {
        if grid::dimensions(&terrain) != grid::dimensions(&elevation) {
            return Err(PlanError::DimensionMismatch {
                terrain: grid::dimensions(&terrain),
                elevation: grid::dimensions(&elevation),
            });
        }
        let mut map = TerrainMap {
            components: UnionFind::new(terrain.width() * terrain.height()),
            terrain,
            elevation,
        };
        map.generate_components();
        Ok(map)
    }

    /// A map without any relief.
    pub fn flat(terrain: TerrainGrid) -> TerrainMap {
        let elevation = SimpleGrid::new(terrain.width(), terrain.height(), 0.0);
        let mut map = TerrainMap {
            components: UnionFind::new(terrain.width() * terrain.height()),
            terrain,
            elevation,
        };
        map.generate_components();
        map
    }

    pub fn width(&self) -> usize {
        self.terrain.width()
    }

    pub fn height(&self) -> usize {
        self.terrain.height()
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn elevation(&self) -> &ElevationGrid {
        &self.elevation
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        self.terrain.point_in_bounds(*point)
    }

    /// Terrain at a point; everything outside the map is [Terrain::OutOfBounds].
    pub fn terrain_at(&self, point: &Point) -> Terrain {
        grid::value_at(&self.terrain, *point).unwrap_or_default()
    }

    pub fn elevation_at(&self, point: &Point) -> Option<f64> {
        grid::value_at(&self.elevation, *point)
    }

    pub fn is_traversable(&self, point: &Point) -> bool {
        self.terrain_at(point).is_traversable()
    }

    /// In-bounds points of the 8-neighbourhood, in [Point::moore_neighborhood] order.
    /// Successors are generated in this order, which fixes the search's tie-breaking.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 8]> {
        point
            .moore_neighborhood()
            .into_iter()
            .filter(|p| self.in_bounds(p))
            .collect()
    }

    /// Rejects a waypoint outside the map. `index` is its position in the course.
    pub fn check_waypoint(&self, index: usize, point: Point) -> Result<(), PlanError> {
        if self.in_bounds(&point) {
            Ok(())
        } else {
            Err(PlanError::WaypointOutOfBounds {
                index,
                point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Retrieves the component id a given [Point] belongs to, [None] off the map.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| self.components.find(self.terrain.get_ix_point(point)))
    }

    /// Checks if start and goal are traversable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start or goal is blocked or if they lie on different components.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_traversable(start) && self.is_traversable(goal) {
            let start_ix = self.terrain.get_ix_point(start);
            let goal_ix = self.terrain.get_ix_point(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable neighbours to the
    /// same components. Only the forward half of the neighbourhood is visited since
    /// the union is symmetric.
    fn generate_components(&mut self) {
        info!(
            "Generating connected components of a {}x{} map",
            self.width(),
            self.height()
        );
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        for point in grid::points(&self.terrain) {
            if !self.is_traversable(&point) {
                continue;
            }
            let parent_ix = self.terrain.get_ix_point(&point);
            for p in [
                Point::new(point.x + 1, point.y),
                Point::new(point.x - 1, point.y + 1),
                Point::new(point.x, point.y + 1),
                Point::new(point.x + 1, point.y + 1),
            ] {
                if self.is_traversable(&p) {
                    let ix = self.terrain.get_ix_point(&p);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for TerrainMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Terrain:")?;
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| self.terrain_at(&Point::new(x, y)).symbol())
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

//! Per-acre value grids. Storage and indexing come from [grid_util]'s [SimpleGrid];
//! the helpers here add the bounds checks the map needs, since [Grid::get] does none.
use crate::terrain::Terrain;
pub use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;

/// Terrain classes of a map, as produced by the raster decoder.
pub type TerrainGrid = SimpleGrid<Terrain>;
/// Elevations of a map, as produced by the elevation parser.
pub type ElevationGrid = SimpleGrid<f64>;

/// Value at `point`, or [None] outside the grid.
pub fn value_at<T: Copy>(grid: &SimpleGrid<T>, point: Point) -> Option<T> {
    grid.point_in_bounds(point).then(|| grid.get_point(point))
}

/// `(width, height)`
pub fn dimensions<T: Copy>(grid: &SimpleGrid<T>) -> (usize, usize) {
    (grid.width(), grid.height())
}

/// All points of the grid, row by row.
pub fn points<T: Copy>(grid: &SimpleGrid<T>) -> impl Iterator<Item = Point> {
    let width = grid.width() as i32;
    (0..grid.height() as i32)
        .cartesian_product(0..width)
        .map(|(y, x)| Point::new(x, y))
}

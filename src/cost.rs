//! Travel time between neighbouring acres.
//!
//! Walking speed follows [Tobler's hiking function](https://en.wikipedia.org/wiki/Tobler%27s_hiking_function)
//! `v = v_max * exp(-a * (|slope| + b))`. A step between two acres is split at the shared
//! border: the first half is walked on the footing of the acre being left, the second half
//! on the footing of the acre being entered, each at the hiking speed scaled down by the
//! terrain's multiplier.
use crate::terrain_map::TerrainMap;
use crate::{CELL_HEIGHT_M, CELL_WIDTH_M, MAX_WALKING_SPEED};
use grid_util::point::Point;

pub const SLOPE_DECAY: f64 = 3.5;
pub const SLOPE_OFFSET: f64 = 0.05;
/// Metres per unit of the elevation data.
pub const ELEVATION_UNIT_M: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    /// East-west size of an acre.
    pub cell_width_m: f64,
    /// North-south size of an acre.
    pub cell_height_m: f64,
    pub elevation_unit_m: f64,
    pub max_speed: f64,
    pub slope_decay: f64,
    pub slope_offset: f64,
}

impl Default for CostModel {
    fn default() -> CostModel {
        CostModel {
            cell_width_m: CELL_WIDTH_M,
            cell_height_m: CELL_HEIGHT_M,
            elevation_unit_m: ELEVATION_UNIT_M,
            max_speed: MAX_WALKING_SPEED,
            slope_decay: SLOPE_DECAY,
            slope_offset: SLOPE_OFFSET,
        }
    }
}

impl CostModel {
    /// Planar distance between the centres of two neighbouring acres.
    pub fn step_distance(&self, p1: &Point, p2: &Point) -> f64 {
        debug_assert!((p1.x - p2.x).abs() <= 1 && (p1.y - p2.y).abs() <= 1);
        match (p1.x != p2.x, p1.y != p2.y) {
            (false, false) => 0.0,
            (true, false) => self.cell_width_m,
            (false, true) => self.cell_height_m,
            (true, true) => self.cell_width_m.hypot(self.cell_height_m),
        }
    }

    /// Hiking speed on a slope given as rise over run.
    pub fn walking_speed(&self, slope: f64) -> f64 {
        self.max_speed * (-self.slope_decay * (slope.abs() + self.slope_offset)).exp()
    }

    /// Speed on perfectly flat open land, the fastest any step can be walked.
    pub fn flat_speed(&self) -> f64 {
        self.walking_speed(0.0)
    }

    /// Time to walk from `p1` to the neighbouring `p2`, or [None] if either acre cannot be
    /// traversed.
    pub fn edge_cost(&self, map: &TerrainMap, p1: Point, p2: Point) -> Option<f64> {
        let m1 = map.terrain_at(&p1).speed_multiplier()?;
        let m2 = map.terrain_at(&p2).speed_multiplier()?;
        let distance = self.step_distance(&p1, &p2);
        if distance == 0.0 {
            return None;
        }
        let rise = (map.elevation_at(&p1)? - map.elevation_at(&p2)?).abs() * self.elevation_unit_m;
        let speed = self.walking_speed(rise / distance);
        let half = distance / 2.0;
        let time = half / (speed * m1) + half / (speed * m2);
        // Extreme cliffs underflow the speed to zero; treat them like a wall.
        time.is_finite().then_some(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, SimpleGrid};
    use crate::terrain::Terrain;

    fn two_cells(t1: Terrain, t2: Terrain, e1: f64, e2: f64) -> TerrainMap {
        let mut terrain = SimpleGrid::new(1, 2, Terrain::OpenLand);
        terrain.set(0, 0, t1);
        terrain.set(0, 1, t2);
        let elevation = SimpleGrid {
            width: 1,
            height: 2,
            values: vec![e1, e2],
        };
        TerrainMap::new(terrain, elevation).unwrap()
    }

    #[test]
    fn flat_open_land_step() {
        let model = CostModel::default();
        let map = two_cells(Terrain::OpenLand, Terrain::OpenLand, 0.0, 0.0);
        let cost = model
            .edge_cost(&map, Point::new(0, 0), Point::new(0, 1))
            .unwrap();
        let expected = CELL_HEIGHT_M / (MAX_WALKING_SPEED * (-SLOPE_DECAY * SLOPE_OFFSET).exp());
        assert!((cost - expected).abs() < 1e-12);
        assert!((cost - CELL_HEIGHT_M / model.flat_speed()).abs() < 1e-12);
    }

    #[test]
    fn step_distances() {
        let model = CostModel::default();
        let o = Point::new(5, 5);
        assert_eq!(model.step_distance(&o, &Point::new(5, 4)), CELL_HEIGHT_M);
        assert_eq!(model.step_distance(&o, &Point::new(6, 5)), CELL_WIDTH_M);
        let diagonal = model.step_distance(&o, &Point::new(4, 6));
        assert!((diagonal - 12.7627).abs() < 1e-3);
    }

    #[test]
    fn halves_use_their_own_multiplier() {
        let model = CostModel::default();
        let map = two_cells(Terrain::OpenLand, Terrain::WalkableIce, 0.0, 0.0);
        let cost = model
            .edge_cost(&map, Point::new(0, 0), Point::new(0, 1))
            .unwrap();
        let half = CELL_HEIGHT_M / 2.0 / model.flat_speed();
        assert!((cost - (half + half / 0.5)).abs() < 1e-12);
        let back = model
            .edge_cost(&map, Point::new(0, 1), Point::new(0, 0))
            .unwrap();
        assert!((cost - back).abs() < 1e-12);
    }

    #[test]
    fn slope_slows_down_both_ways() {
        let model = CostModel::default();
        let flat = two_cells(Terrain::OpenLand, Terrain::OpenLand, 10.0, 10.0);
        let steep = two_cells(Terrain::OpenLand, Terrain::OpenLand, 10.0, 13.0);
        let (a, b) = (Point::new(0, 0), Point::new(0, 1));
        let flat_cost = model.edge_cost(&flat, a, b).unwrap();
        let up = model.edge_cost(&steep, a, b).unwrap();
        let down = model.edge_cost(&steep, b, a).unwrap();
        assert!(up > flat_cost);
        assert_eq!(up, down);
        let slope = 3.0 / CELL_HEIGHT_M;
        assert!((up - CELL_HEIGHT_M / model.walking_speed(slope)).abs() < 1e-12);
    }

    #[test]
    fn untraversable_endpoints_have_no_edge() {
        let model = CostModel::default();
        for blocked in [
            Terrain::Water,
            Terrain::ImpassableVegetation,
            Terrain::OutOfBounds,
        ] {
            let map = two_cells(Terrain::OpenLand, blocked, 0.0, 0.0);
            let (a, b) = (Point::new(0, 0), Point::new(0, 1));
            assert_eq!(model.edge_cost(&map, a, b), None);
            assert_eq!(model.edge_cost(&map, b, a), None);
        }
        let map = two_cells(Terrain::OpenLand, Terrain::OpenLand, 0.0, 0.0);
        assert_eq!(
            model.edge_cost(&map, Point::new(0, 1), Point::new(0, 2)),
            None
        );
    }
}

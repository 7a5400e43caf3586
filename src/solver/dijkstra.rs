use grid_util::point::Point;

use crate::{
    cost::CostModel,
    solver::{LegSolver, SearchOptions},
    terrain_map::TerrainMap,
};

/// Uninformed search, used as the exhaustive reference for the A* solver.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    pub cost_model: CostModel,
    pub options: SearchOptions,
}

impl DijkstraSolver {
    pub fn new(cost_model: CostModel) -> DijkstraSolver {
        DijkstraSolver {
            cost_model,
            options: SearchOptions::default(),
        }
    }
}

impl LegSolver for DijkstraSolver {
    fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    fn options(&self) -> &SearchOptions {
        &self.options
    }

    fn heuristic(&self, _: &TerrainMap, _: &Point, _: &Point) -> f64 {
        0.0
    }
}

use grid_util::point::Point;

use crate::{
    config::PlannerConfig,
    cost::CostModel,
    heuristic::TravelTimeHeuristic,
    solver::{LegSolver, SearchOptions},
    terrain_map::TerrainMap,
};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub cost_model: CostModel,
    pub estimator: TravelTimeHeuristic,
    pub heuristic_factor: f64,
    pub options: SearchOptions,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        let cost_model = CostModel::default();
        AstarSolver {
            estimator: TravelTimeHeuristic::from_cost_model(&cost_model),
            cost_model,
            heuristic_factor: 1.0,
            options: SearchOptions::default(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> AstarSolver {
        let cost_model = config.cost_model();
        AstarSolver {
            estimator: TravelTimeHeuristic::from_cost_model(&cost_model),
            cost_model,
            heuristic_factor: config.heuristic_factor,
            options: config.search_options(),
        }
    }
}

impl LegSolver for AstarSolver {
    fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Just the travel-time estimate times a heuristic factor.
    fn heuristic(&self, _: &TerrainMap, p1: &Point, p2: &Point) -> f64 {
        self.estimator.estimate(p1, p2) * self.heuristic_factor
    }
}

use crate::cost::CostModel;
use grid_util::point::Point;

/// Lower bound on the remaining travel time: the straight-line distance over the scaled
/// acre grid walked at the model's top speed. Every step of the [CostModel] is at least as
/// long as the straight line and never faster than `max_speed`, so the estimate never
/// exceeds the true cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelTimeHeuristic {
    pub cell_width_m: f64,
    pub cell_height_m: f64,
    pub max_speed: f64,
}

impl Default for TravelTimeHeuristic {
    fn default() -> TravelTimeHeuristic {
        TravelTimeHeuristic::from_cost_model(&CostModel::default())
    }
}

impl TravelTimeHeuristic {
    pub fn from_cost_model(model: &CostModel) -> TravelTimeHeuristic {
        TravelTimeHeuristic {
            cell_width_m: model.cell_width_m,
            cell_height_m: model.cell_height_m,
            max_speed: model.max_speed,
        }
    }

    pub fn distance(&self, p1: &Point, p2: &Point) -> f64 {
        let dx = (p1.x - p2.x).abs() as f64 * self.cell_width_m;
        let dy = (p1.y - p2.y).abs() as f64 * self.cell_height_m;
        dx.hypot(dy)
    }

    pub fn estimate(&self, point: &Point, goal: &Point) -> f64 {
        self.distance(point, goal) / self.max_speed
    }
}

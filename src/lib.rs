//! # orienteering
//!
//! Least-time routes over orienteering maps. A terrain raster and a matching elevation
//! grid are turned into an 8-connected graph whose edge costs follow
//! [Tobler's hiking function](https://en.wikipedia.org/wiki/Tobler%27s_hiking_function)
//! scaled by how fast each kind of terrain can be crossed. Legs between consecutive
//! controls are searched with A* using a travel-time heuristic that never overestimates.
//! Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! of the traversable terrain to avoid flood-filling behaviour if no path exists.
//!
//! ```no_run
//! use grid_util::point::Point;
//! use orienteering::{plan_route, AstarSolver, Grid, SimpleGrid, Terrain, TerrainMap};
//!
//! let map = TerrainMap::flat(SimpleGrid::new(10, 10, Terrain::OpenLand));
//! let course = [Point::new(0, 0), Point::new(9, 0), Point::new(9, 9)];
//! let route = plan_route(&AstarSolver::new(), &map, &course, false).unwrap();
//! println!("{} acres, {:.1} s", route.len(), route.total_cost());
//! ```
mod best_first;
pub mod config;
pub mod cost;
pub mod directions;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod io;
pub mod route;
pub mod season;
pub mod solver;
pub mod terrain;
pub mod terrain_map;

/// East-west extent of an acre in metres.
pub const CELL_WIDTH_M: f64 = 10.29;
/// North-south extent of an acre in metres.
pub const CELL_HEIGHT_M: f64 = 7.55;
/// Base speed of the hiking function in metres per second.
pub const MAX_WALKING_SPEED: f64 = 6.0;
/// Inline capacity of successor lists, the size of the 8-neighbourhood.
const N_SMALLVEC_SIZE: usize = 8;

pub use config::{GoalTest, PlannerConfig};
pub use cost::CostModel;
pub use directions::{directions, write_directions, Heading, Instruction};
pub use error::{InputError, PlanError};
pub use grid::{ElevationGrid, Grid, SimpleGrid, TerrainGrid};
pub use heuristic::TravelTimeHeuristic;
pub use route::{plan_route, LegSummary, Route};
pub use season::Season;
pub use solver::astar::AstarSolver;
pub use solver::dijkstra::DijkstraSolver;
pub use solver::{LegPath, LegSolver, SearchOptions};
pub use terrain::{Terrain, TerrainPalette};
pub use terrain_map::TerrainMap;

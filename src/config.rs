use crate::cost::{CostModel, ELEVATION_UNIT_M, SLOPE_DECAY, SLOPE_OFFSET};
use crate::error::InputError;
use crate::season::FREEZE_RADIUS;
use crate::solver::SearchOptions;
use crate::{CELL_HEIGHT_M, CELL_WIDTH_M, MAX_WALKING_SPEED};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// When the search considers the goal reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTest {
    /// The goal is accepted once it is the cheapest node of the open set. Optimal for an
    /// admissible heuristic.
    #[default]
    Finalized,
    /// The goal is accepted as soon as it is generated as a successor. Expands fewer
    /// nodes but may return a costlier route.
    FirstGenerated,
}

impl FromStr for GoalTest {
    type Err = InputError;

    fn from_str(s: &str) -> Result<GoalTest, InputError> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "finalized" => Ok(GoalTest::Finalized),
            "first-generated" => Ok(GoalTest::FirstGenerated),
            _ => Err(InputError::UnknownGoalTest(s.to_owned())),
        }
    }
}

/// Every tunable of a planning run. Missing keys in a TOML file take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// East-west size of an acre in metres.
    pub cell_width_m: f64,
    /// North-south size of an acre in metres.
    pub cell_height_m: f64,
    /// Metres per unit of the elevation data.
    pub elevation_unit_m: f64,
    /// Base speed of the hiking function, also the heuristic's best case.
    pub max_speed: f64,
    pub slope_decay: f64,
    pub slope_offset: f64,
    /// Weight of the A* heuristic. Values above 1 give up optimality for speed.
    pub heuristic_factor: f64,
    pub goal_test: GoalTest,
    /// Expansion budget of a single leg.
    pub max_expansions: Option<usize>,
    /// Wall-clock budget of a single leg.
    pub time_limit_ms: Option<u64>,
    /// Search legs concurrently. Needs the `parallel` feature.
    pub parallel_legs: bool,
    /// How far winter ice reaches into a lake, in acres.
    pub freeze_radius: usize,
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            cell_width_m: CELL_WIDTH_M,
            cell_height_m: CELL_HEIGHT_M,
            elevation_unit_m: ELEVATION_UNIT_M,
            max_speed: MAX_WALKING_SPEED,
            slope_decay: SLOPE_DECAY,
            slope_offset: SLOPE_OFFSET,
            heuristic_factor: 1.0,
            goal_test: GoalTest::default(),
            max_expansions: None,
            time_limit_ms: None,
            parallel_legs: false,
            freeze_radius: FREEZE_RADIUS,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(s: &str) -> Result<PlannerConfig, InputError> {
        let config: PlannerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, InputError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        PlannerConfig::from_toml_str(&content)
    }

    /// Checks the values a search cannot work with.
    pub fn validate(&self) -> Result<(), InputError> {
        let positive = [
            ("cell_width_m", self.cell_width_m),
            ("cell_height_m", self.cell_height_m),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InputError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("elevation_unit_m", self.elevation_unit_m),
            ("slope_decay", self.slope_decay),
            ("slope_offset", self.slope_offset),
            ("heuristic_factor", self.heuristic_factor),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(InputError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn cost_model(&self) -> CostModel {
        CostModel {
            cell_width_m: self.cell_width_m,
            cell_height_m: self.cell_height_m,
            elevation_unit_m: self.elevation_unit_m,
            max_speed: self.max_speed,
            slope_decay: self.slope_decay,
            slope_offset: self.slope_offset,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            goal_test: self.goal_test,
            max_expansions: self.max_expansions,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

use grid_util::point::Point;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the planner itself. An unreachable goal on a single leg is not an error
/// ([find_path](crate::solver::LegSolver::find_path) returns [None]); it only becomes
/// [PlanError::Unreachable] once a multi-leg route depends on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("terrain grid is {terrain:?} (width, height) but elevation grid is {elevation:?}")]
    DimensionMismatch {
        terrain: (usize, usize),
        elevation: (usize, usize),
    },

    #[error("waypoint {index} at {point:?} lies outside the {width}x{height} map")]
    WaypointOutOfBounds {
        index: usize,
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    #[error("leg {leg} from {from:?} to {to:?} is unreachable")]
    Unreachable { leg: usize, from: Point, to: Point },

    #[error("search from {from:?} to {to:?} gave up after {expansions} expansions")]
    SearchLimit {
        from: Point,
        to: Point,
        expansions: usize,
    },
}

/// Failures while reading or decoding the inputs around the planner.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to process terrain image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid number {token:?} on line {line}")]
    Number { token: String, line: usize },

    #[error("course holds an odd number of coordinates ({0})")]
    OddCoordinates(usize),

    #[error("elevation row {row} has {found} values, {expected} needed")]
    ShortElevationRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("elevation data has {found} rows, {expected} needed")]
    MissingElevationRows { found: usize, expected: usize },

    #[error("unknown season {0:?}, expected spring, summer, fall or winter")]
    UnknownSeason(String),

    #[error("unknown goal test {0:?}, expected finalized or first-generated")]
    UnknownGoalTest(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

//! Seasonal changes to the terrain, applied to a decoded map before any search.
use crate::error::InputError;
use crate::grid::{points, value_at, Grid, TerrainGrid};
use crate::terrain::Terrain;
use grid_util::point::Point;
use log::info;
use std::fmt;
use std::str::FromStr;

/// How many acres of a lake freeze outward from its shore.
pub const FREEZE_RADIUS: usize = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    #[default]
    Summer,
    Fall,
    Winter,
}

impl FromStr for Season {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Season, InputError> {
        match s.to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => Err(InputError::UnknownSeason(s.to_owned())),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        f.write_str(name)
    }
}

impl Season {
    /// Rewrites `grid` for this season and returns how many acres changed.
    pub fn apply(self, grid: &mut TerrainGrid, freeze_radius: usize) -> usize {
        let changed = match self {
            Season::Spring | Season::Summer => 0,
            Season::Fall => fall_leaves(grid),
            Season::Winter => winter_freeze(grid, freeze_radius),
        };
        info!("Applied {} to the map, {} acres changed", self, changed);
        changed
    }
}

/// Footpaths running along easy forest get covered in leaves.
pub fn fall_leaves(grid: &mut TerrainGrid) -> usize {
    let snapshot = grid.clone();
    let mut changed = 0;
    for point in points(&snapshot) {
        if snapshot.get_point(point) != Terrain::Footpath {
            continue;
        }
        if point
            .neumann_neighborhood()
            .into_iter()
            .any(|p| value_at(&snapshot, p) == Some(Terrain::EasyForest))
        {
            grid.set_point(point, Terrain::Leaves);
            changed += 1;
        }
    }
    changed
}

/// Lakes freeze up to `radius` acres out from their shores. A shore acre is any acre on
/// the map that is not water, ice or out of bounds; from it, every water acre within
/// `radius` on a cardinal line whose first acre is water turns to ice, including water
/// lying past an island on that line.
pub fn winter_freeze(grid: &mut TerrainGrid, radius: usize) -> usize {
    let snapshot = grid.clone();
    let is_water = |p: Point| value_at(&snapshot, p) == Some(Terrain::Water);
    let mut changed = 0;
    for point in points(&snapshot) {
        if matches!(
            snapshot.get_point(point),
            Terrain::Water | Terrain::WalkableIce | Terrain::OutOfBounds
        ) {
            continue;
        }
        for direction in point.neumann_neighborhood().into_iter().map(|p| p - point) {
            if !is_water(point + direction) {
                continue;
            }
            for step in 1..=radius as i32 {
                let p = point + direction * step;
                if is_water(p) && grid.get_point(p) == Terrain::Water {
                    grid.set_point(p, Terrain::WalkableIce);
                    changed += 1;
                }
            }
        }
    }
    changed
}

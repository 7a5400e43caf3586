use crate::error::InputError;
use crate::grid::{ElevationGrid, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use std::path::Path;

fn read_to_string(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an elevation file: one row of the map per line, whitespace separated, in any
/// notation `f64` accepts. Rows may carry more values than the map is wide; only the
/// first `width` are used. Blank lines are skipped and rows past `height` are ignored.
pub fn parse_elevation(text: &str, width: usize, height: usize) -> Result<ElevationGrid, InputError> {
    let mut rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let mut cells = Vec::with_capacity(width * height);
    for row in 0..height {
        let Some((line_ix, line)) = rows.next() else {
            return Err(InputError::MissingElevationRows {
                found: row,
                expected: height,
            });
        };
        let before = cells.len();
        for token in line.split_whitespace().take(width) {
            let value = token.parse::<f64>().map_err(|_| InputError::Number {
                token: token.to_owned(),
                line: line_ix + 1,
            })?;
            cells.push(value);
        }
        let found = cells.len() - before;
        if found < width {
            return Err(InputError::ShortElevationRow {
                row,
                found,
                expected: width,
            });
        }
    }
    Ok(SimpleGrid {
        width,
        height,
        values: cells,
    })
}

/// Parses a course: integer `x y` pairs separated by any whitespace, in visiting order.
pub fn parse_course(text: &str) -> Result<Vec<Point>, InputError> {
    let numbers = text
        .lines()
        .enumerate()
        .flat_map(|(line_ix, line)| line.split_whitespace().map(move |token| (line_ix, token)))
        .map(|(line_ix, token)| {
            token.parse::<i32>().map_err(|_| InputError::Number {
                token: token.to_owned(),
                line: line_ix + 1,
            })
        })
        .collect::<Result<Vec<i32>, InputError>>()?;
    if numbers.len() % 2 != 0 {
        return Err(InputError::OddCoordinates(numbers.len()));
    }
    Ok(numbers
        .into_iter()
        .tuples()
        .map(|(x, y): (i32, i32)| Point::new(x, y))
        .collect())
}

pub fn load_elevation<P: AsRef<Path>>(
    path: P,
    width: usize,
    height: usize,
) -> Result<ElevationGrid, InputError> {
    let path = path.as_ref();
    let grid = parse_elevation(&read_to_string(path)?, width, height)?;
    info!("Loaded {}x{} elevations from {}", width, height, path.display());
    Ok(grid)
}

pub fn load_course<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, InputError> {
    let path = path.as_ref();
    let course = parse_course(&read_to_string(path)?)?;
    info!("Loaded {} controls from {}", course.len(), path.display());
    Ok(course)
}

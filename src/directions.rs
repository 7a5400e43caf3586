//! Turn-by-turn directions for a planned route.
use grid_util::point::Point;
use itertools::Itertools;
use std::fmt;
use std::io::{self, Write};

/// Compass heading of a single step. North is towards smaller `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Heading {
    /// Heading of a step from `from` to the neighbouring `to`, or [None] for anything that
    /// is not a single step.
    pub fn between(from: &Point, to: &Point) -> Option<Heading> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Heading::North),
            (1, -1) => Some(Heading::Northeast),
            (1, 0) => Some(Heading::East),
            (1, 1) => Some(Heading::Southeast),
            (0, 1) => Some(Heading::South),
            (-1, 1) => Some(Heading::Southwest),
            (-1, 0) => Some(Heading::West),
            (-1, -1) => Some(Heading::Northwest),
            _ => None,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A run of steps with the same heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub heading: Heading,
    pub acres: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Go {} for {} acres.", self.heading, self.acres)
    }
}

/// Collapses the steps of a route given in walking order into instructions.
pub fn directions(cells: &[Point]) -> Vec<Instruction> {
    cells
        .iter()
        .tuple_windows()
        .filter_map(|(from, to)| Heading::between(from, to))
        .dedup_with_count()
        .map(|(acres, heading)| Instruction { heading, acres })
        .collect()
}

pub fn write_directions<W: Write>(mut writer: W, instructions: &[Instruction]) -> io::Result<()> {
    writeln!(writer, "Directions:")?;
    for instruction in instructions {
        writeln!(writer, "{}", instruction)?;
    }
    writer.flush()
}

//! Reading the inputs of a planning run and writing its map output.
pub mod raster;
pub mod text;

pub use raster::{decode_terrain, load_terrain, render_route, save_png, ROUTE_COLOUR};
pub use text::{load_course, load_elevation, parse_course, parse_elevation};

use crate::error::InputError;
use crate::grid::{self, Grid, SimpleGrid, TerrainGrid};
use crate::terrain::{Terrain, TerrainPalette};
use grid_util::point::Point;
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use log::{debug, info};
use std::path::Path;

/// Colour a planned route is drawn in on the output map.
pub const ROUTE_COLOUR: [u8; 3] = [0xCD, 0x00, 0x65];

/// Classifies every pixel of a terrain raster.
pub fn decode_terrain(image: &RgbaImage, palette: &TerrainPalette) -> TerrainGrid {
    let mut grid = SimpleGrid::new(
        image.width() as usize,
        image.height() as usize,
        Terrain::OutOfBounds,
    );
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        grid.set(x as usize, y as usize, palette.classify([r, g, b]));
    }
    grid
}

/// Opens a terrain map, returning the raster itself alongside its classes.
pub fn load_terrain<P: AsRef<Path>>(
    path: P,
    palette: &TerrainPalette,
) -> Result<(RgbaImage, TerrainGrid), InputError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|err| match err {
            ImageError::IoError(source) => InputError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => InputError::Image(other),
        })?
        .into_rgba8();
    let grid = decode_terrain(&image, palette);
    info!(
        "Loaded {}x{} terrain map from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok((image, grid))
}

/// Draws `route` on a copy of `base`. Acres whose class no longer matches the raster,
/// such as leaves or ice from a seasonal pass, are repainted in their own colour first.
pub fn render_route(
    base: &RgbaImage,
    terrain: &TerrainGrid,
    palette: &TerrainPalette,
    route: &[Point],
) -> RgbaImage {
    let mut image = base.clone();
    let mut repainted = 0;
    for point in grid::points(terrain) {
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= image.width() || y >= image.height() {
            continue;
        }
        let class = terrain.get_point(point);
        let [r, g, b, a] = image.get_pixel(x, y).0;
        if palette.classify([r, g, b]) != class {
            let [r, g, b] = class.rgb();
            image.put_pixel(x, y, Rgba([r, g, b, a]));
            repainted += 1;
        }
    }
    let [r, g, b] = ROUTE_COLOUR;
    for point in route {
        if point.x < 0 || point.y < 0 {
            continue;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x < image.width() && y < image.height() {
            image.put_pixel(x, y, Rgba([r, g, b, 0xFF]));
        }
    }
    debug!(
        "Rendered {} route acres, {} seasonal acres repainted",
        route.len(),
        repainted
    );
    image
}

pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<(), InputError> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| match err {
            ImageError::IoError(source) => InputError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => InputError::Image(other),
        })
}

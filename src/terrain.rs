use fxhash::FxHashMap;
use std::fmt;

/// Semantic class of one acre of the map. Every class has a canonical map colour; the
/// [TerrainPalette] maps raster colours back onto classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Terrain {
    OpenLand,
    RoughMeadow,
    EasyForest,
    SlowForest,
    WalkForest,
    PavedRoad,
    Footpath,
    Leaves,
    WalkableIce,
    Water,
    ImpassableVegetation,
    #[default]
    OutOfBounds,
}

impl Terrain {
    pub const ALL: [Terrain; 12] = [
        Terrain::OpenLand,
        Terrain::RoughMeadow,
        Terrain::EasyForest,
        Terrain::SlowForest,
        Terrain::WalkForest,
        Terrain::PavedRoad,
        Terrain::Footpath,
        Terrain::Leaves,
        Terrain::WalkableIce,
        Terrain::Water,
        Terrain::ImpassableVegetation,
        Terrain::OutOfBounds,
    ];

    /// Fraction of the walking speed that can be kept on this terrain, or [None] if it
    /// cannot be entered or left at all.
    pub fn speed_multiplier(self) -> Option<f64> {
        match self {
            Terrain::OpenLand | Terrain::PavedRoad | Terrain::Footpath => Some(1.0),
            Terrain::Leaves => Some(0.9),
            Terrain::EasyForest => Some(0.8),
            Terrain::SlowForest => Some(0.7),
            Terrain::RoughMeadow | Terrain::WalkForest => Some(0.6),
            Terrain::WalkableIce => Some(0.5),
            Terrain::Water | Terrain::ImpassableVegetation | Terrain::OutOfBounds => None,
        }
    }

    pub fn is_traversable(self) -> bool {
        self.speed_multiplier().is_some()
    }

    /// The colour this class has on the map raster.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Terrain::OpenLand => [0xF8, 0x94, 0x12],
            Terrain::RoughMeadow => [0xFF, 0xC0, 0x00],
            Terrain::EasyForest => [0xFF, 0xFF, 0xFF],
            Terrain::SlowForest => [0x02, 0xD0, 0x3C],
            Terrain::WalkForest => [0x02, 0x88, 0x28],
            Terrain::PavedRoad => [0x47, 0x33, 0x03],
            Terrain::Footpath => [0x00, 0x00, 0x00],
            Terrain::Leaves => [0x00, 0x00, 0x01],
            Terrain::WalkableIce => [0x00, 0x00, 0xFE],
            Terrain::Water => [0x00, 0x00, 0xFF],
            Terrain::ImpassableVegetation => [0x05, 0x49, 0x18],
            Terrain::OutOfBounds => [0xCD, 0x00, 0x65],
        }
    }

    /// Single character used when printing maps.
    pub fn symbol(self) -> char {
        match self {
            Terrain::OpenLand => '.',
            Terrain::RoughMeadow => ',',
            Terrain::EasyForest => 'f',
            Terrain::SlowForest => 'F',
            Terrain::WalkForest => 'w',
            Terrain::PavedRoad => '=',
            Terrain::Footpath => '-',
            Terrain::Leaves => 'l',
            Terrain::WalkableIce => 'i',
            Terrain::Water => '~',
            Terrain::ImpassableVegetation => '#',
            Terrain::OutOfBounds => 'x',
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Terrain::OpenLand => "open land",
            Terrain::RoughMeadow => "rough meadow",
            Terrain::EasyForest => "easy movement forest",
            Terrain::SlowForest => "slow run forest",
            Terrain::WalkForest => "walk forest",
            Terrain::PavedRoad => "paved road",
            Terrain::Footpath => "footpath",
            Terrain::Leaves => "leaves",
            Terrain::WalkableIce => "walkable ice",
            Terrain::Water => "lake/swamp",
            Terrain::ImpassableVegetation => "impassable vegetation",
            Terrain::OutOfBounds => "out of bounds",
        };
        f.write_str(name)
    }
}

/// Lookup table from raster colour to [Terrain], built once before a map is decoded.
/// Colours that are not part of the legend classify as [Terrain::OutOfBounds].
#[derive(Clone, Debug)]
pub struct TerrainPalette {
    lookup: FxHashMap<[u8; 3], Terrain>,
}

impl Default for TerrainPalette {
    fn default() -> TerrainPalette {
        TerrainPalette::new()
    }
}

impl TerrainPalette {
    pub fn new() -> TerrainPalette {
        let lookup = Terrain::ALL.iter().map(|t| (t.rgb(), *t)).collect();
        TerrainPalette { lookup }
    }

    /// Classifies an RGB colour. Alpha is not part of the key, so a fully transparent
    /// pixel reads as black, which is footpath.
    pub fn classify(&self, rgb: [u8; 3]) -> Terrain {
        self.lookup
            .get(&rgb)
            .copied()
            .unwrap_or(Terrain::OutOfBounds)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_round_trips_every_class() {
        let palette = TerrainPalette::new();
        assert_eq!(palette.len(), Terrain::ALL.len());
        for terrain in Terrain::ALL {
            assert_eq!(palette.classify(terrain.rgb()), terrain);
        }
    }

    #[test]
    fn unknown_colour_is_out_of_bounds() {
        let palette = TerrainPalette::new();
        assert_eq!(palette.classify([0x12, 0x34, 0x56]), Terrain::OutOfBounds);
    }

    #[test]
    fn untraversable_classes() {
        let blocked = Terrain::ALL
            .into_iter()
            .filter(|t| !t.is_traversable())
            .collect::<Vec<_>>();
        assert_eq!(
            blocked,
            vec![
                Terrain::Water,
                Terrain::ImpassableVegetation,
                Terrain::OutOfBounds
            ]
        );
        for terrain in Terrain::ALL.into_iter().filter(|t| t.is_traversable()) {
            let m = terrain.speed_multiplier().unwrap();
            assert!(m > 0.0 && m <= 1.0);
        }
    }
}

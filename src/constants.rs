pub const MINIMUM_COMPONENT_COUNT: u32 = 1;

// Every sample is one byte wide.
pub const BITS_PER_SAMPLE: u32 = 8;
pub const MAXIMUM_SAMPLE_VALUE: u32 = (1 << BITS_PER_SAMPLE) - 1;

// The raster adapter hands out one row per tile.
pub const TILE_HEIGHT: u32 = 1;

pub const PGM_MAGIC: &str = "P5";
pub const PPM_MAGIC: &str = "P6";

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::geometry::ImageGeometry;
use crate::source::ScanlineSource;

/// Generates an image of uniformly random samples.
///
/// A seed makes the output reproducible; without one the generator is seeded
/// from the operating system.
pub struct Noise {
    geometry: ImageGeometry,
    rng: StdRng,
    cursor: Cursor,
}

impl Noise {
    pub fn new(width: u32, height: u32, components: u32, seed: Option<u64>) -> Result<Self> {
        let geometry = ImageGeometry::new(width, height, components)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::debug!(
            "noise: {}x{} with {} components, seed {:?}",
            width,
            height,
            components,
            seed
        );
        Ok(Self {
            geometry,
            rng,
            cursor: Cursor::new(height),
        })
    }
}

impl ScanlineSource for Noise {
    fn width(&self) -> u32 {
        self.geometry.width
    }

    fn height(&self) -> u32 {
        self.geometry.height
    }

    fn components(&self) -> u32 {
        self.geometry.components
    }

    fn lineno(&self) -> u32 {
        self.cursor.lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        if self.cursor.advance().is_none() {
            return Ok(None);
        }
        let mut scanline = vec![0u8; self.geometry.scanline_len()];
        self.rng.fill_bytes(&mut scanline);
        Ok(Some(scanline))
    }
}

//! Region reads over a forward-only scanline source.
//!
//! [`RasterAdapter`] exposes a sequential source as a raster of one-row tiles.
//! Regions are full-width bands that must start at the source's current row;
//! each read pulls exactly the rows it covers and advances the source. There
//! is no rollback and no random access.

use crate::constants::TILE_HEIGHT;
use crate::error::{DataIntegrityError, GeometryError, RasterError, Result};
use crate::geometry::{ColorModel, ColorModelDescriptor, ImageGeometry, Rect};
use crate::source::{pull_scanline, ScanlineSource};

/// One row of pixels and the image row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub y: u32,
    pub data: Vec<u8>,
}

pub struct RasterAdapter<S: ScanlineSource> {
    source: S,
    // Set once tile iteration has yielded an error.
    failed: bool,
}

impl<S: ScanlineSource> RasterAdapter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            failed: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn width(&self) -> u32 {
        self.source.width()
    }

    pub fn height(&self) -> u32 {
        self.source.height()
    }

    pub fn components(&self) -> u32 {
        self.source.components()
    }

    pub fn lineno(&self) -> u32 {
        self.source.lineno()
    }

    pub fn remaining(&self) -> u32 {
        self.height().saturating_sub(self.lineno())
    }

    pub fn geometry(&self) -> ImageGeometry {
        self.source.geometry()
    }

    pub fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    /// Geometry with a concrete colour tag. Fails for component counts
    /// outside 1..=4; row reads still work in that case.
    pub fn color_model_descriptor(&self) -> Result<ColorModelDescriptor> {
        ColorModelDescriptor::new(self.geometry())
    }

    pub fn min_x(&self) -> u32 {
        0
    }

    pub fn min_y(&self) -> u32 {
        self.lineno()
    }

    pub fn num_x_tiles(&self) -> u32 {
        1
    }

    pub fn num_y_tiles(&self) -> u32 {
        self.height()
    }

    pub fn tile_width(&self) -> u32 {
        self.width()
    }

    pub fn tile_height(&self) -> u32 {
        TILE_HEIGHT
    }

    /// Materializes `rect` into a row-major buffer of
    /// `rect.height * width * components` bytes.
    pub fn read_region(&mut self, rect: Rect) -> Result<Vec<u8>> {
        self.check_region(&rect)?;

        let components = self.components();
        let mut region = Vec::with_capacity(rect.byte_len(components));
        log::debug!(
            "reading region of {} rows at row {}",
            rect.height,
            rect.y
        );

        for read in 0..rect.height {
            let Some(scanline) = pull_scanline(&mut self.source)? else {
                return Err(DataIntegrityError::Truncated {
                    requested: rect.height,
                    read,
                }
                .into());
            };
            region.extend_from_slice(&scanline);
        }

        Ok(region)
    }

    /// Reads the next `rows` rows at the current position.
    pub fn read_rows(&mut self, rows: u32) -> Result<Vec<u8>> {
        let rect = Rect::rows(self.lineno(), self.width(), rows);
        self.read_region(rect)
    }

    /// Reads every row that has not been consumed yet.
    pub fn read_remaining(&mut self) -> Result<Vec<u8>> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(RasterError::EndOfStream);
        }
        self.read_rows(remaining)
    }

    pub fn read_tile(&mut self) -> Result<Tile> {
        let y = self.lineno();
        let data = self.read_rows(TILE_HEIGHT)?;
        Ok(Tile { y, data })
    }

    fn check_region(&self, rect: &Rect) -> Result<()> {
        if rect.width == 0 || rect.height == 0 {
            return Err(GeometryError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            }
            .into());
        }
        if rect.x != 0 {
            return Err(GeometryError::RegionOffset { x: rect.x }.into());
        }
        if rect.width != self.width() {
            return Err(GeometryError::RegionWidthMismatch {
                requested: rect.width,
                width: self.width(),
            }
            .into());
        }
        if self.source.is_exhausted() {
            return Err(RasterError::EndOfStream);
        }
        if rect.y != self.lineno() {
            return Err(GeometryError::NonSequentialRegion {
                requested: rect.y,
                lineno: self.lineno(),
            }
            .into());
        }
        if rect.height > self.remaining() {
            return Err(GeometryError::RegionPastEnd {
                requested: rect.height,
                remaining: self.remaining(),
            }
            .into());
        }
        Ok(())
    }
}

/// Yields one tile per remaining row. The first error is yielded once and
/// ends the iteration.
impl<S: ScanlineSource> Iterator for RasterAdapter<S> {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_tile() {
            Err(RasterError::EndOfStream) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
            tile => Some(tile),
        }
    }
}

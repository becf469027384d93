use super::{check_target, scaled_dimensions, source_position};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::interpolation::resample_nearest_row;
use crate::source::{pull_required_scanline, ScanlineSource};

/// Scales a source with nearest-neighbour selection in both directions.
pub struct NearestNeighborScaler<S: ScanlineSource> {
    source: S,
    width: u32,
    height: u32,
    cursor: Cursor,
    buffer: Option<Vec<u8>>,
}

impl<S: ScanlineSource> NearestNeighborScaler<S> {
    pub fn new(source: S, width: u32, height: u32) -> Result<Self> {
        check_target(width, height)?;
        log::debug!(
            "nearest scaler: {}x{} -> {}x{}",
            source.width(),
            source.height(),
            width,
            height
        );
        Ok(Self {
            source,
            width,
            height,
            cursor: Cursor::new(height),
            buffer: None,
        })
    }

    pub fn with_ratio(source: S, ratio: f64) -> Result<Self> {
        let (width, height) = scaled_dimensions(source.width(), source.height(), ratio)?;
        Self::new(source, width, height)
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    // Reads forward until `line` is the most recently pulled source row.
    fn fill_buffer(&mut self, line: u32) -> Result<&[u8]> {
        let mut row = match self.buffer.take() {
            Some(row) => row,
            None => pull_required_scanline(&mut self.source)?,
        };
        while self.source.lineno() <= line {
            row = pull_required_scanline(&mut self.source)?;
        }
        Ok(self.buffer.insert(row).as_slice())
    }
}

impl<S: ScanlineSource> ScanlineSource for NearestNeighborScaler<S> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn components(&self) -> u32 {
        self.source.components()
    }

    fn lineno(&self) -> u32 {
        self.cursor.lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        if self.cursor.is_exhausted() {
            return Ok(None);
        }
        let line = self.cursor.lineno();
        let sample = source_position(line, self.source.height(), self.height).floor() as u32;
        let width = self.width as usize;
        let components = self.components() as usize;
        let scanline = resample_nearest_row(self.fill_buffer(sample)?, width, components)?;
        self.cursor.advance();
        Ok(Some(scanline))
    }
}

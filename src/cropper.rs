use crate::cursor::Cursor;
use crate::error::{GeometryError, Result};
use crate::source::{pull_required_scanline, ScanlineSource};

/// Extracts a rectangle from a source.
///
/// A rectangle that runs past the right or bottom edge is truncated at the
/// edge. Rows above the rectangle are read and discarded.
pub struct Cropper<S: ScanlineSource> {
    source: S,
    width: u32,
    height: u32,
    x_offset: u32,
    y_offset: u32,
    cursor: Cursor,
}

impl<S: ScanlineSource> Cropper<S> {
    pub fn new(source: S, width: u32, height: u32, x_offset: u32, y_offset: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimensions { width, height }.into());
        }
        let (source_width, source_height) = (source.width(), source.height());
        if x_offset >= source_width || y_offset >= source_height {
            return Err(GeometryError::CropOutsideImage {
                x: x_offset,
                y: y_offset,
                width: source_width,
                height: source_height,
            }
            .into());
        }

        let cropped_width = width.min(source_width - x_offset);
        let cropped_height = height.min(source_height - y_offset);
        if (cropped_width, cropped_height) != (width, height) {
            log::warn!(
                "crop {}x{}+{}+{} truncated to {}x{} at the image boundary",
                width,
                height,
                x_offset,
                y_offset,
                cropped_width,
                cropped_height
            );
        }

        Ok(Self {
            source,
            width: cropped_width,
            height: cropped_height,
            x_offset,
            y_offset,
            cursor: Cursor::new(cropped_height),
        })
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ScanlineSource> ScanlineSource for Cropper<S> {
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
        while self.source.lineno() < self.y_offset {
            pull_required_scanline(&mut self.source)?;
        }

        let scanline = pull_required_scanline(&mut self.source)?;
        let components = self.components() as usize;
        let start = self.x_offset as usize * components;
        let end = start + self.width as usize * components;
        self.cursor.advance();
        Ok(Some(scanline[start..end].to_vec()))
    }
}

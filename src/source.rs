//! The pull contract every pipeline stage implements.

use crate::cursor::Cursor;
use crate::error::{DataIntegrityError, Result};
use crate::geometry::{check_scanline, scanline_len, ColorModel, ImageGeometry};

/// Sequential provider of interleaved 8-bit scanlines.
///
/// Width, height and component count are fixed for the lifetime of a source.
/// `next_scanline` yields rows in order and returns `Ok(None)` once
/// `lineno() == height()`; asking again is not an error.
pub trait ScanlineSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn components(&self) -> u32;

    /// Index of the row the next call to `next_scanline` produces.
    fn lineno(&self) -> u32;

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>>;

    fn color_model(&self) -> ColorModel {
        ColorModel::from_components(self.components())
    }

    fn geometry(&self) -> ImageGeometry {
        ImageGeometry {
            width: self.width(),
            height: self.height(),
            components: self.components(),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.lineno() >= self.height()
    }
}

impl<S: ScanlineSource + ?Sized> ScanlineSource for Box<S> {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn components(&self) -> u32 {
        (**self).components()
    }
    fn lineno(&self) -> u32 {
        (**self).lineno()
    }
    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).next_scanline()
    }
    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }
}

impl<S: ScanlineSource + ?Sized> ScanlineSource for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn components(&self) -> u32 {
        (**self).components()
    }
    fn lineno(&self) -> u32 {
        (**self).lineno()
    }
    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).next_scanline()
    }
    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }
}

/// Pulls the next row and checks it against the source's declared geometry.
pub fn pull_scanline<S: ScanlineSource + ?Sized>(source: &mut S) -> Result<Option<Vec<u8>>> {
    let line = source.lineno();
    let expected = scanline_len(source.width(), source.components());
    match source.next_scanline()? {
        Some(scanline) => {
            check_scanline(line, &scanline, expected)?;
            Ok(Some(scanline))
        }
        None => Ok(None),
    }
}

/// Like [`pull_scanline`], but a missing row is a truncation error.
pub fn pull_required_scanline<S: ScanlineSource + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    let line = source.lineno();
    pull_scanline(source)?.ok_or_else(|| {
        DataIntegrityError::Truncated {
            requested: line + 1,
            read: line,
        }
        .into()
    })
}

/// A fully decoded frame held in memory, served one row at a time.
#[derive(Debug, Clone)]
pub struct MemorySource {
    geometry: ImageGeometry,
    pixels: Vec<u8>,
    cursor: Cursor,
}

impl MemorySource {
    pub fn new(geometry: ImageGeometry, pixels: Vec<u8>) -> Result<Self> {
        geometry.validate()?;
        let frame_len = geometry.frame_len()?;
        if pixels.len() != frame_len {
            return Err(DataIntegrityError::BufferSize {
                expected: frame_len,
                actual: pixels.len(),
            }
            .into());
        }
        Ok(Self {
            geometry,
            pixels,
            cursor: Cursor::new(geometry.height),
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl ScanlineSource for MemorySource {
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
        let Some(line) = self.cursor.advance() else {
            return Ok(None);
        };
        let stride = self.geometry.scanline_len();
        let start = line as usize * stride;
        Ok(Some(self.pixels[start..start + stride].to_vec()))
    }
}

use crate::cursor::Cursor;
use crate::error::{GeometryError, Result};
use crate::source::ScanlineSource;

/// Generates an image where every pixel holds the same sample bytes.
///
/// The component count is the length of `color`.
#[derive(Debug, Clone)]
pub struct Solid {
    width: u32,
    height: u32,
    color: Vec<u8>,
    cursor: Cursor,
}

impl Solid {
    pub fn new(width: u32, height: u32, color: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimensions { width, height }.into());
        }
        if color.is_empty() {
            return Err(GeometryError::ZeroComponents.into());
        }
        Ok(Self {
            width,
            height,
            color,
            cursor: Cursor::new(height),
        })
    }

    /// Opaque black RGB.
    pub fn black(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, vec![0, 0, 0])
    }
}

impl ScanlineSource for Solid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn components(&self) -> u32 {
        self.color.len() as u32
    }

    fn lineno(&self) -> u32 {
        self.cursor.lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self
            .cursor
            .advance()
            .map(|_| self.color.repeat(self.width as usize)))
    }
}

use crate::cursor::Cursor;
use crate::error::{DataIntegrityError, Result};
use crate::geometry::ImageGeometry;
use crate::source::ScanlineSource;
use std::io::{ErrorKind, Read};

/// Reads headerless interleaved pixels from a byte stream, one row per pull.
pub struct RawReader<R: Read> {
    reader: R,
    geometry: ImageGeometry,
    cursor: Cursor,
}

impl<R: Read> RawReader<R> {
    pub fn new(reader: R, geometry: ImageGeometry) -> Result<Self> {
        geometry.validate()?;
        log::debug!(
            "raw reader: {}x{} with {} components",
            geometry.width,
            geometry.height,
            geometry.components
        );
        Ok(Self {
            reader,
            geometry,
            cursor: Cursor::new(geometry.height),
        })
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ScanlineSource for RawReader<R> {
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
        if self.cursor.is_exhausted() {
            return Ok(None);
        }
        let line = self.cursor.lineno();
        let mut scanline = vec![0u8; self.geometry.scanline_len()];
        match self.reader.read_exact(&mut scanline) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(DataIntegrityError::ShortRead { line }.into());
            }
            Err(e) => return Err(e.into()),
        }
        self.cursor.advance();
        log::trace!("raw reader: row {}", line);
        Ok(Some(scanline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use std::io::Cursor as IoCursor;

    #[test]
    fn test_reads_rows() {
        let geometry = ImageGeometry::new(2, 2, 3).unwrap();
        let data: Vec<u8> = (0..12).collect();
        let mut reader = RawReader::new(IoCursor::new(data), geometry).unwrap();
        assert_eq!(reader.next_scanline().unwrap(), Some(vec![0, 1, 2, 3, 4, 5]));
        assert_eq!(reader.next_scanline().unwrap(), Some(vec![6, 7, 8, 9, 10, 11]));
        assert_eq!(reader.next_scanline().unwrap(), None);
        assert_eq!(reader.lineno(), 2);
    }

    #[test]
    fn test_short_input() {
        let geometry = ImageGeometry::new(4, 2, 1).unwrap();
        let mut reader = RawReader::new(IoCursor::new(vec![1u8; 6]), geometry).unwrap();
        assert!(reader.next_scanline().unwrap().is_some());
        let err = reader.next_scanline().unwrap_err();
        assert!(matches!(
            err,
            RasterError::DataIntegrity(DataIntegrityError::ShortRead { line: 1 })
        ));
        // A failed pull does not move the cursor.
        assert_eq!(reader.lineno(), 1);
    }

    #[test]
    fn test_trailing_bytes_are_left_unread() {
        let geometry = ImageGeometry::new(1, 1, 1).unwrap();
        let mut reader = RawReader::new(IoCursor::new(vec![7u8, 8, 9]), geometry).unwrap();
        assert_eq!(reader.next_scanline().unwrap(), Some(vec![7]));
        assert_eq!(reader.next_scanline().unwrap(), None);
        assert_eq!(reader.into_inner().position(), 1);
    }
}

use super::{check_target, scaled_dimensions, source_position};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::interpolation::resample_bilinear_rows;
use crate::source::{pull_required_scanline, ScanlineSource};

/// Scales a source by blending the four nearest source pixels.
///
/// Two source rows are buffered at a time. Every buffered row is padded with a
/// copy of its last pixel, and the last source row is paired with itself, so
/// the right and bottom edges blend against their own values.
pub struct BilinearScaler<S: ScanlineSource> {
    source: S,
    width: u32,
    height: u32,
    cursor: Cursor,
    rows: Option<(Vec<u8>, Vec<u8>)>,
}

impl<S: ScanlineSource> BilinearScaler<S> {
    pub fn new(source: S, width: u32, height: u32) -> Result<Self> {
        check_target(width, height)?;
        log::debug!(
            "bilinear scaler: {}x{} -> {}x{}",
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
            rows: None,
        })
    }

    pub fn with_ratio(source: S, ratio: f64) -> Result<Self> {
        let (width, height) = scaled_dimensions(source.width(), source.height(), ratio)?;
        Self::new(source, width, height)
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_with_padding(&mut self) -> Result<Vec<u8>> {
        let components = self.source.components() as usize;
        let mut row = pull_required_scanline(&mut self.source)?;
        if row.len() >= components {
            row.extend_from_within(row.len() - components..);
        }
        Ok(row)
    }

    // Leaves source row `line` on top and the row after it below.
    fn fill_rows(&mut self, line: u32) -> Result<(&[u8], &[u8])> {
        let (mut top, mut bottom) = match self.rows.take() {
            Some(rows) => rows,
            None => {
                let row = self.read_with_padding()?;
                (row.clone(), row)
            }
        };

        let pending = (line as i64 + 2 - self.source.lineno() as i64).max(0);
        for _ in 0..pending {
            if self.source.lineno() < self.source.height() {
                let next = self.read_with_padding()?;
                top = std::mem::replace(&mut bottom, next);
            } else {
                top.clone_from(&bottom);
            }
        }

        let (top, bottom) = self.rows.insert((top, bottom));
        Ok((top.as_slice(), bottom.as_slice()))
    }
}

impl<S: ScanlineSource> ScanlineSource for BilinearScaler<S> {
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
        let sample = source_position(self.cursor.lineno(), self.source.height(), self.height);
        let sample_i = sample as u32;
        let ty = sample - sample_i as f64;
        let width = self.width as usize;
        let components = self.source.components() as usize;

        let (top, bottom) = self.fill_rows(sample_i)?;
        let scanline = resample_bilinear_rows(top, bottom, width, components, ty)?;
        self.cursor.advance();
        Ok(Some(scanline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DataIntegrityError, GeometryError, RasterError};
    use crate::geometry::ImageGeometry;
    use crate::solid::Solid;
    use crate::source::MemorySource;

    fn two_rows() -> MemorySource {
        let geometry = ImageGeometry::new(2, 2, 1).unwrap();
        MemorySource::new(geometry, vec![0, 100, 0, 200]).unwrap()
    }

    fn collect<S: ScanlineSource>(mut source: S) -> Vec<Vec<u8>> {
        let mut rows = Vec::new();
        while let Some(row) = source.next_scanline().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_identity_dimensions_reproduce_source() {
        let scaler = BilinearScaler::new(two_rows(), 2, 2).unwrap();
        assert_eq!(collect(scaler), vec![vec![0, 100], vec![0, 200]]);
    }

    #[test]
    fn test_vertical_upscale_blends_rows() {
        let scaler = BilinearScaler::new(two_rows(), 2, 4).unwrap();
        assert_eq!(
            collect(scaler),
            vec![vec![0, 100], vec![0, 150], vec![0, 200], vec![0, 200]]
        );
    }

    #[test]
    fn test_horizontal_upscale_pads_right_edge() {
        let geometry = ImageGeometry::new(2, 1, 1).unwrap();
        let source = MemorySource::new(geometry, vec![0, 100]).unwrap();
        let scaler = BilinearScaler::new(source, 4, 1).unwrap();
        assert_eq!(collect(scaler), vec![vec![0, 50, 100, 100]]);
    }

    #[test]
    fn test_solid_stays_solid() {
        // Half-pixel vertical phases and whole-pixel horizontal steps keep
        // the weights exact.
        let solid = Solid::new(100, 200, vec![10, 20, 105]).unwrap();
        let scaler = BilinearScaler::new(solid, 50, 400).unwrap();
        let rows = collect(scaler);
        assert_eq!(rows.len(), 400);
        for row in rows {
            assert_eq!(row.len(), 50 * 3);
            for pixel in row.chunks_exact(3) {
                assert_eq!(pixel, &[10, 20, 105]);
            }
        }
    }

    #[test]
    fn test_small_scaling() {
        let solid = Solid::new(10, 20, vec![0, 0, 0]).unwrap();
        let mut scaler = BilinearScaler::new(solid, 2, 5).unwrap();
        assert_eq!((scaler.width(), scaler.height()), (2, 5));
        for _ in 0..5 {
            assert_eq!(scaler.next_scanline().unwrap().unwrap().len(), 6);
        }
        assert!(scaler.next_scanline().unwrap().is_none());
    }

    #[test]
    fn test_bad_ratio() {
        for ratio in [0.0, -1.0, -0.1] {
            assert!(matches!(
                BilinearScaler::with_ratio(two_rows(), ratio),
                Err(RasterError::Geometry(GeometryError::ZeroScale))
            ));
        }
    }

    #[test]
    fn test_bad_source_row_propagates() {
        struct Short(u32);
        impl ScanlineSource for Short {
            fn width(&self) -> u32 {
                3
            }
            fn height(&self) -> u32 {
                2
            }
            fn components(&self) -> u32 {
                1
            }
            fn lineno(&self) -> u32 {
                self.0
            }
            fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
                self.0 += 1;
                Ok(Some(vec![1, 2]))
            }
        }
        let mut scaler = BilinearScaler::new(Short(0), 3, 2).unwrap();
        assert!(matches!(
            scaler.next_scanline(),
            Err(RasterError::DataIntegrity(DataIntegrityError::ScanlineSize { .. }))
        ));
    }
}

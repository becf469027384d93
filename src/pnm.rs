//! Netpbm and headerless sinks that drain a pipeline through [`RasterAdapter`].

use std::io::Write;

use crate::alpha_stripper::AlphaStripper;
use crate::constants::{MAXIMUM_SAMPLE_VALUE, PGM_MAGIC, PPM_MAGIC};
use crate::error::{RasterError, Result};
use crate::geometry::ColorModel;
use crate::raster_adapter::RasterAdapter;
use crate::source::ScanlineSource;

/// Writes `source` as binary PGM (grayscale) or PPM (RGB).
///
/// Alpha is dropped before encoding. Returns the number of bytes written,
/// header included.
pub fn write_pnm<S, W>(source: S, writer: &mut W) -> Result<usize>
where
    S: ScanlineSource,
    W: Write + ?Sized,
{
    let magic = match source.color_model() {
        ColorModel::Grayscale => PGM_MAGIC,
        ColorModel::Rgb => PPM_MAGIC,
        ColorModel::Unknown => {
            return Err(RasterError::UnsupportedFormat {
                components: source.components(),
            });
        }
    };

    let adapter = RasterAdapter::new(AlphaStripper::new(source));
    let header = format!(
        "{}\n{} {}\n{}\n",
        magic,
        adapter.width(),
        adapter.height(),
        MAXIMUM_SAMPLE_VALUE
    );
    writer.write_all(header.as_bytes())?;
    log::debug!(
        "writing {} {}x{}",
        magic,
        adapter.width(),
        adapter.height()
    );

    let written = write_tiles(adapter, writer)?;
    Ok(header.len() + written)
}

/// Writes the interleaved samples of `source` with no header.
pub fn write_raw<S, W>(source: S, writer: &mut W) -> Result<usize>
where
    S: ScanlineSource,
    W: Write + ?Sized,
{
    write_tiles(RasterAdapter::new(source), writer)
}

fn write_tiles<S, W>(adapter: RasterAdapter<S>, writer: &mut W) -> Result<usize>
where
    S: ScanlineSource,
    W: Write + ?Sized,
{
    let mut written = 0;
    for tile in adapter {
        let tile = tile?;
        log::trace!("row {}: {} bytes", tile.y, tile.data.len());
        writer.write_all(&tile.data)?;
        written += tile.data.len();
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::Solid;

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        let n = write_pnm(Solid::new(2, 1, vec![1, 2, 3]).unwrap(), &mut out).unwrap();
        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[1, 2, 3, 1, 2, 3]);
        assert_eq!(out, expected);
        assert_eq!(n, out.len());
    }

    #[test]
    fn test_write_pgm_drops_alpha() {
        let mut out = Vec::new();
        write_pnm(Solid::new(3, 2, vec![50, 255]).unwrap(), &mut out).unwrap();
        let mut expected = b"P5\n3 2\n255\n".to_vec();
        expected.extend_from_slice(&[50; 6]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_write_pnm_rejects_unknown() {
        let mut out = Vec::new();
        let err = write_pnm(Solid::new(1, 1, vec![0; 5]).unwrap(), &mut out).unwrap_err();
        assert!(matches!(err, RasterError::UnsupportedFormat { components: 5 }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_raw_keeps_all_components() {
        let mut out = Vec::new();
        let n = write_raw(Solid::new(2, 2, vec![0; 5]).unwrap(), &mut out).unwrap();
        assert_eq!(n, 20);
        assert_eq!(out.len(), 20);
    }
}

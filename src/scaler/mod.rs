//! Streaming scalers.
//!
//! Each scaler wraps another [`ScanlineSource`](crate::source::ScanlineSource)
//! and is itself a source, so stages can be chained. Source rows are read
//! strictly forward and only as far as the next output row needs.
//!
//! - `nearest`: picks one source row per output row, resamples it with
//!   [`resample_nearest`](crate::interpolation::resample_nearest).
//! - `bilinear`: keeps two padded rows and blends them with
//!   [`resample_bilinear`](crate::interpolation::resample_bilinear).

pub mod bilinear;
pub mod nearest;

pub use bilinear::BilinearScaler;
pub use nearest::NearestNeighborScaler;

use crate::error::{GeometryError, Result};

pub(crate) fn check_target(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GeometryError::ZeroScale.into());
    }
    Ok(())
}

/// Output dimensions for a uniform scale factor, floored.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> Result<(u32, u32)> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(GeometryError::ZeroScale.into());
    }
    let scaled_width = (width as f64 * ratio).floor() as u32;
    let scaled_height = (height as f64 * ratio).floor() as u32;
    check_target(scaled_width, scaled_height)?;
    Ok((scaled_width, scaled_height))
}

/// Source row sampled by output row `line`, as a fractional position.
pub(crate) fn source_position(line: u32, source_height: u32, height: u32) -> f64 {
    line as f64 * source_height as f64 / height as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(100, 200, 1.0).unwrap(), (100, 200));
        assert_eq!(scaled_dimensions(100, 200, 2.1).unwrap(), (210, 420));
        assert_eq!(scaled_dimensions(100, 200, 0.1).unwrap(), (10, 20));
        assert_eq!(scaled_dimensions(100, 200, 1.1).unwrap(), (110, 220));
    }

    #[test]
    fn test_bad_ratios() {
        for ratio in [0.0, -1.0, -0.1, f64::NAN, f64::INFINITY, 0.001] {
            assert!(matches!(
                scaled_dimensions(100, 200, ratio),
                Err(RasterError::Geometry(GeometryError::ZeroScale))
            ));
        }
    }
}

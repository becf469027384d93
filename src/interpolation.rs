//! Horizontal scanline resampling.
//!
//! Both resamplers work on interleaved 8-bit rows and produce one destination
//! row of `dst_width * components` bytes. They are plain functions with no
//! state and can be called from any thread.
//!
//! The two variants measure the source row differently. Nearest neighbour
//! treats the row as `len / components` pixels. Bilinear treats it as
//! `len / components - 1` sampleable intervals, because the scalers feed it
//! rows padded with a duplicate of their last pixel. Changing either
//! derivation changes output for narrow rows.
//!
//! ```text
//!     c00                 a    c10
//!      --------------------------
//!      |                  |     |
//!      |                ty|     |
//!      |       tx         |     |
//!      |------------------+-----|
//!      |                  |     |
//!      |            sample|     |
//!      --------------------------
//!     c01                 b    c11
//!
//! sample = (1 - ty) * (1 - tx) * c00 + (1 - ty) * tx * c10
//!        +       ty * (1 - tx) * c01 +       ty * tx * c11
//! ```

use crate::error::{RasterError, Result};

/// Source width the nearest-neighbour resampler infers from a row: every
/// whole pixel counts.
pub fn nearest_source_width(scanline_len: usize, components: usize) -> usize {
    scanline_len / components
}

/// Source width the bilinear resampler infers from a row: the number of
/// intervals between pixels, one less than the pixel count.
pub fn bilinear_source_width(scanline_len: usize, components: usize) -> Option<usize> {
    (scanline_len / components).checked_sub(1)
}

/// Resamples one row with nearest-neighbour selection.
///
/// Destination pixel `i` copies source pixel `floor(i * src_width / dst_width)`
/// verbatim. An empty row (`src_width == 0`) yields zero-filled output.
pub fn resample_nearest(
    scanline: &[u8],
    dst_width: usize,
    src_width: usize,
    components: usize,
) -> Result<Vec<u8>> {
    if components == 0 {
        return Err(RasterError::InvalidArgument("component count must be positive"));
    }
    if dst_width == 0 {
        return Err(RasterError::InvalidArgument("destination width must be positive"));
    }
    if src_width * components > scanline.len() {
        return Err(RasterError::InvalidArgument("source width exceeds the scanline"));
    }

    let inv_scale_x = src_width as f64 / dst_width as f64;
    let mut dest = vec![0u8; dst_width * components];

    for (i, pixel) in dest.chunks_exact_mut(components).enumerate() {
        let src_pos = (i as f64 * inv_scale_x) as usize * components;
        if let Some(sample) = scanline.get(src_pos..src_pos + components) {
            pixel.copy_from_slice(sample);
        }
    }

    Ok(dest)
}

/// Nearest-neighbour resampling with the source width inferred from the row.
pub fn resample_nearest_row(scanline: &[u8], dst_width: usize, components: usize) -> Result<Vec<u8>> {
    if components == 0 {
        return Err(RasterError::InvalidArgument("component count must be positive"));
    }
    let src_width = nearest_source_width(scanline.len(), components);
    resample_nearest(scanline, dst_width, src_width, components)
}

/// Blends two rows with bilinear weights.
///
/// `src_width` is the number of intervals along the rows (see
/// [`bilinear_source_width`]). `ty` is the vertical phase between `top` and
/// `bottom`, constant for the whole row. The right-hand neighbour is clamped to
/// the last pixel so an unpadded row is never read past its end.
///
/// Blended values are stored through a truncating 16-bit intermediate and
/// masked to the low byte. They are not clamped to `0..=255`.
pub fn resample_bilinear(
    top: &[u8],
    bottom: &[u8],
    dst_width: usize,
    src_width: usize,
    components: usize,
    ty: f64,
) -> Result<Vec<u8>> {
    if components == 0 {
        return Err(RasterError::InvalidArgument("component count must be positive"));
    }
    if dst_width == 0 {
        return Err(RasterError::InvalidArgument("destination width must be positive"));
    }
    if top.len() != bottom.len() {
        return Err(RasterError::InvalidArgument("scanlines don't have the same width"));
    }
    if !(0.0..1.0).contains(&ty) {
        return Err(RasterError::InvalidArgument("vertical phase must lie in [0, 1)"));
    }
    let pixels = top.len() / components;
    if pixels == 0 {
        return Err(RasterError::InvalidArgument("scanline holds no pixels"));
    }
    if src_width > pixels {
        return Err(RasterError::InvalidArgument("source width exceeds the scanline"));
    }

    let last = pixels - 1;
    let width_ratio_inv = src_width as f64 / dst_width as f64;
    let mut dest = Vec::with_capacity(dst_width * components);

    for i in 0..dst_width {
        let sample_x = i as f64 * width_ratio_inv;
        let sample_x_i = sample_x as usize;

        let tx = sample_x - sample_x_i as f64;
        let _tx = 1.0 - tx;

        let p11 = tx * ty;
        let p01 = _tx * ty;
        let p10 = tx - p11;
        let p00 = _tx - p01;

        let c0 = sample_x_i.min(last) * components;
        let c1 = (sample_x_i + 1).min(last) * components;

        for j in 0..components {
            let c00 = top[c0 + j] as f64;
            let c10 = top[c1 + j] as f64;
            let c01 = bottom[c0 + j] as f64;
            let c11 = bottom[c1 + j] as f64;

            dest.push(wrap_to_byte(p00 * c00 + p10 * c10 + p01 * c01 + p11 * c11));
        }
    }

    Ok(dest)
}

/// Bilinear resampling with the interval count inferred from the rows.
pub fn resample_bilinear_rows(
    top: &[u8],
    bottom: &[u8],
    dst_width: usize,
    components: usize,
    ty: f64,
) -> Result<Vec<u8>> {
    if components == 0 {
        return Err(RasterError::InvalidArgument("component count must be positive"));
    }
    let src_width = bilinear_source_width(top.len(), components)
        .ok_or(RasterError::InvalidArgument("scanline holds no pixels"))?;
    resample_bilinear(top, bottom, dst_width, src_width, components, ty)
}

// Truncate toward zero into an i16, then keep the low byte.
fn wrap_to_byte(value: f64) -> u8 {
    ((value as i32) as i16 & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_halves_row() {
        let out = resample_nearest(&[10, 20, 30, 40], 2, 4, 1).unwrap();
        assert_eq!(out, vec![10, 30]);
    }

    #[test]
    fn test_nearest_identity() {
        let row: Vec<u8> = (0..30).collect();
        let out = resample_nearest_row(&row, 10, 3).unwrap();
        assert_eq!(out, row);
    }

    #[test]
    fn test_nearest_copies_whole_pixels() {
        let row = [1, 2, 3, 4, 5, 6];
        let out = resample_nearest_row(&row, 4, 3).unwrap();
        assert_eq!(out, vec![1, 2, 3, 1, 2, 3, 4, 5, 6, 4, 5, 6]);
    }

    #[test]
    fn test_nearest_index_uses_precomputed_step() {
        // 49 * (2 / 98) lands just below 1.0 and truncates to pixel 0, where
        // an exact 49 * 2 / 98 would pick pixel 1.
        let out = resample_nearest(&[10, 200], 98, 2, 1).unwrap();
        assert_eq!(&out[48..51], &[10, 10, 200]);
        assert_eq!(out.iter().filter(|&&v| v == 10).count(), 50);
    }

    #[test]
    fn test_nearest_empty_row_is_zero_filled() {
        let out = resample_nearest_row(&[], 3, 2).unwrap();
        assert_eq!(out, vec![0; 6]);
    }

    #[test]
    fn test_nearest_contract_violations() {
        assert!(matches!(
            resample_nearest(&[1, 2], 0, 2, 1),
            Err(RasterError::InvalidArgument(_))
        ));
        assert!(matches!(
            resample_nearest(&[1, 2], 2, 2, 0),
            Err(RasterError::InvalidArgument(_))
        ));
        assert!(matches!(
            resample_nearest(&[1, 2], 2, 3, 1),
            Err(RasterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bilinear_blends_two_rows() {
        let out = resample_bilinear_rows(&[0, 100], &[0, 200], 2, 1, 0.5).unwrap();
        assert_eq!(out, vec![0, 75]);
    }

    #[test]
    fn test_bilinear_identity_on_padded_row() {
        // Rows carry a duplicated last pixel, as the scalers produce them.
        let row = [5, 50, 200, 255, 255];
        let out = resample_bilinear_rows(&row, &row, 4, 1, 0.0).unwrap();
        assert_eq!(out, vec![5, 50, 200, 255]);
    }

    #[test]
    fn test_bilinear_truncates() {
        let out = resample_bilinear_rows(&[0, 10], &[0, 10], 3, 1, 0.0).unwrap();
        // 10/3 and 20/3 truncate to 3 and 6.
        assert_eq!(out, vec![0, 3, 6]);
    }

    #[test]
    fn test_width_derivations_differ() {
        // Same two-pixel row, same destination width: nearest sees 2 pixels,
        // bilinear sees 1 interval.
        let row = [0, 100];
        assert_eq!(nearest_source_width(row.len(), 1), 2);
        assert_eq!(bilinear_source_width(row.len(), 1), Some(1));
        assert_eq!(resample_nearest_row(&row, 4, 1).unwrap(), vec![0, 0, 100, 100]);
        assert_eq!(
            resample_bilinear_rows(&row, &row, 4, 1, 0.0).unwrap(),
            vec![0, 25, 50, 75]
        );
    }

    #[test]
    fn test_bilinear_clamps_last_neighbour() {
        // Explicit source width equal to the pixel count on an unpadded row.
        let row = [10, 20, 30];
        let out = resample_bilinear(&row, &row, 3, 3, 1, 0.0).unwrap();
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn test_bilinear_multi_component() {
        let top = [0, 0, 0, 100, 200, 40];
        let bottom = [100, 100, 100, 100, 200, 40];
        let out = resample_bilinear_rows(&top, &bottom, 1, 3, 0.5).unwrap();
        assert_eq!(out, vec![50, 50, 50]);
    }

    #[test]
    fn test_bilinear_contract_violations() {
        assert!(resample_bilinear_rows(&[1, 2], &[1, 2, 3], 2, 1, 0.0).is_err());
        assert!(resample_bilinear_rows(&[1, 2], &[1, 2], 0, 1, 0.0).is_err());
        assert!(resample_bilinear_rows(&[1, 2], &[1, 2], 2, 1, 1.0).is_err());
        assert!(resample_bilinear_rows(&[1, 2], &[1, 2], 2, 1, f64::NAN).is_err());
        assert!(resample_bilinear_rows(&[], &[], 2, 1, 0.0).is_err());
        assert!(resample_bilinear(&[1, 2], &[1, 2], 2, 3, 1, 0.0).is_err());
    }

    #[test]
    fn test_store_wraps_instead_of_clamping() {
        assert_eq!(wrap_to_byte(255.9), 255);
        assert_eq!(wrap_to_byte(256.0), 0);
        assert_eq!(wrap_to_byte(300.5), 44);
        assert_eq!(wrap_to_byte(-1.0), 255);
        assert_eq!(wrap_to_byte(-0.5), 0);
    }

    #[test]
    fn test_bilinear_is_lossy_round_trip() {
        let row = [0, 255, 0, 255, 0, 255, 255];
        let down = resample_bilinear_rows(&row, &row, 3, 1, 0.0).unwrap();
        assert_eq!(down, vec![0, 0, 0]);
        let mut padded = down.clone();
        padded.push(*down.last().unwrap());
        let up = resample_bilinear_rows(&padded, &padded, 6, 1, 0.0).unwrap();
        assert_eq!(up.len(), 6);
        assert_ne!(up, row[..6].to_vec());
    }
}

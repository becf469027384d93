use crate::error::{GeometryError, Result};
use crate::scaler::{BilinearScaler, NearestNeighborScaler};
use crate::source::ScanlineSource;

enum FitStage<S: ScanlineSource> {
    Enlarge(NearestNeighborScaler<S>),
    Shrink(BilinearScaler<S>),
    Unchanged(S),
}

/// Scales a source to fit inside a box while keeping its aspect ratio.
///
/// Enlarging uses nearest neighbour, shrinking uses bilinear, and a source
/// that already fits the box exactly passes through.
pub struct Fit<S: ScanlineSource> {
    stage: FitStage<S>,
}

impl<S: ScanlineSource> Fit<S> {
    pub fn new(source: S, box_width: u32, box_height: u32) -> Result<Self> {
        if box_width == 0 || box_height == 0 {
            return Err(GeometryError::ZeroScale.into());
        }
        let ratio = fit_ratio(source.width(), source.height(), box_width, box_height);
        let width = ((source.width() as f64 * ratio).floor() as u32).max(1);
        let height = ((source.height() as f64 * ratio).floor() as u32).max(1);
        log::debug!(
            "fit {}x{} into {}x{}: ratio {:.4}, result {}x{}",
            source.width(),
            source.height(),
            box_width,
            box_height,
            ratio,
            width,
            height
        );

        let stage = if ratio > 1.0 {
            FitStage::Enlarge(NearestNeighborScaler::new(source, width, height)?)
        } else if ratio < 1.0 {
            FitStage::Shrink(BilinearScaler::new(source, width, height)?)
        } else {
            FitStage::Unchanged(source)
        };
        Ok(Self { stage })
    }

    fn inner(&self) -> &dyn ScanlineSource {
        match &self.stage {
            FitStage::Enlarge(scaler) => scaler,
            FitStage::Shrink(scaler) => scaler,
            FitStage::Unchanged(source) => source,
        }
    }
}

/// The largest scale factor that keeps `width x height` inside the box.
pub fn fit_ratio(width: u32, height: u32, box_width: u32, box_height: u32) -> f64 {
    let width_ratio = box_width as f64 / width as f64;
    let height_ratio = box_height as f64 / height as f64;
    width_ratio.min(height_ratio)
}

impl<S: ScanlineSource> ScanlineSource for Fit<S> {
    fn width(&self) -> u32 {
        self.inner().width()
    }

    fn height(&self) -> u32 {
        self.inner().height()
    }

    fn components(&self) -> u32 {
        self.inner().components()
    }

    fn lineno(&self) -> u32 {
        self.inner().lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        match &mut self.stage {
            FitStage::Enlarge(scaler) => scaler.next_scanline(),
            FitStage::Shrink(scaler) => scaler.next_scanline(),
            FitStage::Unchanged(source) => source.next_scanline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::Solid;

    fn dims<S: ScanlineSource>(source: &S) -> (u32, u32) {
        (source.width(), source.height())
    }

    #[test]
    fn test_width_determines_downscaling() {
        let fit = Fit::new(Solid::black(10, 20).unwrap(), 5, 20).unwrap();
        assert_eq!(dims(&fit), (5, 10));
        assert!(matches!(fit.stage, FitStage::Shrink(_)));
    }

    #[test]
    fn test_height_determines_downscaling() {
        let fit = Fit::new(Solid::black(10, 20).unwrap(), 20, 5).unwrap();
        assert_eq!(dims(&fit), (2, 5));
    }

    #[test]
    fn test_width_determines_upscaling() {
        let fit = Fit::new(Solid::black(10, 20).unwrap(), 100, 900).unwrap();
        assert_eq!(dims(&fit), (100, 200));
        assert!(matches!(fit.stage, FitStage::Enlarge(_)));
    }

    #[test]
    fn test_height_determines_upscaling() {
        let fit = Fit::new(Solid::black(10, 20).unwrap(), 1000, 200).unwrap();
        assert_eq!(dims(&fit), (100, 200));
    }

    #[test]
    fn test_dimensions_unchanged() {
        let mut fit = Fit::new(Solid::black(10, 20).unwrap(), 10, 20).unwrap();
        assert_eq!(dims(&fit), (10, 20));
        assert!(matches!(fit.stage, FitStage::Unchanged(_)));
        let mut rows = 0;
        while fit.next_scanline().unwrap().is_some() {
            rows += 1;
        }
        assert_eq!(rows, 20);
        assert_eq!(fit.lineno(), 20);
    }

    #[test]
    fn test_tiny_box_keeps_one_pixel() {
        let fit = Fit::new(Solid::black(1000, 10).unwrap(), 1, 1).unwrap();
        assert_eq!(dims(&fit), (1, 1));
    }

    #[test]
    fn test_zero_box() {
        assert!(Fit::new(Solid::black(10, 20).unwrap(), 0, 20).is_err());
    }
}

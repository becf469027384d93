use std::io::Write;

use crate::alpha_stripper::AlphaStripper;
use crate::cropper::Cropper;
use crate::error::Result;
use crate::fit::Fit;
use crate::pnm;
use crate::raster_adapter::RasterAdapter;
use crate::scaler::{BilinearScaler, NearestNeighborScaler};
use crate::source::ScanlineSource;

/// A pipeline of stages behind one boxed source.
///
/// Every builder method consumes the image and wraps the current pipeline in
/// another stage, so calls chain:
///
/// ```
/// use rasterflow::{Image, ScanlineSource, Solid};
///
/// let image = Image::new(Solid::black(640, 480)?)
///     .crop(320, 240, 10, 10)?
///     .scale_bilinear(160, 120)?;
/// assert_eq!((image.width(), image.height()), (160, 120));
/// # Ok::<(), rasterflow::RasterError>(())
/// ```
pub struct Image {
    source: Box<dyn ScanlineSource>,
}

impl Image {
    pub fn new<S: ScanlineSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn crop(self, width: u32, height: u32, x_offset: u32, y_offset: u32) -> Result<Self> {
        Ok(Self::new(Cropper::new(
            self.source,
            width,
            height,
            x_offset,
            y_offset,
        )?))
    }

    pub fn scale_nearest(self, width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(NearestNeighborScaler::new(self.source, width, height)?))
    }

    pub fn scale_bilinear(self, width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(BilinearScaler::new(self.source, width, height)?))
    }

    pub fn fit(self, box_width: u32, box_height: u32) -> Result<Self> {
        Ok(Self::new(Fit::new(self.source, box_width, box_height)?))
    }

    pub fn strip_alpha(self) -> Self {
        Self::new(AlphaStripper::new(self.source))
    }

    pub fn into_adapter(self) -> RasterAdapter<Box<dyn ScanlineSource>> {
        RasterAdapter::new(self.source)
    }

    pub fn write_pnm<W: Write + ?Sized>(self, writer: &mut W) -> Result<usize> {
        pnm::write_pnm(self.source, writer)
    }

    pub fn write_raw<W: Write + ?Sized>(self, writer: &mut W) -> Result<usize> {
        pnm::write_raw(self.source, writer)
    }
}

impl ScanlineSource for Image {
    fn width(&self) -> u32 {
        self.source.width()
    }

    fn height(&self) -> u32 {
        self.source.height()
    }

    fn components(&self) -> u32 {
        self.source.components()
    }

    fn lineno(&self) -> u32 {
        self.source.lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        self.source.next_scanline()
    }
}

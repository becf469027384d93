//! Pull-based scanline pipelines for 8-bit interleaved rasters.
//!
//! A pipeline is a chain of [`ScanlineSource`] stages: a producer
//! ([`MemorySource`], [`RawReader`], [`Solid`], [`Noise`]) followed by transforms
//! ([`Cropper`], [`NearestNeighborScaler`], [`BilinearScaler`], [`Fit`],
//! [`AlphaStripper`]). A consumer drains it row by row, usually through
//! [`RasterAdapter`] region reads.

pub mod alpha_stripper;
pub mod constants;
pub mod cropper;
pub mod cursor;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod image;
pub mod interpolation;
pub mod noise;
pub mod pnm;
pub mod raster_adapter;
pub mod raw_reader;
pub mod scaler;
pub mod solid;
pub mod source;

pub use alpha_stripper::AlphaStripper;
pub use cropper::Cropper;
pub use error::{DataIntegrityError, GeometryError, RasterError, Result};
pub use fit::Fit;
pub use geometry::{ColorModel, ColorModelDescriptor, ImageGeometry, PixelLayout, Rect};
pub use image::Image;
pub use interpolation::{resample_bilinear, resample_nearest};
pub use noise::Noise;
pub use raster_adapter::{RasterAdapter, Tile};
pub use raw_reader::RawReader;
pub use scaler::{BilinearScaler, NearestNeighborScaler};
pub use solid::Solid;
pub use source::{MemorySource, ScanlineSource};

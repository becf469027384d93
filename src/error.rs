use thiserror::Error;

/// Problems with the shape of an image, a region or a scale request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
    #[error("Component count must be positive")]
    ZeroComponents,
    #[error("Requested image region has invalid size {width}x{height}")]
    EmptyRegion { width: u32, height: u32 },
    #[error("Requested region width {requested} does not match image width {width}")]
    RegionWidthMismatch { requested: u32, width: u32 },
    #[error("Requested region starts at column {x}, only column 0 is addressable")]
    RegionOffset { x: u32 },
    #[error("Requested region starts at row {requested} but the next row is {lineno}")]
    NonSequentialRegion { requested: u32, lineno: u32 },
    #[error("Requested {requested} rows but only {remaining} remain")]
    RegionPastEnd { requested: u32, remaining: u32 },
    #[error("Can't scale to zero or below")]
    ZeroScale,
    #[error("Image of {width}x{height} with {components} components is too large to address")]
    FrameTooLarge {
        width: u32,
        height: u32,
        components: u32,
    },
    #[error("Crop origin {x},{y} lies outside the {width}x{height} image")]
    CropOutsideImage { x: u32, y: u32, width: u32, height: u32 },
}

/// Pixel data that disagrees with the geometry its source declared.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("Image returned a scanline with a bad size at row {line}: expected {expected} bytes, got {actual}")]
    ScanlineSize {
        line: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Image ran out of rows after {read} of {requested} requested")]
    Truncated { requested: u32, read: u32 },
    #[error("Input ended in the middle of row {line}")]
    ShortRead { line: u32 },
    #[error("Pixel buffer holds {actual} bytes, geometry needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum RasterError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("Unrecognized pixel format with {components} components")]
    UnsupportedFormat { components: u32 },
    /// No more rows. Normal control flow for a caller that keeps reading.
    #[error("End of stream")]
    EndOfStream,
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RasterError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_stream_is_distinct() {
        assert!(RasterError::EndOfStream.is_end_of_stream());
        assert!(!RasterError::from(GeometryError::ZeroScale).is_end_of_stream());
        assert!(!RasterError::UnsupportedFormat { components: 5 }.is_end_of_stream());
    }

    #[test]
    fn test_messages() {
        let err = RasterError::from(DataIntegrityError::ScanlineSize {
            line: 3,
            expected: 12,
            actual: 9,
        });
        assert_eq!(
            err.to_string(),
            "Image returned a scanline with a bad size at row 3: expected 12 bytes, got 9"
        );
        assert_eq!(
            RasterError::UnsupportedFormat { components: 7 }.to_string(),
            "Unrecognized pixel format with 7 components"
        );
    }
}

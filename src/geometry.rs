//! Image geometry, colour tags and the row-size checks shared by every stage.

use crate::constants::MINIMUM_COMPONENT_COUNT;
use crate::error::{DataIntegrityError, GeometryError, RasterError, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Interleaved sample layout of a pixel, keyed by component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum PixelLayout {
    Gray = 1,
    GrayAlpha = 2,
    Rgb = 3,
    Rgba = 4,
}

impl PixelLayout {
    pub fn from_components(components: u32) -> Result<Self> {
        Self::try_from(components).map_err(|_| RasterError::UnsupportedFormat { components })
    }

    pub fn components(self) -> u32 {
        self.into()
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }

    pub fn without_alpha(self) -> Self {
        match self {
            Self::GrayAlpha => Self::Gray,
            Self::Rgba => Self::Rgb,
            other => other,
        }
    }

    pub fn color_model(self) -> ColorModel {
        match self {
            Self::Gray | Self::GrayAlpha => ColorModel::Grayscale,
            Self::Rgb | Self::Rgba => ColorModel::Rgb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Grayscale,
    Rgb,
    Unknown,
}

impl ColorModel {
    /// 1 and 2 components are grayscale, 3 and 4 are RGB, anything else is unknown.
    pub fn from_components(components: u32) -> Self {
        PixelLayout::try_from(components)
            .map(PixelLayout::color_model)
            .unwrap_or(Self::Unknown)
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    pub width: u32,
    pub height: u32,
    pub components: u32,
}

impl ImageGeometry {
    pub fn new(width: u32, height: u32, components: u32) -> Result<Self> {
        let geometry = Self {
            width,
            height,
            components,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks positive dimensions and an addressable frame size. Component
    /// counts above four are allowed here; only colour-tagged operations
    /// refuse them.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::ZeroDimensions {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        if self.components < MINIMUM_COMPONENT_COUNT {
            return Err(GeometryError::ZeroComponents.into());
        }
        self.frame_len()?;
        Ok(())
    }

    pub fn color_model(&self) -> ColorModel {
        ColorModel::from_components(self.components)
    }

    pub fn scanline_len(&self) -> usize {
        scanline_len(self.width, self.components)
    }

    pub fn frame_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.components as usize)
            .and_then(|len| len.checked_mul(self.height as usize))
            .ok_or_else(|| {
                GeometryError::FrameTooLarge {
                    width: self.width,
                    height: self.height,
                    components: self.components,
                }
                .into()
            })
    }
}

/// Geometry plus the colour tag a codec needs before it can accept pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorModelDescriptor {
    pub geometry: ImageGeometry,
    pub layout: PixelLayout,
    pub color_model: ColorModel,
    pub has_alpha: bool,
}

impl ColorModelDescriptor {
    pub fn new(geometry: ImageGeometry) -> Result<Self> {
        let layout = PixelLayout::from_components(geometry.components)?;
        Ok(Self {
            geometry,
            layout,
            color_model: layout.color_model(),
            has_alpha: layout.has_alpha(),
        })
    }
}

/// A rectangle of rows requested from a sequential source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-width band of `height` rows starting at row `y`.
    pub fn rows(y: u32, width: u32, height: u32) -> Self {
        Self::new(0, y, width, height)
    }

    pub fn byte_len(&self, components: u32) -> usize {
        scanline_len(self.width, components) * self.height as usize
    }
}

pub fn scanline_len(width: u32, components: u32) -> usize {
    width as usize * components as usize
}

/// Rejects a pulled row whose length disagrees with the declared geometry.
pub fn check_scanline(line: u32, scanline: &[u8], expected: usize) -> Result<()> {
    if scanline.len() != expected {
        return Err(DataIntegrityError::ScanlineSize {
            line,
            expected,
            actual: scanline.len(),
        }
        .into());
    }
    Ok(())
}

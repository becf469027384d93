use crate::error::Result;
use crate::geometry::PixelLayout;
use crate::source::{pull_scanline, ScanlineSource};

/// Removes the alpha channel from gray+alpha and RGBA sources.
///
/// Sources without alpha, or with an unrecognized component count, pass
/// through untouched.
pub struct AlphaStripper<S: ScanlineSource> {
    source: S,
    layout: Option<PixelLayout>,
}

impl<S: ScanlineSource> AlphaStripper<S> {
    pub fn new(source: S) -> Self {
        let layout = PixelLayout::try_from(source.components())
            .ok()
            .filter(|layout| layout.has_alpha());
        if let Some(layout) = layout {
            log::debug!("stripping alpha: {:?} -> {:?}", layout, layout.without_alpha());
        }
        Self { source, layout }
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ScanlineSource> ScanlineSource for AlphaStripper<S> {
    fn width(&self) -> u32 {
        self.source.width()
    }

    fn height(&self) -> u32 {
        self.source.height()
    }

    fn components(&self) -> u32 {
        match self.layout {
            Some(layout) => layout.without_alpha().components(),
            None => self.source.components(),
        }
    }

    fn lineno(&self) -> u32 {
        self.source.lineno()
    }

    fn next_scanline(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(layout) = self.layout else {
            return self.source.next_scanline();
        };
        let Some(scanline) = pull_scanline(&mut self.source)? else {
            return Ok(None);
        };

        let color = layout.without_alpha().components() as usize;
        let stripped: Vec<u8> = scanline
            .chunks_exact(layout.components() as usize)
            .flat_map(|pixel| &pixel[..color])
            .copied()
            .collect();
        Ok(Some(stripped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ColorModel;
    use crate::solid::Solid;

    #[test]
    fn test_strip_grayscale_alpha() {
        let mut stripped = AlphaStripper::new(Solid::new(20, 30, vec![7, 255]).unwrap());
        assert_eq!(stripped.components(), 1);
        assert_eq!((stripped.width(), stripped.height()), (20, 30));
        assert_eq!(stripped.color_model(), ColorModel::Grayscale);
        assert_eq!(stripped.next_scanline().unwrap(), Some(vec![7; 20]));
    }

    #[test]
    fn test_strip_rgb_alpha() {
        let mut stripped = AlphaStripper::new(Solid::new(2, 3, vec![1, 2, 3, 4]).unwrap());
        assert_eq!(stripped.components(), 3);
        assert_eq!(stripped.next_scanline().unwrap(), Some(vec![1, 2, 3, 1, 2, 3]));
        assert_eq!(stripped.lineno(), 1);
    }

    #[test]
    fn test_leaves_opaque_untouched() {
        for color in [vec![9], vec![1, 2, 3], vec![1, 2, 3, 4, 5]] {
            let components = color.len() as u32;
            let mut stripped = AlphaStripper::new(Solid::new(2, 1, color.clone()).unwrap());
            assert_eq!(stripped.components(), components);
            assert_eq!(stripped.next_scanline().unwrap(), Some(color.repeat(2)));
        }
    }

    #[test]
    fn test_exhausted() {
        let mut stripped = AlphaStripper::new(Solid::new(1, 1, vec![1, 2]).unwrap());
        assert!(stripped.next_scanline().unwrap().is_some());
        assert!(stripped.next_scanline().unwrap().is_none());
    }
}

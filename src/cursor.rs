//! Forward-only row cursor owned by every scanline source.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Initialized,
    Streaming,
    Exhausted,
}

/// Zero-based index of the next row a source will hand out.
///
/// `lineno` only ever grows, by exactly one per row produced. Once it reaches
/// `height` the cursor is exhausted for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    lineno: u32,
    height: u32,
}

impl Cursor {
    pub fn new(height: u32) -> Self {
        Self { lineno: 0, height }
    }

    pub fn lineno(&self) -> u32 {
        self.lineno
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn remaining(&self) -> u32 {
        self.height - self.lineno
    }

    pub fn is_exhausted(&self) -> bool {
        self.lineno >= self.height
    }

    pub fn state(&self) -> CursorState {
        if self.is_exhausted() {
            CursorState::Exhausted
        } else if self.lineno == 0 {
            CursorState::Initialized
        } else {
            CursorState::Streaming
        }
    }

    /// Claims the next row, returning its index, or `None` once exhausted.
    pub fn advance(&mut self) -> Option<u32> {
        if self.is_exhausted() {
            return None;
        }
        let line = self.lineno;
        self.lineno += 1;
        Some(line)
    }
}

/// CSS-like positioning scheme written by the presentation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Absolute,
    Sticky,
}

/// A length in an inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Px(u32),
    Percent(u16),
}

impl Length {
    /// Pixel value, if this is an absolute length.
    pub const fn px(self) -> Option<u32> {
        match self {
            Self::Px(n) => Some(n),
            Self::Percent(_) => None,
        }
    }
}

/// Pointer cursor shown over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    ColResize,
}

use super::{Cursor, Length, Position};

/// Inline style of an element.
///
/// Only the properties the table engine reads or writes are modelled.
/// `None` means "not set inline" and leaves the stylesheet value in charge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub max_width: Option<Length>,
    pub left: Option<i32>,
    pub position: Position,
    pub opacity: Option<f32>,
    pub padding_right: Option<Length>,
    pub cursor: Option<Cursor>,
    pub color: Option<String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    pub fn max_width(mut self, max_width: Length) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

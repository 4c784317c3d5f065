//! Content measurement.
//!
//! The width policy never looks at a renderer directly; it asks a
//! [`ContentMeasurer`] for the sizes it needs. Hosts with a real rendering
//! engine implement the trait over it; [`TextMeasurer`] estimates sizes from
//! text, and [`FixedMeasurer`] replays recorded sizes.

use std::collections::HashMap;

use unicode_width::UnicodeWidthStr;

use crate::element::Element;
use crate::markup::class;
use crate::types::Length;

/// Capability for reading rendered sizes.
pub trait ContentMeasurer {
    /// Width of the cell's inner content wrapper, or `None` if the cell has
    /// no wrapper to measure.
    fn content_width(&self, cell: &Element) -> Option<f32>;

    /// Left plus right padding of the cell.
    fn horizontal_padding(&self, cell: &Element) -> f32 {
        cell.padding.horizontal_total() as f32
    }

    /// Available width of a grid container, if it can be determined.
    fn container_width(&self, grid: &Element) -> Option<u32> {
        grid.style.width.and_then(Length::px)
    }

    /// Rendered height of a block element.
    fn block_height(&self, element: &Element) -> u32;
}

/// The element whose size stands for a cell's content: its first `div`
/// descendant in document order.
pub fn content_wrapper(cell: &Element) -> Option<&Element> {
    for child in &cell.children {
        if child.tag == "div" {
            return Some(child);
        }
        if let Some(found) = content_wrapper(child) {
            return Some(found);
        }
    }
    None
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Estimates sizes from text: every display column of the wrapper's text
/// is `column_px` pixels wide and every row is `row_height` pixels tall.
#[derive(Debug, Clone)]
pub struct TextMeasurer {
    pub column_px: f32,
    pub row_height: u32,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self {
            column_px: 8.0,
            row_height: 40,
        }
    }
}

impl TextMeasurer {
    pub fn new(column_px: f32, row_height: u32) -> Self {
        Self {
            column_px,
            row_height,
        }
    }
}

impl ContentMeasurer for TextMeasurer {
    fn content_width(&self, cell: &Element) -> Option<f32> {
        let wrapper = content_wrapper(cell)?;
        let widest = wrapper
            .text_content()
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0);
        Some(widest as f32 * self.column_px)
    }

    fn block_height(&self, element: &Element) -> u32 {
        if let Some(height) = element.style.height.and_then(Length::px) {
            return height;
        }
        let rows = count_rows(element);
        rows as u32 * self.row_height
    }
}

fn count_rows(element: &Element) -> usize {
    element
        .children
        .iter()
        .map(|child| {
            if child.has_class(class::ROW) || child.has_class(class::HEADER_ROW) {
                1
            } else {
                count_rows(child)
            }
        })
        .sum()
}

/// Replays sizes recorded per element ID.
///
/// Content widths are keyed by the *cell* ID. A cell without a content
/// wrapper still measures as `None`, whatever was recorded for it.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasurer {
    widths: HashMap<String, f32>,
    paddings: HashMap<String, f32>,
    containers: HashMap<String, u32>,
    heights: HashMap<String, u32>,
}

impl FixedMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, cell_id: impl Into<String>, width: f32) -> Self {
        self.widths.insert(cell_id.into(), width);
        self
    }

    pub fn padding(mut self, cell_id: impl Into<String>, padding: f32) -> Self {
        self.paddings.insert(cell_id.into(), padding);
        self
    }

    pub fn container(mut self, grid_id: impl Into<String>, width: u32) -> Self {
        self.containers.insert(grid_id.into(), width);
        self
    }

    pub fn height(mut self, element_id: impl Into<String>, height: u32) -> Self {
        self.heights.insert(element_id.into(), height);
        self
    }
}

impl ContentMeasurer for FixedMeasurer {
    fn content_width(&self, cell: &Element) -> Option<f32> {
        content_wrapper(cell)?;
        Some(self.widths.get(&cell.id).copied().unwrap_or(0.0))
    }

    fn horizontal_padding(&self, cell: &Element) -> f32 {
        self.paddings
            .get(&cell.id)
            .copied()
            .unwrap_or(cell.padding.horizontal_total() as f32)
    }

    fn container_width(&self, grid: &Element) -> Option<u32> {
        self.containers
            .get(&grid.id)
            .copied()
            .or_else(|| grid.style.width.and_then(Length::px))
    }

    fn block_height(&self, element: &Element) -> u32 {
        self.heights
            .get(&element.id)
            .copied()
            .or_else(|| element.style.height.and_then(Length::px))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edges, Style};

    #[test]
    fn test_text_measurer_uses_wrapper_text() {
        let cell = Element::div()
            .padding(Edges::horizontal(6))
            .child(Element::div().content("Spend"))
            .child(Element::span().class("resizer"));
        let m = TextMeasurer::default();
        assert_eq!(m.content_width(&cell), Some(40.0));
        assert_eq!(m.horizontal_padding(&cell), 12.0);
    }

    #[test]
    fn test_missing_wrapper_measures_none() {
        let cell = Element::div().content("bare text");
        assert_eq!(TextMeasurer::default().content_width(&cell), None);
        assert_eq!(FixedMeasurer::new().width(cell.id.clone(), 90.0).content_width(&cell), None);
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        let cell = Element::div().child(Element::div().content("表格"));
        assert_eq!(TextMeasurer::new(10.0, 40).content_width(&cell), Some(40.0));
    }

    #[test]
    fn test_block_height_prefers_inline_height() {
        let body = Element::div()
            .child(Element::div().class("header-row"))
            .child(Element::div().class("table-row"))
            .child(Element::div().class("table-row"));
        assert_eq!(TextMeasurer::default().block_height(&body), 120);

        let fixed = body.style(Style::new().height(Length::Px(500)));
        assert_eq!(TextMeasurer::default().block_height(&fixed), 500);
    }
}

//! The strip drawn over pinned columns once content scrolls beneath them.

use crate::element::NodePath;
use crate::layout::{ColumnFlags, Rect};

/// How far (px) the leading sticky column may sit from the viewport edge
/// and still count as pinned.
const EDGE_TOLERANCE: i32 = 1;

/// The shadow overlay of one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub(crate) content: NodePath,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
}

impl Shadow {
    pub(crate) fn new(content: NodePath) -> Self {
        Self {
            content,
            width: 0,
            height: 0,
            visible: false,
        }
    }

    pub fn opacity(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub(crate) fn resize(&mut self, sticky_width: u32, body_height: u32) {
        self.width = sticky_width;
        self.height = body_height;
    }
}

/// Should the shadow show? `None` when there is no sticky column, in which
/// case the shadow keeps its current state.
///
/// Visible iff the viewport has scrolled and the leading sticky column's
/// left edge sits on the viewport's left edge.
pub fn shadow_visible(rects: &[Rect], flags: &[ColumnFlags], scroll_left: u32) -> Option<bool> {
    let leading = flags.iter().position(|f| f.sticky)?;
    let rect = rects.get(leading)?;
    Some(scroll_left > 0 && rect.left().abs() <= EDGE_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{column_rects, sticky_offsets};

    #[test]
    fn test_no_sticky_column_keeps_state() {
        let flags = vec![ColumnFlags::default(); 2];
        let rects = column_rects(&[100, 100], &[None, None], 40, 10);
        assert_eq!(shadow_visible(&rects, &flags, 40), None);
    }

    #[test]
    fn test_hidden_until_pinned() {
        let flags = vec![ColumnFlags::default(), ColumnFlags::default().sticky()];
        let widths = [80, 120];
        let offsets = sticky_offsets(&widths, &flags);

        let at = |scroll| {
            shadow_visible(&column_rects(&widths, &offsets, scroll, 10), &flags, scroll)
        };
        assert_eq!(at(0), Some(false));
        assert_eq!(at(40), Some(false));
        assert_eq!(at(79), Some(true), "within 1px of the edge");
        assert_eq!(at(200), Some(true));
    }
}

//! Interactive column resizing.

use crate::grid::{GridId, GridState};
use crate::layout;
use crate::schedule::FrameThrottle;

/// A drag in progress. At most one exists at a time, like the document
/// level move/up listeners it stands for.
#[derive(Debug, Clone)]
pub(crate) struct ActiveResize {
    pub grid: GridId,
    pub column: usize,
    start_x: i32,
    original_width: u32,
    min_width: u32,
    /// Every column's width when the drag began.
    pub snapshot: Vec<u32>,
    pub moves: FrameThrottle<i32>,
}

impl ActiveResize {
    pub(crate) fn begin(state: &GridState, column: usize, x: i32, min_width_resize: u32) -> Self {
        let intrinsic = state.intrinsic_widths.get(column).copied().unwrap_or(0);
        Self {
            grid: state.id,
            column,
            start_x: x,
            original_width: state.column_widths.get(column).copied().unwrap_or(0),
            min_width: min_width_resize.max(intrinsic),
            snapshot: state.column_widths.clone(),
            moves: FrameThrottle::new(),
        }
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Width for a pointer at `x`: the original width moved by the pointer's
    /// travel, never under the minimum, then held under the sticky cap.
    /// The cap is taken from the grid's width at the time of the call.
    pub(crate) fn width_at(&self, state: &GridState, x: i32, cap_ratio: f64) -> u32 {
        let travelled = i64::from(x) - i64::from(self.start_x);
        let proposed = (i64::from(self.original_width) + travelled)
            .max(i64::from(self.min_width))
            .min(i64::from(u32::MAX)) as u32;

        layout::clamp_sticky_width(
            &state.column_widths,
            &state.flags,
            self.column,
            proposed,
            self.min_width,
            state.sticky_cap(cap_ratio),
        )
    }
}

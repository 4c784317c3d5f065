use super::Rect;

/// Per-column behavior flags, read from the header's classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnFlags {
    /// Width is the intrinsic content width; never stretched.
    pub fit: bool,
    /// Pinned to the viewport's left edge during horizontal scroll.
    pub sticky: bool,
    /// The user may drag the header's handle to resize.
    pub resizable: bool,
}

impl ColumnFlags {
    pub fn fit(mut self) -> Self {
        self.fit = true;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }
}

/// Sum of the widths of sticky columns.
pub fn sticky_total(widths: &[u32], flags: &[ColumnFlags]) -> u32 {
    widths
        .iter()
        .zip(flags)
        .filter(|(_, f)| f.sticky)
        .map(|(w, _)| *w)
        .sum()
}

/// Largest combined width the sticky columns may take.
pub fn sticky_cap(grid_width: u32, ratio: f64) -> f64 {
    grid_width as f64 * ratio
}

/// Hand out the slack between the columns' total and `grid_width`.
///
/// Non-`fit` columns share the slack proportionally to their width; when
/// every column is `fit`, all of them do. Each share is floored, so up to
/// `candidates - 1` pixels stay undistributed. Returns false when there was
/// no slack.
pub fn stretch_columns(widths: &mut [u32], flags: &[ColumnFlags], grid_width: u32) -> bool {
    let total: u32 = widths.iter().sum();
    if total >= grid_width {
        return false;
    }
    let extra = u64::from(grid_width - total);

    let mut candidates: Vec<usize> = (0..widths.len())
        .filter(|&i| !flags.get(i).is_some_and(|f| f.fit))
        .collect();
    if candidates.is_empty() {
        candidates = (0..widths.len()).collect();
    }
    if candidates.is_empty() {
        return false;
    }

    let stretchable: u64 = candidates.iter().map(|&i| u64::from(widths[i])).sum();
    let count = candidates.len() as u64;

    for &i in &candidates {
        let add = if stretchable > 0 {
            extra * u64::from(widths[i]) / stretchable
        } else {
            extra / count
        };
        widths[i] += add as u32;
    }

    log::debug!(
        "[layout] stretched {} columns by {}px towards {}px",
        candidates.len(),
        extra,
        grid_width
    );
    true
}

/// Shrink every sticky column by the same ratio so their sum fits under
/// `cap`. Returns true if anything was shrunk.
pub fn fit_sticky_columns(widths: &mut [u32], flags: &[ColumnFlags], cap: f64) -> bool {
    let total = sticky_total(widths, flags);
    if f64::from(total) <= cap || total == 0 {
        return false;
    }

    for (width, flag) in widths.iter_mut().zip(flags) {
        if flag.sticky {
            *width = (f64::from(*width) * cap / f64::from(total)).floor() as u32;
        }
    }
    true
}

/// Clamp a proposed width for `column` so the sticky columns, with this
/// column at `proposed`, stay under `cap`. Non-sticky columns pass through.
///
/// When the other sticky columns alone already exceed `cap`, no width for
/// this column can meet it; the column then keeps its current width (or
/// `min_width` if larger) and may not grow.
pub fn clamp_sticky_width(
    widths: &[u32],
    flags: &[ColumnFlags],
    column: usize,
    proposed: u32,
    min_width: u32,
    cap: f64,
) -> u32 {
    if !flags.get(column).is_some_and(|f| f.sticky) {
        return proposed;
    }

    let others: u32 = widths
        .iter()
        .zip(flags)
        .enumerate()
        .filter(|(i, (_, f))| f.sticky && *i != column)
        .map(|(_, (w, _))| *w)
        .sum();

    if f64::from(others + proposed) <= cap {
        return proposed;
    }
    if f64::from(others) >= cap {
        let current = widths.get(column).copied().unwrap_or(0);
        return proposed.min(current.max(min_width));
    }
    let allowed = (cap - f64::from(others)).floor() as u32;
    proposed.min(allowed)
}

/// Left offsets for sticky columns: each is the sum of the widths of the
/// sticky columns before it. Non-sticky columns get `None`.
pub fn sticky_offsets(widths: &[u32], flags: &[ColumnFlags]) -> Vec<Option<u32>> {
    let mut offset = 0;
    widths
        .iter()
        .zip(flags)
        .map(|(w, f)| {
            if f.sticky {
                let left = offset;
                offset += w;
                Some(left)
            } else {
                None
            }
        })
        .collect()
}

/// Where each column renders relative to the scroll viewport's left edge.
///
/// Columns flow left to right; a column with a sticky offset never renders
/// further left than that offset.
pub fn column_rects(
    widths: &[u32],
    offsets: &[Option<u32>],
    scroll_left: u32,
    height: u32,
) -> Vec<Rect> {
    let mut natural = 0i64;
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let mut x = natural - i64::from(scroll_left);
            if let Some(Some(offset)) = offsets.get(i) {
                x = x.max(i64::from(*offset));
            }
            natural += i64::from(width);
            Rect::new(x as i32, 0, width, height)
        })
        .collect()
}

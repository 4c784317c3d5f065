//! Engine configuration and host callbacks.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::grid::ColumnId;

/// How initial intrinsic widths are derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthStrategy {
    /// Widest cell content plus padding.
    #[default]
    Content,
    /// Content width capped by what the column holds (numbers, short or
    /// long text).
    Optimal,
}

/// Engine configuration.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Which grids to manage.
    pub selector: String,
    /// Floor for any column width during interactive resize.
    pub min_width_resize: u32,
    /// Ceiling for measured intrinsic widths.
    pub max_width: u32,
    pub width_strategy: WidthStrategy,
    /// Quiescence window for window resize/load recomputation.
    pub resize_debounce_ms: u64,
    /// Narrowest viewport that gets drag resizing, sticky columns and the
    /// shadow overlay.
    pub desktop_min_width: u32,
    /// Share of the grid width the sticky columns may occupy together.
    pub sticky_cap_ratio: f64,
    /// Grids with fewer columns than this are flexible.
    pub flexible_column_limit: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            selector: "[data-table]".to_string(),
            min_width_resize: 50,
            max_width: 300,
            width_strategy: WidthStrategy::Content,
            resize_debounce_ms: 100,
            desktop_min_width: 992,
            sticky_cap_ratio: 0.7,
            flexible_column_limit: 7,
        }
    }
}

impl TableOptions {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Default::default()
        }
    }

    pub fn min_width_resize(mut self, min: u32) -> Self {
        self.min_width_resize = min;
        self
    }

    pub fn max_width(mut self, max: u32) -> Self {
        self.max_width = max;
        self
    }

    pub fn width_strategy(mut self, strategy: WidthStrategy) -> Self {
        self.width_strategy = strategy;
        self
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

type ResizeFn = Box<dyn FnMut(u32, &ColumnId)>;
type ScrollFn = Box<dyn FnMut(u32)>;
type StickyFn = Box<dyn FnMut()>;

/// Host callbacks. All are optional.
#[derive(Default)]
pub struct TableCallbacks {
    pub(crate) on_resize: Option<ResizeFn>,
    pub(crate) on_scroll: Option<ScrollFn>,
    pub(crate) on_sticky_adjust: Option<StickyFn>,
}

impl TableCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every applied drag frame with the new width and the
    /// column's identifier.
    pub fn on_resize(mut self, f: impl FnMut(u32, &ColumnId) + 'static) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }

    /// Called when a grid's row viewport scrolls horizontally.
    pub fn on_scroll(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_scroll = Some(Box::new(f));
        self
    }

    /// Called after a grid's sticky offsets are recomputed.
    pub fn on_sticky_adjust(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_sticky_adjust = Some(Box::new(f));
        self
    }

    pub(crate) fn resized(&mut self, width: u32, column: &ColumnId) {
        if let Some(f) = self.on_resize.as_mut() {
            f(width, column);
        }
    }

    pub(crate) fn scrolled(&mut self, scroll_left: u32) {
        if let Some(f) = self.on_scroll.as_mut() {
            f(scroll_left);
        }
    }

    pub(crate) fn sticky_adjusted(&mut self) {
        if let Some(f) = self.on_sticky_adjust.as_mut() {
            f();
        }
    }
}

impl fmt::Debug for TableCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("on_resize", &self.on_resize.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_sticky_adjust", &self.on_sticky_adjust.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_take_defaults() {
        let options: TableOptions =
            serde_json::from_str(r#"{ "selector": ".table-type-one", "min_width_resize": 70 }"#)
                .unwrap();
        assert_eq!(options.selector, ".table-type-one");
        assert_eq!(options.min_width_resize, 70);
        assert_eq!(options.max_width, 300);
        assert_eq!(options.width_strategy, WidthStrategy::Content);
        assert_eq!(options.resize_debounce(), Duration::from_millis(100));
    }

    #[test]
    fn test_width_strategy_names() {
        let options: TableOptions =
            serde_json::from_str(r#"{ "width_strategy": "optimal" }"#).unwrap();
        assert_eq!(options.width_strategy, WidthStrategy::Optimal);
    }
}

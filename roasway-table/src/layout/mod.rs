mod columns;
mod rect;

pub use columns::{
    clamp_sticky_width, column_rects, fit_sticky_columns, sticky_cap, sticky_offsets,
    sticky_total, stretch_columns, ColumnFlags,
};
pub use rect::Rect;

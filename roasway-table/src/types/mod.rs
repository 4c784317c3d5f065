mod edges;
mod enums;
mod style;

pub use edges::Edges;
pub use enums::{Cursor, Length, Position};
pub use style::Style;

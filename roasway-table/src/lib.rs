pub mod classify;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod markup;
pub mod measure;
pub mod options;
pub mod present;
pub mod schedule;
pub mod shadow;
pub mod toggle;
pub mod types;

mod resize;

pub use classify::ColumnKind;
pub use element::{find_element, query_all, Element, NodePath, Selector, SelectorError};
pub use engine::{GridRegistry, InitReport, TableEngine};
pub use error::{ConfigError, StructuralError};
pub use event::{Event, Viewport};
pub use grid::{ColumnId, GridId, GridState};
pub use layout::{ColumnFlags, Rect};
pub use markup::GridMarkup;
pub use measure::{ContentMeasurer, FixedMeasurer, TextMeasurer};
pub use options::{TableCallbacks, TableOptions, WidthStrategy};
pub use schedule::{Debouncer, FrameThrottle};
pub use shadow::{shadow_visible, Shadow};
pub use toggle::RowToggles;
pub use types::*;

//! Page fixtures: a viewport, engine options, grid markup and a script of
//! host events, all read from one JSON file.

use roasway_table::{ColumnFlags, Element, Event, GridMarkup, TableOptions, Viewport};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PageFixture {
    pub viewport: ViewportFixture,
    #[serde(default)]
    pub options: TableOptions,
    pub grids: Vec<GridFixture>,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportFixture {
    pub width: u32,
    pub height: u32,
}

impl From<ViewportFixture> for Viewport {
    fn from(v: ViewportFixture) -> Self {
        Viewport::new(v.width, v.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridFixture {
    pub id: String,
    pub width: Option<u32>,
    #[serde(default)]
    pub cell_padding: u32,
    pub columns: Vec<ColumnFixture>,
    #[serde(default)]
    pub rows: Vec<RowFixture>,
    #[serde(default = "default_true")]
    pub wrapper: bool,
    #[serde(default)]
    pub global_toggle: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnFixture {
    pub label: String,
    pub id: Option<String>,
    #[serde(default)]
    pub fit: bool,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub resizable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowFixture {
    pub cells: Vec<String>,
    #[serde(default)]
    pub extra: Vec<String>,
}

/// One step of the event script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    PointerDown { target: String, x: i32 },
    PointerMove { x: i32 },
    PointerUp,
    /// Let the host render a frame.
    Frame,
    Scroll { target: String, scroll_left: u32 },
    Click { target: String },
    WindowResize { width: u32, height: u32 },
    Load,
    /// Advance the clock and run whatever fell due.
    Wait { ms: u64 },
}

impl ScriptedEvent {
    /// The engine event this step delivers, if it is one.
    pub fn to_event(&self) -> Option<Event> {
        let event = match self {
            Self::PointerDown { target, x } => Event::PointerDown {
                target: target.clone(),
                x: *x,
            },
            Self::PointerMove { x } => Event::PointerMove { x: *x },
            Self::PointerUp => Event::PointerUp,
            Self::Scroll {
                target,
                scroll_left,
            } => Event::Scroll {
                target: target.clone(),
                scroll_left: *scroll_left,
            },
            Self::Click { target } => Event::Click {
                target: target.clone(),
            },
            Self::WindowResize { width, height } => Event::WindowResize {
                width: *width,
                height: *height,
            },
            Self::Load => Event::Load,
            Self::Frame | Self::Wait { .. } => return None,
        };
        Some(event)
    }
}

fn default_true() -> bool {
    true
}

impl GridFixture {
    pub fn to_element(&self) -> Element {
        let mut markup = GridMarkup::new(&self.id).cell_padding(self.cell_padding);
        if let Some(width) = self.width {
            markup = markup.width(width);
        }
        for column in &self.columns {
            let flags = ColumnFlags {
                fit: column.fit,
                sticky: column.sticky,
                resizable: column.resizable,
            };
            markup = match &column.id {
                Some(id) => markup.named_column(&column.label, id, flags),
                None => markup.column(&column.label, flags),
            };
        }
        for row in &self.rows {
            markup = if row.extra.is_empty() {
                markup.row(row.cells.iter().cloned())
            } else {
                markup.expandable_row(row.cells.iter().cloned(), row.extra.iter().cloned())
            };
        }
        if !self.wrapper {
            markup = markup.without_wrapper();
        }
        if self.global_toggle {
            markup = markup.global_toggle();
        }
        markup.build()
    }
}

impl PageFixture {
    /// The document: every grid under one page root.
    pub fn to_document(&self) -> Element {
        Element::div()
            .id("page")
            .children(self.grids.iter().map(GridFixture::to_element))
    }
}

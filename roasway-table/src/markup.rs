//! Grid markup: the class names the engine recognizes, and a builder that
//! produces a conforming grid so hosts don't hand-assemble it.

use crate::element::Element;
use crate::layout::ColumnFlags;
use crate::types::{Edges, Length, Style};

pub mod class {
    pub const HEADER_ROW: &str = "header-row";
    pub const ROW: &str = "table-row";
    pub const CELL: &str = "table-line";
    pub const RESIZER: &str = "resizer";
    pub const FIT: &str = "fit";
    pub const STICKY: &str = "sticky";
    pub const RESIZABLE: &str = "resizable";
    pub const BODY: &str = "table-type-one__body";
    pub const WRAPPER: &str = "table-type-one__wrapper";
    pub const SCROLL_VIEWPORT: &str = "table-overflow-thumb";
    pub const EXPANDABLE_ROW: &str = "table-row-more-content";
    pub const ROW_TOGGLE: &str = "toggle-hide-content";
    pub const EXTRA_CONTENT: &str = "hide-content-table-line";
    pub const GLOBAL_TOGGLE: &str = "toggle-hide-content-global";
    pub const HIDDEN: &str = "hidden";
    pub const ROTATED: &str = "rotate-180";
    pub const ROW_OPEN: [&str; 2] = ["content-self-start", "focused"];
    pub const SHADOW: &str = "shadow-block";
    pub const SHADOW_CONTENT: &str = "block";
    pub const ERROR_NOTICE: &str = "table-error";
}

/// Attribute carrying an explicit column identifier on a header cell.
pub const COLUMN_ID_ATTR: &str = "data-column-id";

#[derive(Debug, Clone)]
struct HeaderSpec {
    label: String,
    flags: ColumnFlags,
    column_id: Option<String>,
}

#[derive(Debug, Clone)]
struct RowSpec {
    cells: Vec<String>,
    extra: Vec<String>,
}

/// Builds the element tree of one grid.
///
/// IDs are derived from the grid ID: header cells are `{id}-h{col}`, row
/// cells `{id}-r{row}-c{col}`, resize handles `{id}-h{col}-resizer`, the
/// scroll viewport `{id}-scroll`, row toggles `{id}-r{row}-toggle` and the
/// global toggle `{id}-toggle-all`.
#[derive(Debug, Clone)]
pub struct GridMarkup {
    id: String,
    width: Option<u32>,
    cell_padding: u32,
    headers: Vec<HeaderSpec>,
    rows: Vec<RowSpec>,
    wrapper: bool,
    global_toggle: bool,
}

impl GridMarkup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: None,
            cell_padding: 0,
            headers: Vec::new(),
            rows: Vec::new(),
            wrapper: true,
            global_toggle: false,
        }
    }

    /// Container width in pixels, written as the grid's inline width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Horizontal padding on each side of every cell.
    pub fn cell_padding(mut self, padding: u32) -> Self {
        self.cell_padding = padding;
        self
    }

    pub fn column(mut self, label: impl Into<String>, flags: ColumnFlags) -> Self {
        self.headers.push(HeaderSpec {
            label: label.into(),
            flags,
            column_id: None,
        });
        self
    }

    /// Like [`column`](Self::column), with an explicit column identifier.
    pub fn named_column(
        mut self,
        label: impl Into<String>,
        column_id: impl Into<String>,
        flags: ColumnFlags,
    ) -> Self {
        self.headers.push(HeaderSpec {
            label: label.into(),
            flags,
            column_id: Some(column_id.into()),
        });
        self
    }

    pub fn row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(RowSpec {
            cells: cells.into_iter().map(Into::into).collect(),
            extra: Vec::new(),
        });
        self
    }

    /// A row with collapsible extra content and its own toggle button.
    pub fn expandable_row<S: Into<String>, E: Into<String>>(
        mut self,
        cells: impl IntoIterator<Item = S>,
        extra: impl IntoIterator<Item = E>,
    ) -> Self {
        self.rows.push(RowSpec {
            cells: cells.into_iter().map(Into::into).collect(),
            extra: extra.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Omit the wrapper that hosts the shadow overlay.
    pub fn without_wrapper(mut self) -> Self {
        self.wrapper = false;
        self
    }

    pub fn global_toggle(mut self) -> Self {
        self.global_toggle = true;
        self
    }

    pub fn build(self) -> Element {
        let id = &self.id;
        let padding = Edges::horizontal(self.cell_padding);

        let mut header_row = Element::div().id(format!("{id}-header")).class(class::HEADER_ROW);
        for (col, header) in self.headers.iter().enumerate() {
            let mut cell = Element::div()
                .id(format!("{id}-h{col}"))
                .class(class::CELL)
                .padding(padding)
                .child(Element::div().content(header.label.clone()));
            if header.flags.fit {
                cell.add_class(class::FIT);
            }
            if header.flags.sticky {
                cell.add_class(class::STICKY);
            }
            if header.flags.resizable {
                cell.add_class(class::RESIZABLE);
                cell = cell.child(
                    Element::span()
                        .id(format!("{id}-h{col}-resizer"))
                        .class(class::RESIZER),
                );
            }
            if let Some(column_id) = &header.column_id {
                cell.set_attr(COLUMN_ID_ATTR, column_id);
            }
            header_row = header_row.child(cell);
        }
        if self.global_toggle {
            header_row = header_row.child(
                Element::button()
                    .id(format!("{id}-toggle-all"))
                    .class(class::GLOBAL_TOGGLE),
            );
        }

        let mut body = Element::div()
            .id(format!("{id}-body"))
            .class(class::BODY)
            .child(header_row);
        for (r, spec) in self.rows.iter().enumerate() {
            let mut row = Element::div().id(format!("{id}-r{r}")).class(class::ROW);
            for (col, text) in spec.cells.iter().enumerate() {
                row = row.child(
                    Element::div()
                        .id(format!("{id}-r{r}-c{col}"))
                        .class(class::CELL)
                        .padding(padding)
                        .child(Element::div().content(text.clone())),
                );
            }
            if !spec.extra.is_empty() {
                row.add_class(class::EXPANDABLE_ROW);
                for (k, text) in spec.extra.iter().enumerate() {
                    row = row.child(
                        Element::div()
                            .id(format!("{id}-r{r}-x{k}"))
                            .class(class::EXTRA_CONTENT)
                            .content(text.clone()),
                    );
                }
                row = row.child(
                    Element::button()
                        .id(format!("{id}-r{r}-toggle"))
                        .class(class::ROW_TOGGLE),
                );
            }
            body = body.child(row);
        }

        let scroll = Element::div()
            .id(format!("{id}-scroll"))
            .class(class::SCROLL_VIEWPORT)
            .child(body);

        let inner = if self.wrapper {
            Element::div()
                .id(format!("{id}-wrapper"))
                .class(class::WRAPPER)
                .child(scroll)
        } else {
            scroll
        };

        let mut grid = Element::div()
            .id(self.id.clone())
            .class("table-type-one")
            .attr("data-table", "")
            .child(inner);
        if let Some(width) = self.width {
            grid.style = Style::new().width(Length::Px(width));
        }
        grid
    }
}

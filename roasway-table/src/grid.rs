//! Per-grid state record.

use std::fmt;

use crate::classify::ColumnKind;
use crate::element::{first_with_class, node_at, with_class, Element, NodePath};
use crate::error::StructuralError;
use crate::layout::{self, ColumnFlags, Rect};
use crate::markup::{class, COLUMN_ID_ATTR};
use crate::measure::ContentMeasurer;
use crate::options::{TableOptions, WidthStrategy};
use crate::shadow::Shadow;
use crate::toggle::RowToggles;

/// Grids with more columns than this get extra right padding on the body.
const WIDE_COLUMN_COUNT: usize = 14;
/// Grids with more rows (header included) than this get a fixed body height.
const TALL_ROW_COUNT: usize = 15;
pub(crate) const TALL_BODY_HEIGHT: u32 = 500;
/// Added to measured widths of non-`fit` columns.
const NON_FIT_ALLOWANCE: u32 = 2;

/// Position of a managed grid in the engine's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(pub(crate) usize);

impl GridId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

/// Identifier reported to the resize callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// From the header's `data-column-id` attribute.
    Named(String),
    /// Position of the column.
    Index(usize),
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// An element known both by path (for writing) and by ID (for event
/// targeting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeRef {
    pub path: NodePath,
    pub id: String,
}

impl NodeRef {
    pub(crate) fn at(root: &Element, path: NodePath) -> Option<Self> {
        let id = node_at(root, &path)?.id.clone();
        Some(Self { path, id })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Column {
    pub id: ColumnId,
    pub header: NodePath,
    /// Drag handle, present only on resizable non-`fit` headers that have one.
    pub resizer: Option<NodeRef>,
}

#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub path: NodePath,
    pub cells: Vec<NodePath>,
}

/// State of one managed grid.
#[derive(Debug, Clone)]
pub struct GridState {
    pub(crate) id: GridId,
    pub(crate) element_id: String,
    pub(crate) path: NodePath,
    pub(crate) columns: Vec<Column>,
    pub(crate) flags: Vec<ColumnFlags>,
    pub(crate) rows: Vec<Row>,
    pub(crate) body: Option<NodePath>,
    pub(crate) wrapper: Option<NodePath>,
    pub(crate) scroll_viewport: Option<NodeRef>,

    pub(crate) intrinsic_widths: Vec<u32>,
    pub(crate) column_widths: Vec<u32>,
    pub(crate) is_flexible: bool,
    pub(crate) grid_width: u32,
    pub(crate) scroll_left: u32,
    pub(crate) sticky_offsets: Vec<Option<u32>>,
    /// Sticky fit and shadow creation have run.
    pub(crate) desktop_ready: bool,

    pub(crate) shadow: Option<Shadow>,
    pub(crate) toggles: RowToggles,
}

impl GridState {
    /// Discover the grid's parts and compute its initial widths.
    ///
    /// `grid` is the element at `path` in `root`. Nothing in the document
    /// is touched; presentation happens later.
    pub(crate) fn build(
        id: GridId,
        root: &Element,
        grid: &Element,
        path: NodePath,
        measurer: &dyn ContentMeasurer,
        options: &TableOptions,
        viewport_width: u32,
    ) -> Result<Self, StructuralError> {
        let element_id = grid.id.clone();

        let headers: Vec<NodePath> = with_class(root, &path, class::HEADER_ROW)
            .iter()
            .flat_map(|header_row| with_class(root, header_row, class::CELL))
            .collect();
        if headers.is_empty() {
            return Err(StructuralError::MissingHeaders { grid: element_id });
        }

        let rows: Vec<Row> = with_class(root, &path, class::ROW)
            .into_iter()
            .map(|row| Row {
                cells: with_class(root, &row, class::CELL),
                path: row,
            })
            .collect();
        if rows.is_empty() {
            return Err(StructuralError::MissingRows { grid: element_id });
        }

        let mut columns = Vec::with_capacity(headers.len());
        let mut flags = Vec::with_capacity(headers.len());
        for (index, header_path) in headers.into_iter().enumerate() {
            let Some(header) = node_at(root, &header_path) else {
                continue;
            };
            let flag = ColumnFlags {
                fit: header.has_class(class::FIT),
                sticky: header.has_class(class::STICKY),
                resizable: header.has_class(class::RESIZABLE),
            };
            let resizer = if flag.resizable && !flag.fit {
                first_with_class(root, &header_path, class::RESIZER)
                    .and_then(|p| NodeRef::at(root, p))
            } else {
                None
            };
            let id = header
                .get_attr(COLUMN_ID_ATTR)
                .map(|name| ColumnId::Named(name.to_string()))
                .unwrap_or(ColumnId::Index(index));
            columns.push(Column {
                id,
                header: header_path,
                resizer,
            });
            flags.push(flag);
        }

        let grid_width = measurer.container_width(grid).unwrap_or(viewport_width);
        let toggles = RowToggles::discover(root, &path, &rows);

        let mut state = Self {
            id,
            element_id,
            body: first_with_class(root, &path, class::BODY),
            wrapper: first_with_class(root, &path, class::WRAPPER),
            scroll_viewport: first_with_class(root, &path, class::SCROLL_VIEWPORT)
                .and_then(|p| NodeRef::at(root, p)),
            path,
            is_flexible: columns.len() < options.flexible_column_limit,
            columns,
            flags,
            rows,
            intrinsic_widths: Vec::new(),
            column_widths: Vec::new(),
            grid_width,
            scroll_left: 0,
            sticky_offsets: Vec::new(),
            desktop_ready: false,
            shadow: None,
            toggles,
        };

        state.measure(root, measurer, options);
        log::info!(
            "[table] {} ({}): {} columns, {} rows, widths {:?}",
            state.element_id,
            state.id,
            state.columns.len(),
            state.rows.len(),
            state.column_widths
        );
        Ok(state)
    }

    /// Intrinsic widths from content, then stretch into any slack.
    fn measure(&mut self, root: &Element, measurer: &dyn ContentMeasurer, options: &TableOptions) {
        self.intrinsic_widths = (0..self.columns.len())
            .map(|index| self.measure_column(root, measurer, options, index))
            .collect();

        let fit_total: u32 = self
            .intrinsic_widths
            .iter()
            .zip(&self.flags)
            .filter(|(_, f)| f.fit)
            .map(|(w, _)| *w)
            .sum();
        log::debug!(
            "[table] {}: intrinsic {:?} (fit total {}px) in {}px",
            self.element_id,
            self.intrinsic_widths,
            fit_total,
            self.grid_width
        );

        self.column_widths = self.intrinsic_widths.clone();
        layout::stretch_columns(&mut self.column_widths, &self.flags, self.grid_width);
    }

    fn measure_column(
        &self,
        root: &Element,
        measurer: &dyn ContentMeasurer,
        options: &TableOptions,
        index: usize,
    ) -> u32 {
        let cells: Vec<&Element> = std::iter::once(&self.columns[index].header)
            .chain(self.rows.iter().filter_map(|row| row.cells.get(index)))
            .filter_map(|path| node_at(root, path))
            .collect();

        let widest = cells
            .iter()
            .map(|cell| cell_width(measurer, cell))
            .fold(0.0f32, f32::max);
        let mut width = widest.ceil() as u32;

        let flags = self.flags[index];
        if !flags.fit {
            width += NON_FIT_ALLOWANCE;
        }
        width = width.min(options.max_width);

        if options.width_strategy == WidthStrategy::Optimal && !flags.fit {
            width = ColumnKind::of(cells.iter().copied())
                .cap(width)
                .min(options.max_width);
        }
        width
    }

    /// Shrink sticky columns under the cap, then place them.
    pub(crate) fn setup_sticky(&mut self, cap_ratio: f64) {
        let cap = self.sticky_cap(cap_ratio);
        if layout::fit_sticky_columns(&mut self.column_widths, &self.flags, cap) {
            log::debug!(
                "[table] {}: sticky columns scaled under {:.0}px",
                self.element_id,
                cap
            );
        }
        self.recompute_sticky_offsets();
    }

    /// Read the container width again; the viewport stands in when the grid
    /// has none of its own.
    pub(crate) fn refresh_grid_width(
        &mut self,
        root: &Element,
        measurer: &dyn ContentMeasurer,
        viewport_width: u32,
    ) {
        let width = node_at(root, &self.path)
            .and_then(|grid| measurer.container_width(grid))
            .unwrap_or(viewport_width);
        if width != self.grid_width {
            log::debug!(
                "[table] {}: grid width {}px -> {}px",
                self.element_id,
                self.grid_width,
                width
            );
            self.grid_width = width;
        }
    }

    pub(crate) fn recompute_sticky_offsets(&mut self) {
        self.sticky_offsets = layout::sticky_offsets(&self.column_widths, &self.flags);
    }

    pub(crate) fn sticky_cap(&self, ratio: f64) -> f64 {
        layout::sticky_cap(self.grid_width, ratio)
    }

    /// Set one column's width, and in flexible grids put every other `fit`
    /// column back to its width from `snapshot`.
    pub(crate) fn apply_resize(&mut self, column: usize, width: u32, snapshot: &[u32]) {
        if let Some(w) = self.column_widths.get_mut(column) {
            *w = width;
        }
        if !self.is_flexible {
            return;
        }
        for (index, (w, flag)) in self.column_widths.iter_mut().zip(&self.flags).enumerate() {
            if index != column && flag.fit {
                if let Some(&original) = snapshot.get(index) {
                    *w = original;
                }
            }
        }
    }

    pub(crate) fn column_for_resizer(&self, target: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.resizer.as_ref().is_some_and(|r| r.id == target))
    }

    pub(crate) fn owns_scroll_viewport(&self, target: &str) -> bool {
        self.scroll_viewport.as_ref().is_some_and(|v| v.id == target)
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    /// ID of the grid's root element.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Where the grid's root element sits in the document.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn intrinsic_widths(&self) -> &[u32] {
        &self.intrinsic_widths
    }

    pub fn column_flags(&self) -> &[ColumnFlags] {
        &self.flags
    }

    pub fn column_id(&self, index: usize) -> Option<&ColumnId> {
        self.columns.get(index).map(|c| &c.id)
    }

    pub fn is_flexible(&self) -> bool {
        self.is_flexible
    }

    /// More than 14 columns: the body gets right padding.
    pub fn is_wide(&self) -> bool {
        self.columns.len() > WIDE_COLUMN_COUNT
    }

    /// More than 15 rows counting the header: the body gets a fixed height.
    pub fn is_tall(&self) -> bool {
        self.rows.len() + 1 > TALL_ROW_COUNT
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn scroll_left(&self) -> u32 {
        self.scroll_left
    }

    /// Left offsets of sticky columns; empty until sticky setup has run.
    pub fn sticky_offsets(&self) -> &[Option<u32>] {
        &self.sticky_offsets
    }

    pub fn sticky_width(&self) -> u32 {
        layout::sticky_total(&self.column_widths, &self.flags)
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    pub fn toggles(&self) -> &RowToggles {
        &self.toggles
    }

    /// Where each column currently renders in the scroll viewport.
    pub fn column_rects(&self, height: u32) -> Vec<Rect> {
        layout::column_rects(
            &self.column_widths,
            &self.sticky_offsets,
            self.scroll_left,
            height,
        )
    }
}

/// Content plus padding; a cell without a content wrapper contributes 0.
fn cell_width(measurer: &dyn ContentMeasurer, cell: &Element) -> f32 {
    match measurer.content_width(cell) {
        Some(content) => content.ceil() + measurer.horizontal_padding(cell),
        None => {
            log::debug!("[table] cell {} has no content wrapper, measuring as 0", cell.id);
            0.0
        }
    }
}

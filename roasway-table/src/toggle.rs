//! Row-level show/hide of extra content.
//!
//! Pure visibility state: toggling never triggers width recalculation.

use crate::element::{first_with_class, node_at, node_at_mut, with_class, Element, NodePath};
use crate::grid::{NodeRef, Row};
use crate::markup::class;

#[derive(Debug, Clone)]
pub(crate) struct RowToggle {
    row: usize,
    path: NodePath,
    button: Option<NodeRef>,
    extra: Vec<NodePath>,
    expanded: bool,
}

/// Expand/collapse state of a grid's rows.
#[derive(Debug, Clone, Default)]
pub struct RowToggles {
    rows: Vec<RowToggle>,
    global: Option<NodeRef>,
    global_rotated: bool,
}

impl RowToggles {
    pub(crate) fn discover(root: &Element, grid: &[usize], rows: &[Row]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                node_at(root, &row.path).is_some_and(|e| e.has_class(class::EXPANDABLE_ROW))
            })
            .map(|(index, row)| RowToggle {
                row: index,
                path: row.path.clone(),
                button: first_with_class(root, &row.path, class::ROW_TOGGLE)
                    .and_then(|p| NodeRef::at(root, p)),
                extra: with_class(root, &row.path, class::EXTRA_CONTENT),
                expanded: false,
            })
            .collect();

        Self {
            rows,
            global: first_with_class(root, grid, class::GLOBAL_TOGGLE)
                .and_then(|p| NodeRef::at(root, p)),
            global_rotated: false,
        }
    }

    /// Whether a row's extra content is showing. `None` for rows without
    /// extra content.
    pub fn is_expanded(&self, row: usize) -> Option<bool> {
        self.rows.iter().find(|t| t.row == row).map(|t| t.expanded)
    }

    /// True if some row has extra content that is currently hidden.
    pub fn any_hidden(&self) -> bool {
        self.rows.iter().any(|t| !t.extra.is_empty() && !t.expanded)
    }

    pub fn is_global_rotated(&self) -> bool {
        self.global_rotated
    }

    /// Flip one row. Returns its new expanded state, or `None` if the row
    /// has no extra content.
    pub fn toggle_row(&mut self, row: usize) -> Option<bool> {
        let toggle = self.rows.iter_mut().find(|t| t.row == row)?;
        self.global_rotated = false;
        toggle.expanded = !toggle.expanded;
        Some(toggle.expanded)
    }

    /// Open everything if anything is hidden, otherwise close everything.
    /// Returns true when rows were opened.
    pub fn toggle_all(&mut self) -> bool {
        let open = self.any_hidden();
        for toggle in &mut self.rows {
            toggle.expanded = open;
        }
        self.global_rotated = !self.global_rotated;
        open
    }

    pub(crate) fn row_for_button(&self, target: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|t| t.button.as_ref().is_some_and(|b| b.id == target))
            .map(|t| t.row)
    }

    pub(crate) fn is_global_button(&self, target: &str) -> bool {
        self.global.as_ref().is_some_and(|g| g.id == target)
    }

    pub(crate) fn present(&self, root: &mut Element) {
        for toggle in &self.rows {
            for path in &toggle.extra {
                if let Some(extra) = node_at_mut(root, path) {
                    extra.set_class(class::HIDDEN, !toggle.expanded);
                }
            }
            if let Some(button) = toggle.button.as_ref().and_then(|b| node_at_mut(root, &b.path)) {
                button.set_class(class::ROTATED, toggle.expanded);
            }
            if let Some(row) = node_at_mut(root, &toggle.path) {
                for name in class::ROW_OPEN {
                    row.set_class(name, toggle.expanded);
                }
            }
        }
        if let Some(global) = self.global.as_ref().and_then(|g| node_at_mut(root, &g.path)) {
            global.set_class(class::ROTATED, self.global_rotated);
        }
    }
}

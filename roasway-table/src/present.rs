//! Writes grid state into the document.
//!
//! Every function here is idempotent: running it twice leaves the same
//! tree as running it once.

use crate::element::{node_at_mut, Element, NodePath};
use crate::grid::{GridState, TALL_BODY_HEIGHT};
use crate::markup::class;
use crate::types::{Cursor, Length, Position, Style};

/// Body right padding for grids with many columns.
const WIDE_BODY_PADDING: Length = Length::Percent(10);
/// The shadow never covers more than this share of the wrapper.
const SHADOW_MAX_WIDTH: Length = Length::Percent(70);

/// Write widths, sticky placement, accessibility attributes, body sizing,
/// the shadow and row toggle classes of one grid.
pub fn present_grid(root: &mut Element, state: &GridState) {
    for (index, column) in state.columns.iter().enumerate() {
        if let Some(header) = node_at_mut(root, &column.header) {
            header.set_attr("role", "columnheader");
            header.set_attr("cell-index", index);
            place_cell(header, state, index);
        }
    }

    for (row_index, row) in state.rows.iter().enumerate() {
        if let Some(element) = node_at_mut(root, &row.path) {
            element.set_attr("role", "row");
            element.set_attr("aria-rowindex", row_index + 1);
            element.set_attr("tabindex", "-1");
            element.set_attr("row-index", row_index);
            element.set_attr("row-id", row_index + 1);
        }
        // Cells past the last header have no column to follow.
        for (index, path) in row.cells.iter().enumerate().take(state.columns.len()) {
            if let Some(cell) = node_at_mut(root, path) {
                cell.set_attr("role", "gridcell");
                cell.set_attr("cell-index", index);
                if state.flags[index].fit {
                    cell.add_class(class::FIT);
                }
                place_cell(cell, state, index);
            }
        }
    }

    if let Some(body) = state.body.as_ref().and_then(|p| node_at_mut(root, p)) {
        body.style.padding_right = state.is_wide().then_some(WIDE_BODY_PADDING);
        body.style.height = state.is_tall().then_some(Length::Px(TALL_BODY_HEIGHT));
    }

    if let Some(shadow) = &state.shadow {
        if let Some(content) = node_at_mut(root, &shadow.content) {
            content.style.width = Some(Length::Px(shadow.width));
            content.style.height = Some(Length::Px(shadow.height));
            content.style.opacity = Some(shadow.opacity());
        }
    }

    state.toggles.present(root);
}

fn place_cell(cell: &mut Element, state: &GridState, index: usize) {
    cell.style.width = Some(Length::Px(state.column_widths[index]));
    match state.sticky_offsets.get(index).copied().flatten() {
        Some(left) => {
            cell.style.position = Position::Sticky;
            cell.style.left = Some(left as i32);
        }
        None => {
            cell.style.position = Position::Static;
            cell.style.left = None;
        }
    }
}

/// Append the shadow overlay to the wrapper at `wrapper`. Returns the path
/// of the overlay's content strip.
pub fn create_shadow(root: &mut Element, wrapper: &[usize]) -> Option<NodePath> {
    let host = node_at_mut(root, wrapper)?;
    let strip = Element::span()
        .class(class::SHADOW_CONTENT)
        .class("bg-opacity-10")
        .style(Style::new().opacity(0.0).max_width(SHADOW_MAX_WIDTH));
    let block = Element::div()
        .class(class::SHADOW)
        .classes("absolute inset-0 pointer-events-none z-50")
        .style(Style::new().position(Position::Absolute))
        .child(strip);
    let index = host.append(block);

    let mut path = wrapper.to_vec();
    path.extend([index, 0]);
    Some(path)
}

/// Render a visible error notice at the end of the document.
pub fn render_notice(root: &mut Element, message: &str) {
    root.append(
        Element::div()
            .class(class::ERROR_NOTICE)
            .content(message)
            .style(Style::new().color("red")),
    );
}

pub fn set_cursor(root: &mut Element, cursor: Cursor) {
    root.style.cursor = match cursor {
        Cursor::Default => None,
        other => Some(other),
    };
}

//! What the CLI prints: the final layout of every grid plus the callbacks
//! the engine fired along the way.

use roasway_table::{GridState, TableEngine};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "callback", rename_all = "snake_case")]
pub enum CallbackRecord {
    Resize { width: u32, column: String },
    Scroll { scroll_left: u32 },
    StickyAdjust,
}

#[derive(Debug, Serialize)]
pub struct PageReport {
    pub viewport: [u32; 2],
    pub desktop: bool,
    pub grids: Vec<GridReport>,
    pub failures: Vec<String>,
    pub warnings: Vec<String>,
    pub callbacks: Vec<CallbackRecord>,
}

#[derive(Debug, Serialize)]
pub struct GridReport {
    pub id: String,
    pub flexible: bool,
    pub grid_width: u32,
    pub scroll_left: u32,
    pub sticky_width: u32,
    pub columns: Vec<ColumnReport>,
    pub shadow: Option<ShadowReport>,
}

#[derive(Debug, Serialize)]
pub struct ColumnReport {
    pub id: String,
    pub intrinsic: u32,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ShadowReport {
    pub width: u32,
    pub height: u32,
    pub visible: bool,
}

impl PageReport {
    pub fn new(engine: &TableEngine, callbacks: Vec<CallbackRecord>) -> Self {
        let viewport = engine.viewport();
        let report = engine.report();
        Self {
            viewport: [viewport.width, viewport.height],
            desktop: engine.is_desktop(),
            grids: engine.grids().iter().map(GridReport::from).collect(),
            failures: report.failures.iter().map(ToString::to_string).collect(),
            warnings: report.warnings.clone(),
            callbacks,
        }
    }
}

impl From<&GridState> for GridReport {
    fn from(state: &GridState) -> Self {
        let columns = (0..state.column_count())
            .map(|index| ColumnReport {
                id: state
                    .column_id(index)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                intrinsic: state.intrinsic_widths()[index],
                width: state.column_widths()[index],
                sticky_offset: state.sticky_offsets().get(index).copied().flatten(),
            })
            .collect();
        Self {
            id: state.element_id().to_string(),
            flexible: state.is_flexible(),
            grid_width: state.grid_width(),
            scroll_left: state.scroll_left(),
            sticky_width: state.sticky_width(),
            columns,
            shadow: state.shadow().map(|s| ShadowReport {
                width: s.width,
                height: s.height,
                visible: s.visible,
            }),
        }
    }
}

//! The page controller: owns every managed grid and routes host events to
//! them.
//!
//! The document itself stays with the host and is lent to each call, the
//! same way scroll and focus state are driven from outside the tree.

use std::time::Instant;

use crate::element::{node_at, query_all, Element, Selector};
use crate::error::{ConfigError, StructuralError};
use crate::event::{Event, Viewport};
use crate::grid::{GridId, GridState};
use crate::measure::ContentMeasurer;
use crate::options::{TableCallbacks, TableOptions};
use crate::present;
use crate::resize::ActiveResize;
use crate::schedule::Debouncer;
use crate::shadow::{shadow_visible, Shadow};
use crate::types::Cursor;

/// Deferred work keyed for the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Task {
    StickyRecompute,
}

/// Managed grids in discovery order.
#[derive(Debug, Default)]
pub struct GridRegistry {
    grids: Vec<GridState>,
}

impl GridRegistry {
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn get(&self, id: GridId) -> Option<&GridState> {
        self.grids.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridState> {
        self.grids.iter()
    }

    fn get_mut(&mut self, id: GridId) -> Option<&mut GridState> {
        self.grids.get_mut(id.0)
    }

    fn register(&mut self, state: GridState) {
        self.grids.push(state);
    }

    fn next_id(&self) -> GridId {
        GridId(self.grids.len())
    }
}

/// Outcome of initialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitReport {
    /// Element IDs of the grids now under management.
    pub managed: Vec<String>,
    /// Grids skipped because their markup was incomplete.
    pub failures: Vec<StructuralError>,
    /// Non-fatal problems, such as a grid without a shadow host.
    pub warnings: Vec<String>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty()
    }
}

/// Layout and resize engine for every grid on a page.
pub struct TableEngine {
    options: TableOptions,
    callbacks: TableCallbacks,
    measurer: Box<dyn ContentMeasurer>,
    viewport: Viewport,
    registry: GridRegistry,
    report: InitReport,
    debouncer: Debouncer<Task>,
    drag: Option<ActiveResize>,
}

impl TableEngine {
    /// Discover and set up every grid matching `options.selector`.
    ///
    /// A bad selector or no match at all is fatal. A grid missing headers
    /// or rows is skipped and recorded in the report; its siblings are set
    /// up normally.
    pub fn initialize(
        document: &mut Element,
        options: TableOptions,
        callbacks: TableCallbacks,
        measurer: Box<dyn ContentMeasurer>,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        let selector = match Selector::parse(&options.selector) {
            Ok(selector) => selector,
            Err(source) => {
                return Err(report_config(
                    document,
                    ConfigError::InvalidSelector {
                        selector: options.selector.clone(),
                        source,
                    },
                ));
            }
        };

        let paths = query_all(document, &selector);
        if paths.is_empty() {
            return Err(report_config(
                document,
                ConfigError::NoMatchingGrid {
                    selector: options.selector.clone(),
                },
            ));
        }

        let mut engine = Self {
            debouncer: Debouncer::new(options.resize_debounce()),
            options,
            callbacks,
            measurer,
            viewport,
            registry: GridRegistry::default(),
            report: InitReport::default(),
            drag: None,
        };

        let mut notices = Vec::new();
        for path in paths {
            let Some(grid) = node_at(document, &path) else {
                continue;
            };
            let id = engine.registry.next_id();
            match GridState::build(
                id,
                document,
                grid,
                path,
                engine.measurer.as_ref(),
                &engine.options,
                engine.viewport.width,
            ) {
                Ok(state) => {
                    engine.report.managed.push(state.element_id.clone());
                    engine.registry.register(state);
                }
                Err(err) => {
                    log::error!("[table] {err}");
                    notices.push(err.to_string());
                    engine.report.failures.push(err);
                }
            }
        }

        if engine.is_desktop() {
            for index in 0..engine.registry.len() {
                engine.setup_desktop(document, GridId(index));
            }
        }

        for state in engine.registry.iter() {
            present::present_grid(document, state);
        }
        for message in notices {
            present::render_notice(document, &message);
        }

        log::info!(
            "[table] managing {} of {} grids (viewport {}x{})",
            engine.registry.len(),
            engine.registry.len() + engine.report.failures.len(),
            engine.viewport.width,
            engine.viewport.height
        );
        Ok(engine)
    }

    /// Sticky fit, offsets and the shadow overlay for one grid. Runs once
    /// per grid, at init or on the first recompute at desktop width.
    fn setup_desktop(&mut self, document: &mut Element, id: GridId) {
        let ratio = self.options.sticky_cap_ratio;
        let Some(state) = self.registry.get_mut(id) else {
            return;
        };
        state.setup_sticky(ratio);
        state.desktop_ready = true;

        let created = state
            .wrapper
            .as_ref()
            .and_then(|wrapper| present::create_shadow(document, wrapper));
        match created {
            Some(content) => {
                state.shadow = Some(Shadow::new(content));
                refresh_shadow(document, self.measurer.as_ref(), state);
            }
            None => {
                let message = format!(
                    "table `{}` has no wrapper, shadow overlay disabled",
                    state.element_id
                );
                log::warn!("[table] {message}");
                present::render_notice(document, &message);
                self.report.warnings.push(message);
            }
        }
    }

    /// Route one host event. `now` drives the debounced recomputation.
    pub fn dispatch(&mut self, document: &mut Element, event: Event, now: Instant) {
        match event {
            Event::PointerDown { target, x } => self.pointer_down(document, &target, x),
            Event::PointerMove { x } => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.moves.push(x);
                }
            }
            Event::PointerUp => self.pointer_up(document),
            Event::Scroll {
                target,
                scroll_left,
            } => self.scroll(document, &target, scroll_left),
            Event::Click { target } => self.click(document, &target),
            Event::WindowResize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.debouncer.schedule(Task::StickyRecompute, now);
            }
            Event::Load => self.debouncer.schedule(Task::StickyRecompute, now),
        }
    }

    fn pointer_down(&mut self, document: &mut Element, target: &str, x: i32) {
        if !self.is_desktop() {
            return;
        }
        let Some((id, column)) = self
            .registry
            .iter()
            .find_map(|s| s.column_for_resizer(target).map(|c| (s.id, c)))
        else {
            return;
        };
        let Some(state) = self.registry.get_mut(id) else {
            return;
        };
        // The cap follows the grid's current width.
        state.refresh_grid_width(document, self.measurer.as_ref(), self.viewport.width);

        let drag = ActiveResize::begin(state, column, x, self.options.min_width_resize);
        log::debug!(
            "[table] {}: drag column {} from {}px (min {}px)",
            state.element_id,
            column,
            state.column_widths[column],
            drag.min_width()
        );
        self.drag = Some(drag);
        present::set_cursor(document, Cursor::ColResize);
    }

    fn pointer_up(&mut self, document: &mut Element) {
        if self.drag.is_none() {
            return;
        }
        // A move that arrived after the last frame still counts.
        self.animation_frame(document);
        self.drag = None;
        present::set_cursor(document, Cursor::Default);
    }

    /// Apply the latest pointer position of an active drag.
    pub fn animation_frame(&mut self, document: &mut Element) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(x) = drag.moves.take() else {
            return;
        };
        let Some(state) = self.registry.grids.get_mut(drag.grid.0) else {
            return;
        };

        let width = drag.width_at(state, x, self.options.sticky_cap_ratio);
        state.apply_resize(drag.column, width, &drag.snapshot);
        state.recompute_sticky_offsets();
        log::trace!(
            "[table] {}: column {} -> {}px",
            state.element_id,
            drag.column,
            width
        );

        refresh_shadow(document, self.measurer.as_ref(), state);
        present::present_grid(document, state);
        if let Some(column) = state.columns.get(drag.column) {
            self.callbacks.resized(width, &column.id);
        }
    }

    fn scroll(&mut self, document: &mut Element, target: &str, scroll_left: u32) {
        let Some(state) = self
            .registry
            .grids
            .iter_mut()
            .find(|s| s.owns_scroll_viewport(target))
        else {
            return;
        };
        state.scroll_left = scroll_left;

        if state.shadow.is_some() {
            refresh_shadow(document, self.measurer.as_ref(), state);
            let height = state.shadow.as_ref().map_or(0, |s| s.height);
            let visible = shadow_visible(&state.column_rects(height), &state.flags, scroll_left);
            if let (Some(shadow), Some(visible)) = (state.shadow.as_mut(), visible) {
                shadow.visible = visible;
            }
            present::present_grid(document, state);
        }
        self.callbacks.scrolled(scroll_left);
    }

    fn click(&mut self, document: &mut Element, target: &str) {
        let hit = self.registry.iter().find_map(|s| {
            if s.toggles.is_global_button(target) {
                Some((s.id, None))
            } else {
                s.toggles.row_for_button(target).map(|row| (s.id, Some(row)))
            }
        });
        match hit {
            Some((id, Some(row))) => {
                self.toggle_row_content(document, id, row);
            }
            Some((id, None)) => {
                self.toggle_all_rows_content(document, id);
            }
            None => {}
        }
    }

    /// Show or hide one row's extra content. Returns the row's new state,
    /// or `None` if the grid or row has nothing to toggle.
    pub fn toggle_row_content(
        &mut self,
        document: &mut Element,
        id: GridId,
        row: usize,
    ) -> Option<bool> {
        let state = self.registry.get_mut(id)?;
        let expanded = state.toggles.toggle_row(row)?;
        state.toggles.present(document);
        log::debug!("[table] {}: row {} expanded={}", state.element_id, row, expanded);
        Some(expanded)
    }

    /// Open every row if any is closed, otherwise close them all. Returns
    /// whether rows were opened.
    pub fn toggle_all_rows_content(&mut self, document: &mut Element, id: GridId) -> Option<bool> {
        let state = self.registry.get_mut(id)?;
        let opened = state.toggles.toggle_all();
        state.toggles.present(document);
        log::debug!("[table] {}: all rows opened={}", state.element_id, opened);
        Some(opened)
    }

    /// Run deferred work whose quiet period has elapsed.
    pub fn tick(&mut self, document: &mut Element, now: Instant) {
        for task in self.debouncer.take_due(now) {
            match task {
                Task::StickyRecompute => self.recompute_on_resize(document),
            }
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Recompute sticky offsets and shadow size for every grid, in
    /// discovery order. Column widths are not re-measured; grids that were
    /// set up below desktop width get their sticky fit and shadow now.
    pub fn recompute_on_resize(&mut self, document: &mut Element) {
        if !self.is_desktop() {
            log::debug!(
                "[table] viewport {}px below desktop, sticky recompute skipped",
                self.viewport.width
            );
            return;
        }
        let viewport_width = self.viewport.width;
        for index in 0..self.registry.len() {
            let id = GridId(index);
            let Some(state) = self.registry.get_mut(id) else {
                continue;
            };
            state.refresh_grid_width(document, self.measurer.as_ref(), viewport_width);
            if !state.desktop_ready {
                self.setup_desktop(document, id);
            }
        }
        for state in &mut self.registry.grids {
            state.recompute_sticky_offsets();
            refresh_shadow(document, self.measurer.as_ref(), state);
            present::present_grid(document, state);
            log::debug!(
                "[table] {}: sticky offsets {:?}",
                state.element_id,
                state.sticky_offsets
            );
            self.callbacks.sticky_adjusted();
        }
    }

    pub fn grids(&self) -> &GridRegistry {
        &self.registry
    }

    pub fn grid(&self, id: GridId) -> Option<&GridState> {
        self.registry.get(id)
    }

    /// The managed grid whose root element has this ID.
    pub fn grid_by_element(&self, element_id: &str) -> Option<&GridState> {
        self.registry.iter().find(|s| s.element_id == element_id)
    }

    pub fn report(&self) -> &InitReport {
        &self.report
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_desktop(&self) -> bool {
        self.viewport.width >= self.options.desktop_min_width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Stop managing every grid. Pending deferred work and any drag in
    /// progress are dropped; the document keeps its last presented state.
    pub fn destroy(self) {
        log::info!(
            "[table] released {} grids (recompute pending: {}, drag active: {})",
            self.registry.len(),
            self.debouncer.next_deadline().is_some(),
            self.drag.is_some()
        );
    }
}

impl std::fmt::Debug for TableEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableEngine")
            .field("options", &self.options)
            .field("callbacks", &self.callbacks)
            .field("viewport", &self.viewport)
            .field("grids", &self.registry.len())
            .field("dragging", &self.drag.is_some())
            .finish()
    }
}

/// Size the shadow to the sticky columns and the body.
fn refresh_shadow(document: &Element, measurer: &dyn ContentMeasurer, state: &mut GridState) {
    let body_height = state
        .body
        .as_ref()
        .and_then(|path| node_at(document, path))
        .map_or(0, |body| measurer.block_height(body));
    let sticky_width = state.sticky_width();
    if let Some(shadow) = state.shadow.as_mut() {
        shadow.resize(sticky_width, body_height);
    }
}

fn report_config(document: &mut Element, err: ConfigError) -> ConfigError {
    log::error!("[table] {err}");
    present::render_notice(document, &err.to_string());
    err
}

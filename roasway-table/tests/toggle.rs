use std::time::Instant;

use roasway_table::{
    find_element, ColumnFlags, Element, Event, FixedMeasurer, GridMarkup, TableCallbacks,
    TableEngine, TableOptions, Viewport,
};

fn setup() -> (Element, TableEngine) {
    let grid = GridMarkup::new("g")
        .width(600)
        .column("Name", ColumnFlags::default())
        .column("Spend", ColumnFlags::default().fit())
        .expandable_row(["Alpha", "12"], ["Alpha details", "More"])
        .row(["Beta", "7"])
        .expandable_row(["Gamma", "3"], ["Gamma details"])
        .global_toggle()
        .build();
    let mut doc = Element::div().id("page").child(grid);
    let engine = TableEngine::initialize(
        &mut doc,
        TableOptions::default(),
        TableCallbacks::new(),
        Box::new(FixedMeasurer::new()),
        Viewport::new(1280, 800),
    )
    .unwrap();
    (doc, engine)
}

fn click(engine: &mut TableEngine, doc: &mut Element, target: &str) {
    engine.dispatch(
        doc,
        Event::Click {
            target: target.into(),
        },
        Instant::now(),
    );
}

fn hidden(doc: &Element, id: &str) -> bool {
    find_element(doc, id).unwrap().has_class("hidden")
}

fn rotated(doc: &Element, id: &str) -> bool {
    find_element(doc, id).unwrap().has_class("rotate-180")
}

// ============================================================================
// Row Toggle
// ============================================================================

#[test]
fn test_extra_content_starts_hidden() {
    let (doc, engine) = setup();

    for id in ["g-r0-x0", "g-r0-x1", "g-r2-x0"] {
        assert!(hidden(&doc, id), "{id}");
    }
    let toggles = engine.grid_by_element("g").unwrap().toggles();
    assert_eq!(toggles.is_expanded(0), Some(false));
    assert_eq!(toggles.is_expanded(1), None, "row without extra content");
    assert!(toggles.any_hidden());
}

#[test]
fn test_row_toggle_opens_and_closes() {
    let (mut doc, mut engine) = setup();

    click(&mut engine, &mut doc, "g-r0-toggle");
    assert!(!hidden(&doc, "g-r0-x0"));
    assert!(!hidden(&doc, "g-r0-x1"));
    assert!(hidden(&doc, "g-r2-x0"), "other rows untouched");
    assert!(rotated(&doc, "g-r0-toggle"));
    let row = find_element(&doc, "g-r0").unwrap();
    assert!(row.has_class("content-self-start") && row.has_class("focused"));

    click(&mut engine, &mut doc, "g-r0-toggle");
    assert!(hidden(&doc, "g-r0-x0"));
    assert!(!rotated(&doc, "g-r0-toggle"));
    assert!(!find_element(&doc, "g-r0").unwrap().has_class("focused"));
}

#[test]
fn test_toggle_row_content_by_index() {
    let (mut doc, mut engine) = setup();
    let id = engine.grid_by_element("g").unwrap().id();

    assert_eq!(engine.toggle_row_content(&mut doc, id, 2), Some(true));
    assert!(!hidden(&doc, "g-r2-x0"));
    assert_eq!(engine.toggle_row_content(&mut doc, id, 1), None);
    assert_eq!(engine.toggle_row_content(&mut doc, id, 99), None);
}

// ============================================================================
// Global Toggle
// ============================================================================

#[test]
fn test_global_toggle_opens_then_closes_all() {
    let (mut doc, mut engine) = setup();

    click(&mut engine, &mut doc, "g-toggle-all");
    for id in ["g-r0-x0", "g-r0-x1", "g-r2-x0"] {
        assert!(!hidden(&doc, id), "{id}");
    }
    assert!(rotated(&doc, "g-toggle-all"));
    assert!(rotated(&doc, "g-r0-toggle") && rotated(&doc, "g-r2-toggle"));

    click(&mut engine, &mut doc, "g-toggle-all");
    for id in ["g-r0-x0", "g-r0-x1", "g-r2-x0"] {
        assert!(hidden(&doc, id), "{id}");
    }
    assert!(!rotated(&doc, "g-toggle-all"));
}

#[test]
fn test_global_toggle_opens_when_any_row_hidden() {
    let (mut doc, mut engine) = setup();
    let id = engine.grid_by_element("g").unwrap().id();

    engine.toggle_row_content(&mut doc, id, 0);
    assert_eq!(engine.toggle_all_rows_content(&mut doc, id), Some(true));
    assert!(!hidden(&doc, "g-r0-x0"), "already open row stays open");
    assert!(!hidden(&doc, "g-r2-x0"));
}

#[test]
fn test_row_toggle_resets_global_button() {
    let (mut doc, mut engine) = setup();

    click(&mut engine, &mut doc, "g-toggle-all");
    assert!(rotated(&doc, "g-toggle-all"));

    click(&mut engine, &mut doc, "g-r2-toggle");
    assert!(!rotated(&doc, "g-toggle-all"));
    assert!(hidden(&doc, "g-r2-x0"));
    assert!(!hidden(&doc, "g-r0-x0"));
}

#[test]
fn test_toggles_leave_widths_alone() {
    let (mut doc, mut engine) = setup();
    let before = engine.grid_by_element("g").unwrap().column_widths().to_vec();

    click(&mut engine, &mut doc, "g-toggle-all");
    click(&mut engine, &mut doc, "g-r0-toggle");

    assert_eq!(engine.grid_by_element("g").unwrap().column_widths(), before.as_slice());
}

#[test]
fn test_click_elsewhere_ignored() {
    let (mut doc, mut engine) = setup();
    let before = doc.clone();

    click(&mut engine, &mut doc, "g-r1");
    click(&mut engine, &mut doc, "nowhere");

    assert_eq!(doc, before);
}

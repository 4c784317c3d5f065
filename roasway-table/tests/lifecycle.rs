use roasway_table::{
    find_element, ColumnFlags, ConfigError, Element, FixedMeasurer, GridMarkup,
    StructuralError, TableCallbacks, TableEngine, TableOptions, TextMeasurer, Viewport,
};

const DESKTOP: Viewport = Viewport::new(1280, 800);

fn valid(id: &str) -> Element {
    GridMarkup::new(id)
        .width(600)
        .column("Name", ColumnFlags::default().sticky())
        .column("Spend", ColumnFlags::default().fit())
        .row(["Alpha", "12"])
        .row(["Beta", "7"])
        .build()
}

fn initialize(doc: &mut Element, options: TableOptions) -> Result<TableEngine, ConfigError> {
    TableEngine::initialize(
        doc,
        options,
        TableCallbacks::new(),
        Box::new(FixedMeasurer::new()),
        DESKTOP,
    )
}

fn notices(doc: &Element) -> Vec<&Element> {
    doc.children.iter().filter(|e| e.has_class("table-error")).collect()
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_no_matching_grid_is_fatal() {
    let mut doc = Element::div().id("page").child(Element::div().id("content"));

    let err = initialize(&mut doc, TableOptions::default()).unwrap_err();

    assert_eq!(
        err,
        ConfigError::NoMatchingGrid {
            selector: "[data-table]".into()
        }
    );
    let shown = notices(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].style.color.as_deref(), Some("red"));
    assert!(shown[0].text_content().contains("[data-table]"));
}

#[test]
fn test_invalid_selector_is_fatal() {
    let mut doc = Element::div().id("page").child(valid("g"));

    let err = initialize(&mut doc, TableOptions::new("[data-table")).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidSelector { ref selector, .. } if selector == "[data-table"
    ));
    assert_eq!(notices(&doc).len(), 1);
    assert_eq!(find_element(&doc, "g-h0").unwrap().get_attr("role"), None);
}

#[test]
fn test_custom_selector() {
    let mut doc = Element::div()
        .id("page")
        .child(valid("a"))
        .child(valid("b").class("reports"));

    let engine = initialize(&mut doc, TableOptions::new(".table-type-one.reports")).unwrap();

    assert_eq!(engine.report().managed, vec!["b".to_string()]);
    assert!(engine.grid_by_element("a").is_none());
}

// ============================================================================
// Structural Errors
// ============================================================================

#[test]
fn test_broken_grid_isolated_from_valid_sibling() {
    let broken = GridMarkup::new("bad")
        .width(600)
        .column("Name", ColumnFlags::default())
        .build();
    let mut doc = Element::div().id("page").child(valid("good")).child(broken);

    let engine = initialize(&mut doc, TableOptions::default()).unwrap();

    let report = engine.report();
    assert_eq!(report.managed, vec!["good".to_string()]);
    assert_eq!(
        report.failures,
        vec![StructuralError::MissingRows { grid: "bad".into() }]
    );
    assert_eq!(engine.grids().len(), 1);
    assert_eq!(notices(&doc).len(), 1);

    // The valid grid is fully set up, the broken one untouched.
    assert!(find_element(&doc, "good-h0").unwrap().style.width.is_some());
    let header = find_element(&doc, "bad-h0").unwrap();
    assert_eq!(header.style.width, None);
    assert_eq!(header.get_attr("role"), None);
}

#[test]
fn test_missing_headers_reported() {
    let headless = Element::div()
        .id("headless")
        .attr("data-table", "")
        .child(Element::div().class("table-row").child(Element::div().class("table-line")));
    let mut doc = Element::div().id("page").child(headless).child(valid("good"));

    let engine = initialize(&mut doc, TableOptions::default()).unwrap();

    let failures = &engine.report().failures;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].grid(), "headless");
    assert!(matches!(failures[0], StructuralError::MissingHeaders { .. }));
    // Registry IDs follow the managed grids only.
    let good = engine.grid_by_element("good").unwrap();
    assert_eq!(good.id().index(), 0);
    assert_eq!(engine.grid(good.id()).map(|g| g.element_id()), Some("good"));
}

#[test]
fn test_all_grids_broken_still_initializes() {
    let mut doc = Element::div().id("page").child(
        GridMarkup::new("bad")
            .column("Name", ColumnFlags::default())
            .build(),
    );

    let engine = initialize(&mut doc, TableOptions::default()).unwrap();

    assert!(engine.grids().is_empty());
    assert_eq!(engine.report().failures.len(), 1);
    assert!(!engine.report().is_clean());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_options_from_json() {
    let options: TableOptions = serde_json::from_str(
        r#"{ "selector": ".table-type-one", "desktop_min_width": 1400, "max_width": 240 }"#,
    )
    .unwrap();
    let mut doc = Element::div().id("page").child(valid("g"));

    let engine = initialize(&mut doc, options).unwrap();

    assert_eq!(engine.options().max_width, 240);
    assert!(!engine.is_desktop(), "1280 < 1400");
    assert!(engine.grid_by_element("g").unwrap().shadow().is_none());
}

#[test]
fn test_text_measurer_end_to_end() {
    let mut doc = Element::div().id("page").child(
        GridMarkup::new("g")
            .width(200)
            .cell_padding(4)
            .column("Code", ColumnFlags::default().fit())
            .column("Product", ColumnFlags::default().fit())
            .row(["A1", "Widget"])
            .build(),
    );

    let engine = TableEngine::initialize(
        &mut doc,
        TableOptions::default(),
        TableCallbacks::new(),
        Box::new(TextMeasurer::default()),
        DESKTOP,
    )
    .unwrap();

    // 8px per column plus 8px padding: "Code" 40, "Product" 64
    let state = engine.grid_by_element("g").unwrap();
    assert_eq!(state.intrinsic_widths(), &[40, 64]);
    assert_eq!(state.column_widths().iter().sum::<u32>(), 199);
    // header + 1 row, 40px each
    assert_eq!(state.shadow().unwrap().height, 80);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_destroy_leaves_document_presented() {
    let mut doc = Element::div().id("page").child(valid("g"));
    let engine = initialize(&mut doc, TableOptions::default()).unwrap();
    let presented = doc.clone();

    engine.destroy();

    assert_eq!(doc, presented);
}

#[test]
fn test_grid_ids_in_discovery_order() {
    let mut doc = Element::div()
        .id("page")
        .child(valid("first"))
        .child(Element::div().child(valid("second")));

    let engine = initialize(&mut doc, TableOptions::default()).unwrap();

    let ids: Vec<String> = engine.grids().iter().map(|g| g.id().to_string()).collect();
    assert_eq!(ids, vec!["grid#0", "grid#1"]);
    let names: Vec<&str> = engine.grids().iter().map(|g| g.element_id()).collect();
    assert_eq!(names, vec!["first", "second"]);
    let paths: Vec<&[usize]> = engine.grids().iter().map(|g| g.path()).collect();
    assert_eq!(paths, vec![&[0][..], &[1, 0][..]]);
}

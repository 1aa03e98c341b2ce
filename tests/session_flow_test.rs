//! End-to-end session flows: image in, reduce, edit, undo, save.

mod common;

use beadgrid::rendering::decode_png;
use common::fixtures::{self, colors::*};
use common::TestApp;
use gridquant::Color;
use pretty_assertions::assert_eq;

const MAGENTA_MEAN: Color = Color::from_rgb(0xAA, 0x55, 0xAA);

#[test]
fn test_import_reduce_undo_redo() {
    let app = TestApp::new();
    let mut session = app.session_sized(8, 2);

    // Step 1: Sample a four-stripe PNG through the decoder
    let image = fixtures::striped_image(8, 2, &[RED, GREEN, BLUE, WHITE]);
    let decoded = decode_png(&fixtures::encode_png(&image)).unwrap();
    let histogram = session.load_image(&decoded).unwrap();

    assert_eq!(histogram.len(), 4);
    common::assert_cells(
        session.grid(),
        &[
            (0, 0, "#FF0000"),
            (3, 1, "#00FF00"),
            (4, 0, "#0000FF"),
            (7, 1, "#FFFFFF"),
        ],
    );
    // Equal counts rank brightest first
    assert_eq!(&session.palette().colors()[..4], &[WHITE, RED, GREEN, BLUE]);

    // Step 2: Reduce to two colors, seeded from the sampled image
    let reduction = session.reduce_colors(2).unwrap();
    assert!(!reduction.unchanged);
    assert!(reduction.converged);
    assert_eq!(reduction.colors, vec![MAGENTA_MEAN, GREEN]);
    common::assert_at_most_colors(session.grid(), 2);
    common::assert_cells(
        session.grid(),
        &[
            (0, 0, "#AA55AA"),
            (2, 0, "#00FF00"),
            (5, 1, "#AA55AA"),
            (6, 0, "#AA55AA"),
        ],
    );
    assert_eq!(&session.palette().colors()[..2], &[MAGENTA_MEAN, GREEN]);

    // Step 3: Undo restores the sampled grid, redo the reduced one
    assert!(session.undo());
    common::assert_cells(session.grid(), &[(0, 0, "#FF0000"), (4, 0, "#0000FF")]);
    assert!(session.redo());
    common::assert_cells(session.grid(), &[(0, 0, "#AA55AA")]);
    assert!(!session.redo());

    // Step 4: Undo back past the import to the blank grid
    assert!(session.undo());
    assert!(session.undo());
    assert!(session.grid().cells().all(|(_, _, c)| c == WHITE));
    assert!(!session.undo());
}

#[test]
fn test_reduce_within_target_is_noop() {
    let app = TestApp::new();
    let mut session = app.session_sized(4, 1);
    session
        .load_image(&fixtures::striped_image(4, 1, &[RED, BLUE]))
        .unwrap();
    let before: Vec<_> = session.grid().cells().collect();
    let history_len = session.grid().history().len();

    let reduction = session.reduce_colors(5).unwrap();

    assert!(reduction.unchanged);
    assert_eq!(session.grid().cells().collect::<Vec<_>>(), before);
    assert_eq!(session.grid().history().len(), history_len);
}

#[test]
fn test_reduce_zero_is_error() {
    let app = TestApp::new();
    let mut session = app.session_sized(2, 2);
    assert!(matches!(
        session.reduce_colors(0),
        Err(beadgrid::error::SessionError::Quantize(_))
    ));
}

#[test]
fn test_reduction_is_reproducible() {
    let app = TestApp::with_assets(Some("grid:\n  cols: 32\n  rows: 2\n"), None);
    let image = fixtures::gray_ramp(32, 2);

    let run = || {
        let mut session = app.session();
        session.load_image(&image).unwrap();
        let reduction = session.reduce_colors(3).unwrap();
        (reduction, session.grid().cells().collect::<Vec<_>>())
    };

    let (first, first_cells) = run();
    let (second, second_cells) = run();
    assert_eq!(first, second);
    assert_eq!(first_cells, second_cells);
}

#[test]
fn test_gray_ramp_reduces_to_reduction_colors() {
    let app = TestApp::with_assets(Some("grid:\n  cols: 32\n  rows: 2\n"), None);
    let mut session = app.session();
    let histogram = session.load_image(&fixtures::gray_ramp(32, 2)).unwrap();
    // The embedded reference has ten grays
    assert_eq!(histogram.len(), 10);

    let reduction = session.reduce_colors(3).unwrap();
    assert_eq!(reduction.colors.len(), 3);
    common::assert_at_most_colors(session.grid(), 3);
    common::assert_colors_within(session.grid(), &reduction.colors);
}

#[test]
fn test_first_image_stays_reference() {
    let app = TestApp::new();
    let mut session = app.session_sized(4, 1);

    let first = session
        .load_image(&fixtures::striped_image(4, 1, &[RED, GREEN]))
        .unwrap();
    assert!(session.context().has_reference());

    session
        .load_image(&fixtures::striped_image(4, 1, &[BLUE, BLACK]))
        .unwrap();
    assert_eq!(session.context().reference(), Some(&first));
    common::assert_cells(session.grid(), &[(0, 0, "#0000FF"), (3, 0, "#000000")]);
}

#[test]
fn test_reference_survives_grid_load() {
    let app = TestApp::new();
    let mut session = app.session_sized(4, 1);
    let first = session
        .load_image(&fixtures::striped_image(4, 1, &[RED, GREEN]))
        .unwrap();

    session.load_grid_json(fixtures::SMALL_GRID_JSON).unwrap();
    assert_eq!(session.context().reference(), Some(&first));
}

#[test]
fn test_selection_paint_and_undo() {
    let app = TestApp::new();
    let mut session = app.session_sized(3, 3);

    let grid = session.grid_mut();
    assert_eq!(grid.select_rect((0, 0), (1, 1)).unwrap(), 4);
    assert!(session.apply_to_selection(RED));
    common::assert_cells(
        session.grid(),
        &[(0, 0, "#FF0000"), (1, 1, "#FF0000"), (2, 2, "#FFFFFF")],
    );

    // Selection is kept after painting
    assert_eq!(session.grid().selection_len(), 4);
    session.grid_mut().clear_selection();
    assert!(!session.apply_to_selection(BLUE));

    assert!(session.undo());
    common::assert_cells(session.grid(), &[(0, 0, "#FFFFFF")]);
}

#[test]
fn test_direct_edits_commit_on_next_action() {
    let app = TestApp::new();
    let mut session = app.session_sized(2, 1);

    session.grid_mut().set(0, 0, RED).unwrap();
    session.grid_mut().set(1, 0, BLUE).unwrap();
    assert!(session.grid().has_uncommitted());

    // Undo first commits the pending writes as one state
    assert!(session.undo());
    common::assert_cells(session.grid(), &[(0, 0, "#FFFFFF"), (1, 0, "#FFFFFF")]);
    assert!(session.redo());
    common::assert_cells(session.grid(), &[(0, 0, "#FF0000"), (1, 0, "#0000FF")]);
}

#[test]
fn test_history_capacity_from_config() {
    let app = TestApp::with_assets(
        Some("grid:\n  cols: 4\n  rows: 1\nhistory_capacity: 3\n"),
        None,
    );
    let mut session = app.session();
    assert_eq!(session.grid().history().capacity(), 3);

    for col in 0..4 {
        let grid = session.grid_mut();
        grid.clear_selection();
        grid.select(col, 0).unwrap();
        assert!(session.apply_to_selection(RED));
    }

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    // Two oldest edits were evicted
    common::assert_cells(
        session.grid(),
        &[(0, 0, "#FF0000"), (1, 0, "#FF0000"), (2, 0, "#FFFFFF")],
    );
}

#[test]
fn test_clear_is_undoable() {
    let app = TestApp::new();
    let mut session = app.session_sized(2, 2);
    session
        .load_image(&fixtures::striped_image(2, 2, &[RED, BLUE]))
        .unwrap();

    session.clear();
    assert!(session.grid().cells().all(|(_, _, c)| c == WHITE));

    assert!(session.undo());
    common::assert_cells(session.grid(), &[(0, 0, "#FF0000"), (1, 1, "#0000FF")]);
}

#[test]
fn test_save_and_reload_file() {
    let app = TestApp::new();
    let mut session = app.session_sized(4, 2);
    session
        .load_image(&fixtures::striped_image(4, 2, &[RED, GREEN]))
        .unwrap();
    session.reduce_colors(1).unwrap();

    let path = app.path("grid.json");
    session.save_grid(&path).unwrap();

    let mut reloaded = app.session_sized(1, 1);
    reloaded.load_grid(&path).unwrap();
    common::assert_same_cells(session.grid(), reloaded.grid());
    assert_eq!(reloaded.palette(), session.palette());
    assert!(!reloaded.grid().can_undo());
}

//! PNG export tests: render, encode, decode back.

mod common;

use beadgrid::error::RenderError;
use beadgrid::rendering::{decode_png, export_png, ExportMode, ExportOptions};
use common::fixtures::{self, colors::*};
use common::TestApp;
use gridquant::Color;
use pretty_assertions::assert_eq;

const OUTLINE: Color = Color::from_rgb(0xC0, 0xC0, 0xC0);

#[test]
fn test_cell_map_export() {
    let app = TestApp::new();
    let mut session = app.session_sized(1, 1);
    session.load_grid_json(fixtures::SMALL_GRID_JSON).unwrap();

    let options = ExportOptions::from_config(&app.config);
    let png = export_png(session.grid(), ExportMode::CellMap, &options).unwrap();
    common::assert_png(&png);

    let image = decode_png(&png).unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.pixel(0, 0), RED);
    assert_eq!(image.pixel(1, 0), WHITE);
    assert_eq!(image.pixel(1, 1), BLUE);
}

#[test]
fn test_decorated_export() {
    let app = TestApp::new();
    let mut session = app.session_sized(1, 1);
    session.load_grid_json(fixtures::SMALL_GRID_JSON).unwrap();

    let options = ExportOptions {
        cell_size: 10,
        ..ExportOptions::from_config(&app.config)
    };
    let image = decode_png(&export_png(session.grid(), ExportMode::Decorated, &options).unwrap())
        .unwrap();

    assert_eq!((image.width(), image.height()), (20, 20));
    assert_eq!(image.pixel(0, 0), OUTLINE);
    assert_eq!(image.pixel(9, 5), OUTLINE);
    assert_eq!(image.pixel(5, 5), RED);
    assert_eq!(image.pixel(15, 15), BLUE);
    assert_eq!(image.pixel(15, 5), WHITE);
}

#[test]
fn test_colors_only_export_has_no_outlines() {
    let app = TestApp::new();
    let mut session = app.session_sized(1, 1);
    session.load_grid_json(fixtures::SMALL_GRID_JSON).unwrap();

    let options = ExportOptions {
        cell_size: 10,
        ..ExportOptions::from_config(&app.config)
    };
    let image = decode_png(&export_png(session.grid(), ExportMode::ColorsOnly, &options).unwrap())
        .unwrap();

    assert_eq!(image.pixel(0, 0), RED);
    assert_eq!(image.pixel(9, 9), RED);
    assert_eq!(image.pixel(10, 10), BLUE);
}

#[test]
fn test_brick_export_layout() {
    let app = TestApp::new();
    let mut session = app.session_sized(1, 1);
    session.load_grid_json(fixtures::BRICK_GRID_JSON).unwrap();

    let options = ExportOptions {
        cell_size: 10,
        background: BLACK,
        ..ExportOptions::from_config(&app.config)
    };
    let image = decode_png(&export_png(session.grid(), ExportMode::ColorsOnly, &options).unwrap())
        .unwrap();

    // 3 cells plus a half-cell offset for the shifted row
    assert_eq!((image.width(), image.height()), (35, 20));
    assert_eq!(image.pixel(2, 12), BLACK);
    assert_eq!(image.pixel(17, 12), GREEN);
    assert_eq!(image.pixel(12, 2), WHITE);
    assert_eq!(image.pixel(32, 2), BLACK);
}

#[test]
fn test_export_follows_configured_outline() {
    let app = TestApp::with_assets(Some("export:\n  cell_size: 4\n  outline_color: \"#000\"\n"), None);
    let mut session = app.session_sized(1, 1);
    session.load_grid_json(fixtures::SMALL_GRID_JSON).unwrap();

    let options = ExportOptions::from_config(&app.config);
    assert_eq!(options.cell_size, 4);
    let image =
        decode_png(&export_png(session.grid(), ExportMode::Decorated, &options).unwrap()).unwrap();
    assert_eq!((image.width(), image.height()), (8, 8));
    assert_eq!(image.pixel(0, 0), BLACK);
}

#[test]
fn test_export_zero_cell_size() {
    let app = TestApp::new();
    let session = app.session_sized(2, 2);
    let options = ExportOptions {
        cell_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        export_png(session.grid(), ExportMode::Decorated, &options),
        Err(RenderError::InvalidCellSize(0))
    ));
}

//! Beadgrid - palette-constrained pattern grids
//!
//! Turns images into cell grids drawn from a bounded palette, with undoable
//! editing, color reduction and PNG export.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

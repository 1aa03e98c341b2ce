//! One editing session: grid, swatches, reference palette and the
//! quantization context, owned together.
//!
//! All mutation goes through `&mut Session`, so there is exactly one writer
//! for the grid at any time. Every fallible operation validates first and
//! only then touches state.

use std::path::Path;

use gridquant::{
    build_replacement_map, reduce_colors_detailed, sample, Color, ColorHistogram, Palette,
    PixelBuffer, QuantizationContext, Reduction, ReferencePalette,
};

use crate::error::SessionError;
use crate::models::{AppConfig, CoordinateGrid, GridSettings};
use crate::services::grid_file::{self, LoadedGrid};
use crate::services::palette_file::PaletteFile;

pub struct Session {
    grid: CoordinateGrid,
    palette: Palette,
    reference: ReferencePalette,
    context: QuantizationContext,
    settings: GridSettings,
    palette_slots: usize,
}

impl Session {
    pub fn new(
        cols: u32,
        rows: u32,
        settings: GridSettings,
        palette_slots: usize,
        reference: ReferencePalette,
    ) -> Result<Self, SessionError> {
        let grid = CoordinateGrid::new(cols, rows, &settings)?;
        Ok(Self {
            grid,
            palette: Palette::filled(palette_slots, settings.default_color),
            reference,
            context: QuantizationContext::new(),
            settings,
            palette_slots,
        })
    }

    /// New session with the configured grid extent.
    pub fn from_config(
        config: &AppConfig,
        reference: ReferencePalette,
    ) -> Result<Self, SessionError> {
        Self::new(
            config.grid.cols,
            config.grid.rows,
            config.grid_settings(),
            config.palette_slots,
            reference,
        )
    }

    pub fn grid(&self) -> &CoordinateGrid {
        &self.grid
    }

    /// Direct access for selection and single-cell edits.
    pub fn grid_mut(&mut self) -> &mut CoordinateGrid {
        &mut self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn reference(&self) -> &ReferencePalette {
        &self.reference
    }

    pub fn context(&self) -> &QuantizationContext {
        &self.context
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Sample a decoded image onto the grid as one undoable edit.
    ///
    /// The first image of the session becomes the reference for later
    /// reductions. Swatches are re-extracted from the sampled histogram,
    /// which is also returned.
    pub fn load_image(&mut self, image: &PixelBuffer) -> Result<ColorHistogram, SessionError> {
        let sampled = sample(
            image,
            self.grid.cols(),
            self.grid.rows(),
            self.reference.colors(),
        )?;
        self.grid.apply_sample(&sampled)?;

        let first = self.context.record_image(sampled.histogram());
        self.refresh_palette_from(sampled.histogram());

        tracing::info!(
            width = image.width(),
            height = image.height(),
            cols = sampled.cols(),
            rows = sampled.rows(),
            colors = sampled.histogram().len(),
            reference = first,
            "Sampled image onto grid"
        );
        Ok(sampled.histogram().clone())
    }

    /// Reduce the grid to at most `k` distinct colors as one undoable edit.
    ///
    /// When the grid already has `k` or fewer colors nothing changes.
    pub fn reduce_colors(&mut self, k: usize) -> Result<Reduction, SessionError> {
        let histogram = self.grid.histogram();
        let reduction = reduce_colors_detailed(&histogram, k, &self.context)?;
        if reduction.unchanged {
            tracing::debug!(
                colors = histogram.len(),
                k,
                "Grid already within target, nothing to reduce"
            );
            return Ok(reduction);
        }

        let map = build_replacement_map(histogram.colors(), &reduction.colors);
        let changed = self.grid.apply_color_map(&map);
        self.refresh_palette();

        tracing::info!(
            from = histogram.len(),
            k,
            iterations = reduction.iterations,
            converged = reduction.converged,
            cells = changed,
            "Reduced grid colors"
        );
        Ok(reduction)
    }

    /// Paint the selection. Returns `false` if nothing is selected.
    pub fn apply_to_selection(&mut self, color: Color) -> bool {
        self.grid.apply_to_selection(color)
    }

    /// Overwrite one swatch. Returns `false` for a nonexistent slot.
    pub fn set_palette_slot(&mut self, slot: usize, color: Color) -> bool {
        self.palette.set(slot, color)
    }

    /// Re-derive the swatches from the grid's current colors.
    pub fn refresh_palette(&mut self) {
        let histogram = self.grid.histogram();
        self.refresh_palette_from(&histogram);
    }

    fn refresh_palette_from(&mut self, histogram: &ColorHistogram) {
        self.palette = Palette::from_histogram(
            histogram,
            self.palette_slots,
            self.settings.default_color,
        );
    }

    pub fn undo(&mut self) -> bool {
        self.grid.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.grid.redo()
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn grid_json(&self) -> Result<String, SessionError> {
        Ok(grid_file::to_json(&self.grid, &self.palette)?)
    }

    pub fn save_grid(&self, path: &Path) -> Result<(), SessionError> {
        Ok(grid_file::save(path, &self.grid, &self.palette)?)
    }

    /// Replace the grid from a grid file. On error the session is untouched.
    pub fn load_grid(&mut self, path: &Path) -> Result<(), SessionError> {
        let loaded = grid_file::load(path, &self.settings, self.palette_slots)?;
        self.install(loaded);
        Ok(())
    }

    pub fn load_grid_json(&mut self, text: &str) -> Result<(), SessionError> {
        let loaded = grid_file::from_json(text, &self.settings, self.palette_slots)?;
        self.install(loaded);
        Ok(())
    }

    fn install(&mut self, loaded: LoadedGrid) {
        self.grid = loaded.grid;
        match loaded.palette {
            Some(palette) => self.palette = palette,
            None => self.refresh_palette(),
        }
    }

    /// Replace the swatches from a palette file.
    pub fn import_palette(&mut self, path: &Path) -> Result<(), SessionError> {
        let file = PaletteFile::load(path)?;
        self.palette = file.to_palette(self.palette_slots, self.settings.default_color)?;
        tracing::info!(path = %path.display(), name = %file.name, "Imported palette");
        Ok(())
    }

    pub fn export_palette(&self, name: &str, description: &str) -> PaletteFile {
        PaletteFile::from_palette(name, description, &self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GridError, LoadError};
    use gridquant::PixelLayout;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::from_rgb(255, 0, 0);
    const BLUE: Color = Color::from_rgb(0, 0, 255);

    fn session(cols: u32, rows: u32) -> Session {
        Session::new(cols, rows, GridSettings::default(), 10, ReferencePalette::fallback()).unwrap()
    }

    /// Left half near-red, right half near-blue.
    fn split_image(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for _ in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    data.extend_from_slice(&[240, 10, 10]);
                } else {
                    data.extend_from_slice(&[10, 10, 240]);
                }
            }
        }
        PixelBuffer::new(width, height, PixelLayout::Rgb, data).unwrap()
    }

    #[test]
    fn test_load_image_fills_grid_and_palette() {
        let mut session = session(4, 2);
        let histogram = session.load_image(&split_image(40, 20)).unwrap();

        assert_eq!(histogram.count(RED), 4);
        assert_eq!(histogram.count(BLUE), 4);
        assert_eq!(session.grid().get(0, 0).unwrap(), RED);
        assert_eq!(session.grid().get(3, 1).unwrap(), BLUE);
        assert_eq!(session.palette().get(0), Some(RED));
        assert_eq!(session.palette().get(1), Some(BLUE));
        assert_eq!(session.palette().len(), 10);
        assert!(session.context().has_reference());
    }

    #[test]
    fn test_load_image_is_undoable() {
        let mut session = session(4, 2);
        session.load_image(&split_image(40, 20)).unwrap();
        assert!(session.undo());
        assert!(session.grid().cells().all(|(_, _, c)| c == Color::WHITE));
    }

    #[test]
    fn test_first_image_stays_reference() {
        let mut session = session(2, 2);
        session.load_image(&split_image(8, 8)).unwrap();
        let reference = session.context().reference().cloned();

        session
            .load_image(&PixelBuffer::filled(8, 8, Color::BLACK).unwrap())
            .unwrap();
        assert_eq!(session.context().reference().cloned(), reference);
        assert_eq!(
            session.context().known_colors().map(|h| h.count(Color::BLACK)),
            Some(4)
        );
    }

    #[test]
    fn test_reduce_colors_remaps_grid() {
        let mut session = session(3, 1);
        session.grid_mut().set(0, 0, Color::BLACK).unwrap();
        session
            .grid_mut()
            .set(1, 0, Color::from_rgb(8, 8, 8))
            .unwrap();

        let reduction = session.reduce_colors(2).unwrap();
        assert!(!reduction.unchanged);
        assert_eq!(session.grid().distinct_colors().len(), 2);
        assert_eq!(session.grid().get(0, 0).unwrap(), session.grid().get(1, 0).unwrap());

        // Undo reverts the remap back to the committed direct writes
        assert!(session.undo());
        assert_eq!(session.grid().get(1, 0).unwrap(), Color::from_rgb(8, 8, 8));
    }

    #[test]
    fn test_reduce_within_target_is_noop() {
        let mut session = session(2, 2);
        let reduction = session.reduce_colors(5).unwrap();
        assert!(reduction.unchanged);
        assert_eq!(session.grid().history().len(), 1);
    }

    #[test]
    fn test_reduce_zero_rejected() {
        let mut session = session(2, 2);
        assert!(matches!(
            session.reduce_colors(0),
            Err(SessionError::Quantize(_))
        ));
    }

    #[test]
    fn test_selection_scenario() {
        let mut session = session(2, 2);
        session.grid_mut().select(0, 0).unwrap();
        session.grid_mut().select(1, 1).unwrap();
        assert!(session.apply_to_selection(RED));

        let hist = session.grid().histogram();
        assert_eq!(hist.count(Color::WHITE), 2);
        assert_eq!(hist.count(RED), 2);

        session.undo();
        assert_eq!(session.grid().histogram().count(Color::WHITE), 4);
        session.redo();
        assert_eq!(session.grid().histogram().count(RED), 2);
    }

    #[test]
    fn test_invalid_extent() {
        let result = Session::new(0, 1, GridSettings::default(), 10, ReferencePalette::fallback());
        assert!(matches!(
            result,
            Err(SessionError::Grid(GridError::InvalidExtent { .. }))
        ));
    }

    #[test]
    fn test_failed_load_leaves_session_untouched() {
        let mut session = session(2, 2);
        session.grid_mut().select_all();
        session.apply_to_selection(RED);

        let result = session.load_grid_json(r##"{"cols": 2, "rows": 2, "colorMap": {"0,0": "bogus"}}"##);
        assert!(matches!(
            result,
            Err(SessionError::Load(LoadError::InvalidColor { .. }))
        ));
        assert_eq!(session.grid().histogram().count(RED), 4);
        assert!(session.grid().can_undo());
    }

    #[test]
    fn test_load_grid_resets_history() {
        let mut session = session(2, 2);
        session.grid_mut().select_all();
        session.apply_to_selection(RED);
        let json = session.grid_json().unwrap();

        session.clear();
        session.load_grid_json(&json).unwrap();
        assert_eq!(session.grid().histogram().count(RED), 4);
        assert!(!session.grid().can_undo());
        assert!(!session.undo());
    }

    #[test]
    fn test_palette_slots_and_export() {
        let mut session = session(1, 1);
        assert!(session.set_palette_slot(9, BLUE));
        assert!(!session.set_palette_slot(10, BLUE));

        let file = session.export_palette("mine", "test");
        assert_eq!(file.colors.len(), 10);
        assert_eq!(file.colors[9], "#0000FF");
    }

    #[test]
    fn test_import_palette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r##"{"name": "x", "colors": ["#00f", "junk"]}"##).unwrap();

        let mut session = session(1, 1);
        session.import_palette(&path).unwrap();
        assert_eq!(session.palette().get(0), Some(BLUE));
        assert_eq!(session.palette().get(1), Some(Color::WHITE));
    }
}

//! Test application wrapper: a scratch directory plus the asset loader and
//! config a CLI run would see.

use std::fs;
use std::path::{Path, PathBuf};

use beadgrid::assets::AssetLoader;
use beadgrid::models::AppConfig;
use beadgrid::services::{reference_palette, Session};
use gridquant::ReferencePalette;
use tempfile::TempDir;

pub struct TestApp {
    dir: TempDir,
    pub loader: AssetLoader,
    pub config: AppConfig,
}

impl TestApp {
    /// Embedded config and reference palette.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let loader = AssetLoader::new(None, None);
        let config = AppConfig::load_from_assets(&loader);
        Self {
            dir,
            loader,
            config,
        }
    }

    /// External config and/or reference palette written into the scratch dir.
    pub fn with_assets(config_yaml: Option<&str>, reference_json: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = config_yaml.map(|yaml| {
            let path = dir.path().join("config.yaml");
            fs::write(&path, yaml).expect("Failed to write config");
            path
        });
        let palette_path = reference_json.map(|json| {
            let path = dir.path().join("reference_palette.json");
            fs::write(&path, json).expect("Failed to write reference palette");
            path
        });
        let loader = AssetLoader::new(config_path, palette_path);
        let config = AppConfig::load_from_assets(&loader);
        Self {
            dir,
            loader,
            config,
        }
    }

    /// Session sized from the loaded config.
    pub fn session(&self) -> Session {
        let reference = reference_palette::load(&self.loader);
        Session::from_config(&self.config, reference).expect("Failed to create session")
    }

    /// Session with an explicit extent and the built-in 12-color reference.
    pub fn session_sized(&self, cols: u32, rows: u32) -> Session {
        Session::new(
            cols,
            rows,
            self.config.grid_settings(),
            self.config.palette_slots,
            ReferencePalette::fallback(),
        )
        .expect("Failed to create session")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub fn read(&self, path: &Path) -> Vec<u8> {
        fs::read(path).expect("Failed to read test file")
    }
}

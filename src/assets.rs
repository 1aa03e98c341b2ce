//! Asset loading with embedded fallbacks
//!
//! Two assets ship inside the binary: the default `config.yaml` and the
//! `reference_palette.json` used to snap image pixels.
//!
//! - If an env var is NOT set: use the embedded asset (no filesystem access)
//! - If `CONFIG_FILE` is set: use that file when it exists, else the embedded config
//! - If `REFERENCE_PALETTE_FILE` is set: use that file; a missing file is a read error
//!   so the caller can fall back to the built-in 12-color set

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const CONFIG_ASSET: &str = "config.yaml";
pub const REFERENCE_PALETTE_ASSET: &str = "reference_palette.json";

/// Embedded defaults
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "config.yaml"]
#[include = "reference_palette.json"]
struct EmbeddedAssets;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    ReferencePalette,
}

impl AssetCategory {
    pub fn asset_name(self) -> &'static str {
        match self {
            AssetCategory::Config => CONFIG_ASSET,
            AssetCategory::ReferencePalette => REFERENCE_PALETTE_ASSET,
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Where an asset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Embedded,
    External(PathBuf),
    /// Configured path does not exist
    Missing(PathBuf),
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External reference palette path (from REFERENCE_PALETTE_FILE env var)
    reference_palette_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, reference_palette_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            reference_palette_file,
        }
    }

    /// Create a loader from `CONFIG_FILE` and `REFERENCE_PALETTE_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            std::env::var("REFERENCE_PALETTE_FILE").ok().map(PathBuf::from),
        )
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        read_embedded(CONFIG_ASSET)
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the reference palette
    ///
    /// An explicitly configured path is never silently replaced by the
    /// embedded palette.
    pub fn read_reference_palette(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.reference_palette_file {
            tracing::trace!(path = %path.display(), "Loading reference palette from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        read_embedded(REFERENCE_PALETTE_ASSET)
    }

    pub fn config_source(&self) -> AssetSource {
        match self.config_file {
            Some(ref path) if path.exists() => AssetSource::External(path.clone()),
            Some(ref path) => AssetSource::Missing(path.clone()),
            None => AssetSource::Embedded,
        }
    }

    pub fn reference_palette_source(&self) -> AssetSource {
        match self.reference_palette_file {
            Some(ref path) if path.exists() => AssetSource::External(path.clone()),
            Some(ref path) => AssetSource::Missing(path.clone()),
            None => AssetSource::Embedded,
        }
    }

    fn target_path(&self, category: AssetCategory) -> PathBuf {
        let configured = match category {
            AssetCategory::Config => self.config_file.clone(),
            AssetCategory::ReferencePalette => self.reference_palette_file.clone(),
        };
        configured.unwrap_or_else(|| PathBuf::from(".").join(category.asset_name()))
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults in the working directory if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for &category in categories {
            let path = self.target_path(category);
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = read_embedded(category.asset_name())?;
            fs::write(&path, &*data)?;
            tracing::debug!(path = %path.display(), "Extracted embedded asset");
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut names: Vec<String> = EmbeddedAssets::iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }
}

fn read_embedded(name: &str) -> io::Result<Cow<'static, [u8]>> {
    EmbeddedAssets::get(name)
        .map(|f| {
            tracing::trace!(asset = name, "Loading from embedded assets");
            f.data
        })
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Embedded {name} not found"),
            )
        })
}

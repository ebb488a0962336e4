//! Settings loaded from `config.json`.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use peoplegrid_lib::table::TableOptions;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] peoplegrid_lib::Error),
}

/// Application settings. Missing fields take their defaults.
///
/// ```json
/// { "lengths": [200, 3], "page_size": 20, "initial_page_index": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Records per level of generated data.
    pub lengths: Vec<usize>,
    #[serde(flatten)]
    pub table: TableOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lengths: vec![10_000],
            table: TableOptions::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::parse(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.table.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

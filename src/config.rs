//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use crate::model::{BarMetrics, LaneOrder, TaskCategory};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub lane_order: LaneOrder,
    /// Category preselected in the create dialog.
    pub default_category: TaskCategory,
    pub metrics: BarMetrics,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Start with one sample task so the calendar is not empty.
    pub seed_sample_task: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            lane_order: LaneOrder::default(),
            default_category: TaskCategory::default(),
            metrics: BarMetrics::default(),
            log_filter: "warn".into(),
            seed_sample_task: true,
        }
    }
}

/// Reads and writes [`AppSettings`] as pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `settings.json` under the platform config dir, or the working
    /// directory when no home directory can be resolved.
    pub fn from_default_location() -> Self {
        let dir = directories::ProjectDirs::from("", "", "TaskPlanner")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<AppSettings, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AppSettings::default())
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        std::fs::create_dir_all(self.dir()).map_err(io_err)?;
        let json = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

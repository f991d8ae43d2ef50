use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shikiri_ipc::LayoutMode;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/shikiri.sock";
const DEFAULT_MAX_MONITORS: usize = 10;
const DEFAULT_MAX_WINDOWS: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_layout: LayoutMode,
    pub max_monitors: usize,
    pub max_windows: usize,
    pub socket_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_layout: LayoutMode::default(),
            max_monitors: DEFAULT_MAX_MONITORS,
            max_windows: DEFAULT_MAX_WINDOWS,
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
        }
    }
}

pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shikiri").join("config.json"))
}

impl Config {
    /// Loads `path` if given, otherwise the per-user config file. A missing
    /// per-user file means defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match config_file() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_monitors == 0 {
            bail!("max_monitors must be at least 1");
        }
        if self.max_windows == 0 {
            bail!("max_windows must be at least 1");
        }
        Ok(())
    }
}

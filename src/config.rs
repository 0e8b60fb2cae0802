use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional user configuration, read once at startup from
/// `~/.config/cadence/config.toml` (platform equivalent via ProjectDirs).
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Override for the storage file; defaults to the platform data dir.
    pub data_file: Option<PathBuf>,
    /// Open on the status board instead of the month grid.
    #[serde(default)]
    pub start_in_board: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj =
            ProjectDirs::from("com", "cadence", "cadence").context("no home directory found")?;
        Self::load_from(proj.config_dir().join("config.toml"))
    }

    /// A missing file is the default configuration; an unreadable or
    /// malformed one is an error the caller must surface, not swallow.
    fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg = toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }
}

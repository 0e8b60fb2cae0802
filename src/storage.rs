use crate::model::Event;
use anyhow::Result;
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the single persisted JSON document.
pub const STORE_FILE: &str = "tasks.json";

/// On-disk home of the event collection: one JSON array in the data dir.
pub struct Storage {
    path: Option<PathBuf>,
}

impl Storage {
    /// Resolve the storage file. Order: explicit override (config), then the
    /// test isolation env var, then the platform data dir.
    pub fn open(override_path: Option<PathBuf>) -> Self {
        if let Some(path) = override_path {
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            return Self { path: Some(path) };
        }
        if let Ok(test_dir) = env::var("CADENCE_TEST_DIR") {
            let dir = PathBuf::from(test_dir);
            if !dir.exists() {
                let _ = fs::create_dir_all(&dir);
            }
            return Self {
                path: Some(dir.join(STORE_FILE)),
            };
        }
        if let Some(proj) = ProjectDirs::from("com", "cadence", "cadence") {
            let data_dir = proj.data_dir();
            if !data_dir.exists() {
                let _ = fs::create_dir_all(data_dir);
            }
            return Self {
                path: Some(data_dir.join(STORE_FILE)),
            };
        }
        Self { path: None }
    }

    /// Atomic write: write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    pub fn save(&self, events: &[Event]) -> Result<()> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(events)?;
            Self::atomic_write(path, json)?;
        }
        Ok(())
    }

    pub fn load(&self) -> Vec<Event> {
        if let Some(path) = &self.path
            && path.exists()
        {
            // A missing, empty or corrupt file means "no prior data";
            // never an error the user sees.
            if let Ok(json) = fs::read_to_string(path)
                && let Ok(events) = serde_json::from_str::<Vec<Event>>(&json)
            {
                return events;
            }
        }
        vec![]
    }
}

//! Location of worklog's own files.
//!
//! worklog keeps a single file of its own, `config.json`. Reports go to the
//! configured output directory instead. The directory is resolved per
//! platform:
//!
//! | Platform | Directory                                   |
//! |----------|---------------------------------------------|
//! | Windows  | `%LOCALAPPDATA%\worklog`                    |
//! | macOS    | `~/Library/Application Support/worklog`     |
//! | other    | `~/.local/share/worklog`                    |
//!
//! `WORKLOG_HOME` replaces the whole path, which keeps separate
//! configurations (or test runs) apart.

use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "worklog";

/// Environment variable naming the data directory explicitly.
pub const HOME_ENV: &str = "WORKLOG_HOME";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        if let Some(home) = var(HOME_ENV).ok().filter(|home| !home.trim().is_empty()) {
            return Self { base_path: PathBuf::from(home) };
        }

        let platform_dir = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };

        Self {
            base_path: Path::new(&platform_dir).join(APP_NAME),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory. The directory is
    /// created on first use so callers can write straight away.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination of a finished report.
#[derive(Debug, Clone)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory when needed and writes the report in
    /// one go, replacing an older file of the same name.
    pub fn write(&self, content: &str) -> io::Result<&Path> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, content)?;
        Ok(&self.path)
    }
}

use super::SnapshotStore;
use crate::error::{CvfsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileSnapshotStore {
    root: PathBuf,
    ext: String,
}

impl FileSnapshotStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ext: ".cvfs".to_string(),
        }
    }

    /// Sets the extension added to bare names. A leading dot is optional.
    pub fn with_ext(mut self, ext: &str) -> Self {
        self.ext = format!(".{}", ext.trim_start_matches('.'));
        self
    }

    /// Absolute names are used as-is; relative ones live under the root.
    /// Names without an extension get the configured one.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let mut path = PathBuf::from(name);
        if path.extension().is_none() {
            path = PathBuf::from(format!("{}{}", name, self.ext));
        }
        if path.is_absolute() {
            path
        } else {
            self.root.join(path)
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CvfsError::Io)?;
        }
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }
        fs::write(&path, bytes).map_err(CvfsError::Io)?;
        tracing::debug!(path = %path.display(), "saved snapshot");
        Ok(path.display().to_string())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name);
        if !path.exists() {
            return Err(CvfsError::NotFound(format!("Snapshot {}", path.display())));
        }
        let bytes = fs::read(&path).map_err(CvfsError::Io)?;
        tracing::debug!(path = %path.display(), "loaded snapshot");
        Ok(bytes)
    }
}

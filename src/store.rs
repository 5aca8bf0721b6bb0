//! The content-addressed object store: a fan-out directory tree under
//! `<repo>/objects/` holding write-once, zlib-compressed framed objects.

use crate::error::{DzhigitError, Result};
use crate::hash::Hash;
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};

/// Rooted at `<repo>/objects/`. See spec §4.3: the fan-out by first hex
/// character bounds per-directory entry count.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `compressed` under `hash`'s fan-out path. Returns
    /// [`DzhigitError::AlreadyExists`] — not an I/O failure — if the file is
    /// already there; by content-addressing the existing bytes are already
    /// correct.
    pub fn save(&self, hash: &Hash, compressed: &[u8]) -> Result<()> {
        let dir = self.root.join(hash.dir());
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            set_dir_permissions(&dir)?;
            trace!("created fan-out directory {}", dir.display());
        }
        let file = dir.join(hash.name());
        if file.exists() {
            debug!("object {hash} already stored");
            return Err(DzhigitError::AlreadyExists(*hash));
        }
        fs::write(&file, compressed)?;
        debug!("stored object {hash} at {}", file.display());
        Ok(())
    }

    pub fn read(&self, hash: &Hash) -> Result<Vec<u8>> {
        let file = hash.path(&self.root);
        if !file.exists() {
            return Err(DzhigitError::NotFound(format!("object {hash}")));
        }
        Ok(fs::read(file)?)
    }

    pub fn exists(&self, hash: &Hash) -> bool {
        hash.path(&self.root).exists()
    }
}

#[cfg(unix)]
fn set_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

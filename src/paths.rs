//! All the on-disk paths a repository is made of (spec §6).

use crate::error::{DzhigitError, Result};
use std::path::{Path, PathBuf};

pub const REPO_DIR_NAME: &str = ".dzhigit";

/// `<repo>/` = `<CWD>/.dzhigit` unless overridden by `repo_root`; no
/// parent-directory search is performed (spec §6 — CWD determines the
/// repo, full stop).
#[derive(Debug, Clone)]
pub struct RepoPaths {
    pub working_dir: PathBuf,
    pub repo_dir: PathBuf,
}

impl RepoPaths {
    pub fn discover(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let repo_dir = working_dir.join(REPO_DIR_NAME);
        Self {
            working_dir,
            repo_dir,
        }
    }

    pub fn exists(&self) -> bool {
        self.repo_dir.exists()
    }

    /// Resolves the repository rooted at the current directory, failing if
    /// `init` has not been run there.
    pub fn require_current() -> Result<Self> {
        let paths = Self::discover(std::env::current_dir()?);
        if !paths.exists() {
            return Err(DzhigitError::NotFound("repository".to_string()));
        }
        Ok(paths)
    }

    pub fn head_path(&self) -> PathBuf {
        self.repo_dir.join("HEAD")
    }

    pub fn config_path(&self) -> PathBuf {
        self.repo_dir.join("config.json")
    }

    pub fn description_path(&self) -> PathBuf {
        self.repo_dir.join("Description")
    }

    pub fn index_path(&self) -> PathBuf {
        self.repo_dir.join("index")
    }

    pub fn objects_path(&self) -> PathBuf {
        self.repo_dir.join("objects")
    }

    pub fn refs_heads_path(&self) -> PathBuf {
        self.repo_dir.join("refs").join("heads")
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn discover_joins_dot_dzhigit() {
        let paths = RepoPaths::discover("/tmp/repo");
        assert_eq!(paths.repo_dir, Path::new("/tmp/repo/.dzhigit"));
        assert_eq!(paths.objects_path(), Path::new("/tmp/repo/.dzhigit/objects"));
    }
}

//! Branch files under `refs/heads/` and the symbolic `HEAD` pointer.

use crate::commit::CommitBuilder;
use crate::error::{DzhigitError, Result};
use crate::hash::{Hash, ObjectType};
use std::fs;
use std::path::{Path, PathBuf};

/// HEAD as a sum type (Design Note "Symbolic HEAD"): this system never
/// produces `Detached`, but the representation accommodates it without a
/// future schema change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Attached(String),
    Detached(Hash),
}

pub struct RefStore {
    repo_root: PathBuf,
}

impl RefStore {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn branch_path(&self, branch: &str) -> PathBuf {
        self.repo_root.join("refs").join("heads").join(branch)
    }

    fn head_path(&self) -> PathBuf {
        self.repo_root.join("HEAD")
    }

    pub fn branch_exists(&self, branch: &str) -> bool {
        self.branch_path(branch).exists()
    }

    pub fn read_branch(&self, branch: &str) -> Result<Hash> {
        let path = self.branch_path(branch);
        if !path.exists() {
            return Err(DzhigitError::BranchNotFound(branch.to_string()));
        }
        Hash::parse(fs::read_to_string(path)?.trim())
    }

    /// Requires `commit_hash` to name a commit object, then creates or
    /// truncates `refs/heads/<branch>` with its text.
    pub fn update_ref(
        &self,
        branch: &str,
        commit_hash: Hash,
        commits: &CommitBuilder<'_>,
    ) -> Result<()> {
        let found = commits.type_of(&commit_hash)?;
        if found != ObjectType::Commit {
            return Err(DzhigitError::WrongType {
                expected: ObjectType::Commit.to_string(),
                found: found.to_string(),
            });
        }
        let path = self.branch_path(branch);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, commit_hash.to_string())?;
        Ok(())
    }

    /// Authoritative: HEAD is always read as plain text, never fed through
    /// the object codec (spec Open Question 3 rejects that path as a bug).
    pub fn read_head(&self) -> Result<Head> {
        let path = self.head_path();
        if !path.exists() {
            return Err(DzhigitError::NoHead);
        }
        let content = fs::read_to_string(path)?;
        let content = content.trim();
        let branch = content
            .strip_prefix("refs: refs/heads/")
            .ok_or(DzhigitError::NoHead)?;
        if branch.is_empty() {
            return Err(DzhigitError::NoHead);
        }
        Ok(Head::Attached(branch.to_string()))
    }

    pub fn write_head(&self, branch: &str) -> Result<()> {
        fs::write(self.head_path(), format!("refs: refs/heads/{branch}"))?;
        Ok(())
    }
}

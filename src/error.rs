//! Tagged error taxonomy for the object-graph core.
//!
//! Every fallible operation in this crate returns [`DzhigitError`] rather than
//! a boxed `dyn Error` so callers can match on the specific kind (e.g. the
//! `TreeBuilder` treats [`DzhigitError::AlreadyExists`] as success) instead of
//! comparing message strings.

use crate::hash::Hash;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DzhigitError {
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("malformed object: {0}")]
    BadFormat(String),

    #[error("object or reference not found: {0}")]
    NotFound(String),

    #[error("object already exists: {0}")]
    AlreadyExists(Hash),

    #[error("wrong object type: expected {expected}, found {found}")]
    WrongType { expected: String, found: String },

    #[error("malformed index entry: {0}")]
    BadIndex(String),

    #[error("working-tree file missing: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("HEAD is missing or malformed")]
    NoHead,

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("malformed config.json: {0}")]
    Config(String),

    #[error("repository already exists")]
    RepoExists,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DzhigitError>;

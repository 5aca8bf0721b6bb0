//! The 40-hex SHA-1 identity of a stored object, and the closed set of
//! object kinds the store recognizes.

use crate::error::{DzhigitError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A validated, lowercase-hex SHA-1 digest identifying a stored object.
///
/// Constructed either by [`Hash::parse`] (validating external input) or by
/// [`crate::codec::ObjectCodec::serialize`] (computing a fresh identity) —
/// never by formatting an arbitrary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; 20]);

impl Hash {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != 40 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DzhigitError::InvalidHash(s.to_string()));
        }
        let decoded = hex::decode(s).map_err(|_| DzhigitError::InvalidHash(s.to_string()))?;
        let bytes: [u8; 20] = decoded
            .try_into()
            .map_err(|_| DzhigitError::InvalidHash(s.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// First 2 hex characters — the fan-out directory name.
    pub fn dir(&self) -> String {
        hex::encode(&self.0[..1])
    }

    /// Remaining 38 hex characters — the filename inside the fan-out dir.
    pub fn name(&self) -> String {
        hex::encode(&self.0[1..])
    }

    pub fn path(&self, obj_root: &Path) -> PathBuf {
        obj_root.join(self.dir()).join(self.name())
    }

    /// First 8 hex characters, used by `log` for compact display.
    pub fn short(&self) -> String {
        self.to_string()[..8].to_string()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = DzhigitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The closed set of object kinds the store recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = DzhigitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(DzhigitError::BadFormat(format!(
                "unknown object type '{other}'"
            ))),
        }
    }
}

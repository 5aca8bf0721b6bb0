//! `<repo>/config.json` — the default author identity. Read-only to the
//! core; the CLI is the only writer (at `init` time).

use crate::commit::Author;
use crate::error::{DzhigitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    pub email: String,
}

impl Config {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DzhigitError::Config(e.to_string()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DzhigitError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn as_author(&self) -> Author {
        Author {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        config.write(&path).unwrap();
        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn read_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::read(&path), Err(DzhigitError::Config(_))));
    }
}

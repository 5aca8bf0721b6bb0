//! The staging area: a line-oriented file mapping working-tree paths to
//! blob hashes, rewritten in full on each update-or-append.

use crate::error::{DzhigitError, Result};
use crate::hash::Hash;
use crate::store::ObjectStore;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// File mode recorded for a staged path. Only these two values are
/// meaningful — file-mode fidelity beyond them is a Non-goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    File,
    Executable,
}

impl Mode {
    pub fn as_octal(&self) -> &'static str {
        match self {
            Mode::File => "100644",
            Mode::Executable => "100755",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "100644" => Ok(Mode::File),
            "100755" => Ok(Mode::Executable),
            other => Err(DzhigitError::BadIndex(format!("unknown mode '{other}'"))),
        }
    }
}

/// A single staging record: `<mode> <ctime> <mtime> <hash>\t<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: Mode,
    pub ctime: u64,
    pub mtime: u64,
    pub hash: Hash,
    pub path: String,
}

impl IndexEntry {
    /// Builds an entry for `path`, verifying the working-tree file exists
    /// and the blob is already in the store, and reading the current
    /// ctime/mtime off the filesystem (whole seconds).
    pub fn new(path: &str, mode: Mode, hash: Hash, store: &ObjectStore) -> Result<Self> {
        let fs_path = Path::new(path);
        if !fs_path.exists() {
            return Err(DzhigitError::FileMissing(fs_path.to_path_buf()));
        }
        if !store.exists(&hash) {
            return Err(DzhigitError::NotFound(format!("blob {hash}")));
        }
        let metadata = fs::metadata(fs_path)?;
        let mtime = to_unix_seconds(metadata.modified()?);
        let ctime = file_ctime(&metadata).unwrap_or(mtime);

        Ok(Self {
            mode,
            ctime,
            mtime,
            hash,
            path: path.to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {}\t{}\n",
            self.mode.as_octal(),
            self.ctime,
            self.mtime,
            self.hash,
            self.path
        )
    }

    pub fn parse_line(line: &str) -> Result<Self> {
        let (prefix, path) = line
            .trim_end_matches('\n')
            .split_once('\t')
            .ok_or_else(|| DzhigitError::BadIndex(format!("missing path separator in '{line}'")))?;
        let fields: Vec<&str> = prefix.split(' ').collect();
        if fields.len() != 4 {
            return Err(DzhigitError::BadIndex(format!(
                "expected 4 fields before the path, got {}",
                fields.len()
            )));
        }
        if path.is_empty() {
            return Err(DzhigitError::BadIndex("empty path".into()));
        }
        if path.split('/').any(|component| component.is_empty()) {
            return Err(DzhigitError::BadIndex(format!(
                "path '{path}' has an empty component"
            )));
        }
        let mode = Mode::parse(fields[0])?;
        let ctime = fields[1]
            .parse()
            .map_err(|_| DzhigitError::BadIndex(format!("invalid ctime '{}'", fields[1])))?;
        let mtime = fields[2]
            .parse()
            .map_err(|_| DzhigitError::BadIndex(format!("invalid mtime '{}'", fields[2])))?;
        let hash = Hash::parse(fields[3])?;

        Ok(Self {
            mode,
            ctime,
            mtime,
            hash,
            path: path.to_string(),
        })
    }

    /// Path split into forward-slash components, used by [`crate::tree`].
    pub fn components(&self) -> Vec<&str> {
        self.path.split('/').collect()
    }
}

/// Reads every record currently staged.
pub fn read(index_path: &Path) -> Result<Vec<IndexEntry>> {
    if !index_path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(File::open(index_path)?);
    reader
        .lines()
        .filter(|l| l.as_ref().map(|s| !s.is_empty()).unwrap_or(true))
        .map(|line| IndexEntry::parse_line(&line?))
        .collect()
}

/// Rewrites the index, replacing any existing line for `entry.path` or
/// appending it if no line had that path.
pub fn upsert(index_path: &Path, entry: &IndexEntry) -> Result<()> {
    let mut entries = read(index_path)?;
    match entries.iter_mut().find(|e| e.path == entry.path) {
        Some(existing) => *existing = entry.clone(),
        None => entries.push(entry.clone()),
    }
    write_all(index_path, &entries)
}

fn write_all(index_path: &Path, entries: &[IndexEntry]) -> Result<()> {
    let mut file = File::create(index_path)?;
    for entry in entries {
        file.write_all(entry.to_line().as_bytes())?;
    }
    Ok(())
}

fn to_unix_seconds(t: std::time::SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

#[cfg(unix)]
fn file_ctime(metadata: &std::fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ctime().max(0) as u64)
}

#[cfg(not(unix))]
fn file_ctime(_metadata: &std::fs::Metadata) -> Option<u64> {
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_line_round_trips_to_line() {
        let line = "100644 10 20 3b0af1dd47d543b2166440b83bbf0ed0235173d8\ta/b.txt\n";
        let entry = IndexEntry::parse_line(line).unwrap();
        assert_eq!(entry.to_line(), line);
    }

    #[test]
    fn parse_line_rejects_missing_tab() {
        assert!(IndexEntry::parse_line("100644 10 20 hash no-tab-here").is_err());
    }

    #[test]
    fn parse_line_rejects_empty_intermediate_component() {
        let line = "100644 10 20 3b0af1dd47d543b2166440b83bbf0ed0235173d8\ta//b\n";
        assert!(matches!(
            IndexEntry::parse_line(line),
            Err(DzhigitError::BadIndex(_))
        ));
    }

    #[test]
    fn upsert_keeps_at_most_one_line_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index");

        let h1 = Hash::parse("3b0af1dd47d543b2166440b83bbf0ed0235173d8").unwrap();
        let h2 = Hash::parse("0000000000000000000000000000000000000a").unwrap();

        let e1 = IndexEntry {
            mode: Mode::File,
            ctime: 1,
            mtime: 1,
            hash: h1,
            path: "a/x".to_string(),
        };
        let e2 = IndexEntry {
            hash: h2,
            ..e1.clone()
        };

        upsert(&index_path, &e1).unwrap();
        upsert(&index_path, &e2).unwrap();

        let entries = read(&index_path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hash, h2);
    }

    #[test]
    fn upsert_appends_when_path_absent() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index");
        let hash = Hash::parse("3b0af1dd47d543b2166440b83bbf0ed0235173d8").unwrap();

        upsert(
            &index_path,
            &IndexEntry {
                mode: Mode::File,
                ctime: 1,
                mtime: 1,
                hash,
                path: "a".to_string(),
            },
        )
        .unwrap();
        upsert(
            &index_path,
            &IndexEntry {
                mode: Mode::File,
                ctime: 2,
                mtime: 2,
                hash,
                path: "b".to_string(),
            },
        )
        .unwrap();

        let entries = read(&index_path).unwrap();
        assert_eq!(entries.len(), 2);
    }
}

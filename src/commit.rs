//! Commit objects: a root tree hash, optional parent, author/committer
//! identity and time, and a free-text message.

use crate::codec::ObjectCodec;
use crate::error::{DzhigitError, Result};
use crate::hash::{Hash, ObjectType};
use crate::store::ObjectStore;
use chrono::{DateTime, Local};

/// Author/committer identity, read from `config.json` at the CLI boundary
/// and threaded into [`CommitBuilder::commit_tree`] (Design Note "Time and
/// identity injection" — the builder itself never reads config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Parsed form of a stored commit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: Hash,
    pub parent: Option<Hash>,
    pub author: Author,
    pub time: DateTime<Local>,
    pub message: String,
}

/// Parameters for creating a new commit object.
pub struct NewCommit<'a> {
    pub tree: Hash,
    pub parent: Option<Hash>,
    pub author: &'a Author,
    pub message: &'a str,
    pub time: DateTime<Local>,
}

pub struct CommitBuilder<'a> {
    codec: ObjectCodec,
    store: &'a ObjectStore,
}

impl<'a> CommitBuilder<'a> {
    pub fn new(store: &'a ObjectStore) -> Self {
        Self {
            codec: ObjectCodec::new(),
            store,
        }
    }

    /// Validates `tree` is a tree object and `parent` (if given) is a
    /// commit, then emits and saves the commit object.
    pub fn commit_tree(&self, params: NewCommit<'_>) -> Result<Hash> {
        self.require_type(&params.tree, ObjectType::Tree)?;
        if let Some(parent) = params.parent {
            self.require_type(&parent, ObjectType::Commit)?;
        }

        let payload = render(&params);
        let (hash, compressed) = self.codec.serialize(payload.as_bytes(), ObjectType::Commit)?;
        match self.store.save(&hash, &compressed) {
            Ok(()) | Err(DzhigitError::AlreadyExists(_)) => Ok(hash),
            Err(e) => Err(e),
        }
    }

    pub fn type_of(&self, hash: &Hash) -> Result<ObjectType> {
        let compressed = self.store.read(hash)?;
        let (object_type, _) = self.codec.deserialize(&compressed)?;
        Ok(object_type)
    }

    fn require_type(&self, hash: &Hash, expected: ObjectType) -> Result<()> {
        let found = self.type_of(hash)?;
        if found != expected {
            return Err(DzhigitError::WrongType {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    pub fn read(&self, hash: &Hash) -> Result<Commit> {
        let compressed = self.store.read(hash)?;
        let (object_type, payload) = self.codec.deserialize(&compressed)?;
        if object_type != ObjectType::Commit {
            return Err(DzhigitError::WrongType {
                expected: ObjectType::Commit.to_string(),
                found: object_type.to_string(),
            });
        }
        parse_commit(&payload)
    }
}

/// `tree <hash>\n[parent <hash>\n]author <name> <email> <unix> <zone>\n
/// comitter <name> <email> <unix> <zone>\n\n<message>\n`.
///
/// The `comitter` misspelling and the bare (no angle-bracket) email field
/// are pinned byte-for-byte — see spec Open Questions 1 and 2.
fn render(params: &NewCommit<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("tree {}\n", params.tree));
    if let Some(parent) = params.parent {
        out.push_str(&format!("parent {parent}\n"));
    }
    let unix_seconds = params.time.timestamp();
    let zone = params.time.format("%Z").to_string();
    out.push_str(&format!(
        "author {} {} {} {}\n",
        params.author.name, params.author.email, unix_seconds, zone
    ));
    out.push_str(&format!(
        "comitter {} {} {} {}\n",
        params.author.name, params.author.email, unix_seconds, zone
    ));
    out.push('\n');
    out.push_str(params.message);
    out.push('\n');
    out
}

fn parse_commit(payload: &[u8]) -> Result<Commit> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| DzhigitError::BadFormat(e.to_string()))?;
    let lines: Vec<&str> = text.split('\n').collect();

    let tree_line = lines
        .first()
        .ok_or_else(|| DzhigitError::BadFormat("empty commit payload".into()))?;
    let tree = Hash::parse(
        tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| DzhigitError::BadFormat("missing tree header".into()))?,
    )?;

    let mut next = 1;
    let parent = if lines.get(next).map(|l| l.starts_with("parent ")) == Some(true) {
        let hash = Hash::parse(lines[next].strip_prefix("parent ").unwrap())?;
        next += 1;
        Some(hash)
    } else {
        None
    };

    let author_line = lines
        .get(next)
        .ok_or_else(|| DzhigitError::BadFormat("missing author line".into()))?;
    let tokens: Vec<&str> = author_line.split(' ').collect();
    if tokens.len() < 5 || tokens[0] != "author" {
        return Err(DzhigitError::BadFormat(format!(
            "malformed author line '{author_line}'"
        )));
    }
    let author = Author {
        name: tokens[1].to_string(),
        email: tokens[2].to_string(),
    };
    let unix_seconds: i64 = tokens[3]
        .parse()
        .map_err(|_| DzhigitError::BadFormat(format!("invalid author time '{}'", tokens[3])))?;
    let time = DateTime::from_timestamp(unix_seconds, 0)
        .ok_or_else(|| DzhigitError::BadFormat("invalid author timestamp".into()))?
        .with_timezone(&Local);

    // skip committer line and the blank line.
    next += 3;
    let message = lines
        .get(next..)
        .unwrap_or(&[])
        .join("\n")
        .trim_end_matches('\n')
        .to_string();

    Ok(Commit {
        tree,
        parent,
        author,
        time,
        message,
    })
}

//! Walks the parent chain from a branch tip, yielding one summary per
//! visited commit.

use crate::commit::{Author, CommitBuilder};
use crate::error::Result;
use crate::hash::Hash;
use crate::refs::{Head, RefStore};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: Hash,
    pub short_tree_hash: String,
    pub message: String,
    pub author: Author,
    pub time: DateTime<Local>,
}

/// Reads HEAD, then its branch, then walks the parent chain until a commit
/// with no parent line is reached. Finite, not restartable mid-walk — a
/// caller that wants to resume starts over from HEAD.
pub fn log(refs: &RefStore, commits: &CommitBuilder<'_>) -> Result<Vec<CommitSummary>> {
    let branch = match refs.read_head()? {
        Head::Attached(branch) => branch,
        Head::Detached(_) => return Err(crate::error::DzhigitError::NoHead),
    };
    let mut current = Some(refs.read_branch(&branch)?);
    let mut summaries = Vec::new();

    while let Some(hash) = current {
        let commit = commits.read(&hash)?;
        summaries.push(CommitSummary {
            hash,
            short_tree_hash: commit.tree.short(),
            message: commit.message,
            author: commit.author,
            time: commit.time,
        });
        current = commit.parent;
    }

    Ok(summaries)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commit::NewCommit;
    use crate::hash::ObjectType;
    use crate::store::ObjectStore;
    use crate::codec::ObjectCodec;

    #[test]
    fn log_after_n_commits_yields_n_entries_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));
        let codec = ObjectCodec::new();
        let (tree_hash, tree_compressed) = codec.serialize(b"tree body", ObjectType::Tree).unwrap();
        store.save(&tree_hash, &tree_compressed).unwrap();

        let commits = CommitBuilder::new(&store);
        let refs = RefStore::new(dir.path());
        let author = Author {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };

        let mut parent = None;
        for i in 0..3 {
            let hash = commits
                .commit_tree(NewCommit {
                    tree: tree_hash,
                    parent,
                    author: &author,
                    message: &format!("commit {i}"),
                    time: Local::now(),
                })
                .unwrap();
            refs.update_ref("main", hash, &commits).unwrap();
            parent = Some(hash);
        }
        refs.write_head("main").unwrap();

        let summaries = log(&refs, &commits).unwrap();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].message, "commit 2");
        assert_eq!(summaries[2].message, "commit 0");
    }
}

//! Materializes a branch's commit tree into the working directory and
//! repoints HEAD at it.

use crate::codec::ObjectCodec;
use crate::commit::CommitBuilder;
use crate::error::{DzhigitError, Result};
use crate::hash::{Hash, ObjectType};
use crate::refs::RefStore;
use crate::store::ObjectStore;
use log::debug;
use std::fs;
use std::path::Path;

pub struct Checkout<'a> {
    codec: ObjectCodec,
    store: &'a ObjectStore,
    commits: CommitBuilder<'a>,
    refs: &'a RefStore,
    working_dir: &'a Path,
}

impl<'a> Checkout<'a> {
    pub fn new(store: &'a ObjectStore, refs: &'a RefStore, working_dir: &'a Path) -> Self {
        Self {
            codec: ObjectCodec::new(),
            store,
            commits: CommitBuilder::new(store),
            refs,
            working_dir,
        }
    }

    /// Requires `branch` to exist, reads its commit and root tree, writes
    /// every blob under `working_dir` (mode 0755 regardless of recorded
    /// mode — spec Open Question 5), then repoints HEAD. Does not prune
    /// files absent from the tree but present in the working tree (Design
    /// Note "Working-tree mutations").
    pub fn checkout(&self, branch: &str) -> Result<()> {
        if !self.refs.branch_exists(branch) {
            return Err(DzhigitError::BranchNotFound(branch.to_string()));
        }
        let commit_hash = self.refs.read_branch(branch)?;
        let commit = self.commits.read(&commit_hash)?;

        self.materialize_tree(&commit.tree, self.working_dir)?;
        self.refs.write_head(branch)?;
        Ok(())
    }

    fn materialize_tree(&self, tree_hash: &Hash, dest: &Path) -> Result<()> {
        let compressed = self.store.read(tree_hash)?;
        let (object_type, payload) = self.codec.deserialize(&compressed)?;
        if object_type != ObjectType::Tree {
            return Err(DzhigitError::WrongType {
                expected: ObjectType::Tree.to_string(),
                found: object_type.to_string(),
            });
        }
        let text = std::str::from_utf8(&payload).map_err(|e| DzhigitError::BadFormat(e.to_string()))?;

        fs::create_dir_all(dest)?;

        let mut subtrees = Vec::new();
        for line in text.lines() {
            let (header, name) = line
                .split_once('\t')
                .ok_or_else(|| DzhigitError::BadFormat(format!("malformed tree line '{line}'")))?;
            let mut fields = header.split(' ');
            let _mode = fields.next();
            let kind = fields
                .next()
                .ok_or_else(|| DzhigitError::BadFormat(format!("malformed tree line '{line}'")))?;
            let hash_str = fields
                .next()
                .ok_or_else(|| DzhigitError::BadFormat(format!("malformed tree line '{line}'")))?;
            let child_hash = Hash::parse(hash_str)?;

            match kind {
                "blob" => self.write_blob(&child_hash, &dest.join(name))?,
                "tree" => subtrees.push((child_hash, dest.join(name))),
                other => {
                    return Err(DzhigitError::BadFormat(format!("unknown tree entry kind '{other}'")))
                }
            }
        }

        for (child_hash, child_dest) in subtrees {
            self.materialize_tree(&child_hash, &child_dest)?;
        }

        Ok(())
    }

    fn write_blob(&self, hash: &Hash, dest: &Path) -> Result<()> {
        let compressed = self.store.read(hash)?;
        let (object_type, payload) = self.codec.deserialize(&compressed)?;
        if object_type != ObjectType::Blob {
            return Err(DzhigitError::WrongType {
                expected: ObjectType::Blob.to_string(),
                found: object_type.to_string(),
            });
        }
        fs::write(dest, &payload)?;
        set_executable(dest)?;
        debug!("checked out {}", dest.display());
        Ok(())
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commit::{Author, NewCommit};
    use crate::index::{IndexEntry, Mode};
    use crate::tree::TreeBuilder;
    use chrono::Local;
    use std::fs;

    #[test]
    fn checkout_reproduces_tree_contents() {
        let work = tempfile::tempdir().unwrap();
        fs::create_dir_all(work.path().join("a")).unwrap();
        fs::write(work.path().join("a/b.txt"), b"b-content").unwrap();
        fs::write(work.path().join("a/c.txt"), b"c-content").unwrap();
        fs::write(work.path().join("d.txt"), b"d-content").unwrap();

        let repo = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(repo.path().join("objects"));
        let refs = RefStore::new(repo.path());

        let codec = ObjectCodec::new();
        let mut entries = Vec::new();
        for path in ["a/b.txt", "a/c.txt", "d.txt"] {
            let content = fs::read(work.path().join(path)).unwrap();
            let (hash, compressed) = codec.serialize(&content, ObjectType::Blob).unwrap();
            store.save(&hash, &compressed).unwrap();
            entries.push(IndexEntry {
                mode: Mode::File,
                ctime: 0,
                mtime: 0,
                hash,
                path: path.to_string(),
            });
        }

        let builder = TreeBuilder::new(&store);
        let root_tree = builder.build(&entries).unwrap().unwrap();

        let commits = CommitBuilder::new(&store);
        let commit_hash = commits
            .commit_tree(NewCommit {
                tree: root_tree,
                parent: None,
                author: &Author {
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                },
                message: "initial",
                time: Local::now(),
            })
            .unwrap();
        refs.update_ref("main", commit_hash, &commits).unwrap();

        let checkout_dest = tempfile::tempdir().unwrap();
        let checkout = Checkout::new(&store, &refs, checkout_dest.path());
        checkout.checkout("main").unwrap();

        assert_eq!(
            fs::read(checkout_dest.path().join("a/b.txt")).unwrap(),
            b"b-content"
        );
        assert_eq!(
            fs::read(checkout_dest.path().join("a/c.txt")).unwrap(),
            b"c-content"
        );
        assert_eq!(
            fs::read(checkout_dest.path().join("d.txt")).unwrap(),
            b"d-content"
        );
        assert_eq!(refs.read_head().unwrap(), crate::refs::Head::Attached("main".into()));
    }

    #[test]
    fn checkout_of_missing_branch_fails() {
        let repo = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(repo.path().join("objects"));
        let refs = RefStore::new(repo.path());
        let dest = tempfile::tempdir().unwrap();
        let checkout = Checkout::new(&store, &refs, dest.path());
        assert!(matches!(
            checkout.checkout("nope"),
            Err(DzhigitError::BranchNotFound(_))
        ));
    }
}

//! Folds the flat, path-keyed index into a recursive DAG of tree objects.

use crate::codec::ObjectCodec;
use crate::error::{DzhigitError, Result};
use crate::hash::{Hash, ObjectType};
use crate::index::IndexEntry;
use crate::store::ObjectStore;
use log::debug;
use std::collections::HashMap;

/// Builds the root tree object (and every inner tree, as a side effect of
/// saving to `store`) from the current index contents.
///
/// Returns `None` for an empty index — callers must refuse to commit in
/// that case (spec §4.5 "empty index → no root tree").
///
/// Blobs are expected to already be in `store` (the index only accepts an
/// entry once its blob has been staged via `hash-object -w`), so this
/// builder only ever reads blob hashes, never working-tree bytes.
pub struct TreeBuilder<'a> {
    codec: ObjectCodec,
    store: &'a ObjectStore,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(store: &'a ObjectStore) -> Self {
        Self {
            codec: ObjectCodec::new(),
            store,
        }
    }

    pub fn build(&self, entries: &[IndexEntry]) -> Result<Option<Hash>> {
        if entries.is_empty() {
            return Ok(None);
        }
        self.build_level(entries, 0).map(Some)
    }

    /// `depth` is the 0-based index into `IndexEntry::components()` that
    /// names this level (spec's 1-based `L` is `depth + 1`).
    fn build_level(&self, entries: &[IndexEntry], depth: usize) -> Result<Hash> {
        let mut lines = Vec::new();

        let mut groups: HashMap<&str, Vec<&IndexEntry>> = HashMap::new();
        for entry in entries {
            let components = entry.components();
            if components.len() == depth + 1 {
                lines.push(format!(
                    "{} blob {}\t{}\n",
                    entry.mode.as_octal(),
                    entry.hash,
                    components[depth]
                ));
            } else if components.len() > depth + 1 {
                groups.entry(components[depth]).or_default().push(entry);
            }
            // components.len() <= depth is unreachable: a path can't run out
            // of components before the level that first counted it.
        }

        for (name, group) in &groups {
            let owned: Vec<IndexEntry> = group.iter().map(|e| (*e).clone()).collect();
            let child_hash = self.build_level(&owned, depth + 1)?;
            lines.push(format!("040000 tree {child_hash}\t{name}\n"));
        }

        let payload = lines.concat();
        let (hash, compressed) = self.codec.serialize(payload.as_bytes(), ObjectType::Tree)?;
        match self.store.save(&hash, &compressed) {
            Ok(()) => {
                debug!("wrote tree {hash}");
                Ok(hash)
            }
            Err(DzhigitError::AlreadyExists(existing)) => Ok(existing),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::Mode;

    fn entry(path: &str, content: &[u8], codec: &ObjectCodec, store: &ObjectStore) -> IndexEntry {
        let (hash, compressed) = codec.serialize(content, ObjectType::Blob).unwrap();
        match store.save(&hash, &compressed) {
            Ok(()) | Err(DzhigitError::AlreadyExists(_)) => {}
            Err(e) => panic!("{e}"),
        }
        IndexEntry {
            mode: Mode::File,
            ctime: 0,
            mtime: 0,
            hash,
            path: path.to_string(),
        }
    }

    #[test]
    fn empty_index_yields_no_root_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        let builder = TreeBuilder::new(&store);
        assert!(builder.build(&[]).unwrap().is_none());
    }

    #[test]
    fn nested_paths_produce_a_readable_tree_and_subtree() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        let codec = ObjectCodec::new();
        let builder = TreeBuilder::new(&store);

        let entries = vec![
            entry("a/b", b"b content", &codec, &store),
            entry("c", b"c content", &codec, &store),
        ];

        let root_hash = builder.build(&entries).unwrap().unwrap();
        let (object_type, payload) = codec.deserialize(&store.read(&root_hash).unwrap()).unwrap();
        assert_eq!(object_type, ObjectType::Tree);
        let text = String::from_utf8(payload).unwrap();

        assert!(text.lines().any(|l| l.contains("blob") && l.ends_with("\tc")));
        let tree_line = text
            .lines()
            .find(|l| l.contains("tree") && l.ends_with("\ta"))
            .expect("expected a subtree line for 'a'");
        let subtree_hash_str = tree_line.split(' ').nth(2).unwrap().split('\t').next().unwrap();
        let subtree_hash = Hash::parse(subtree_hash_str).unwrap();
        let (sub_type, sub_payload) = codec.deserialize(&store.read(&subtree_hash).unwrap()).unwrap();
        assert_eq!(sub_type, ObjectType::Tree);
        let sub_text = String::from_utf8(sub_payload).unwrap();
        assert!(sub_text.contains("\tb"));
    }

    #[test]
    fn saving_the_same_tree_twice_is_treated_as_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        let codec = ObjectCodec::new();
        let builder = TreeBuilder::new(&store);
        let entries = vec![entry("only", b"content", &codec, &store)];

        let first = builder.build(&entries).unwrap().unwrap();
        let second = builder.build(&entries).unwrap().unwrap();
        assert_eq!(first, second);
    }
}

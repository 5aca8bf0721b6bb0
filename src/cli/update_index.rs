use dzhigit::hash::Hash;
use dzhigit::index::{self, IndexEntry, Mode};
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::Result;

pub fn run(hash: &str, file: &str, mode: &str) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());

    let hash = Hash::parse(hash)?;
    let mode = Mode::parse(mode)?;
    let entry = IndexEntry::new(file, mode, hash, &store)?;

    index::upsert(&paths.index_path(), &entry)?;
    log::debug!("staged {file} at {hash}");
    Ok(())
}

use dzhigit::index;
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::tree::TreeBuilder;
use dzhigit::{DzhigitError, Result};

pub fn run() -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let entries = index::read(&paths.index_path())?;

    let builder = TreeBuilder::new(&store);
    let root = builder
        .build(&entries)?
        .ok_or_else(|| DzhigitError::BadIndex("index is empty, nothing to commit".to_string()))?;

    println!("{root}");
    Ok(())
}

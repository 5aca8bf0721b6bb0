use dzhigit::codec::ObjectCodec;
use dzhigit::hash::ObjectType;
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::{DzhigitError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub fn run(write: bool, object_type: &str, file: &Path) -> Result<()> {
    let object_type = ObjectType::from_str(object_type)?;
    let content = fs::read(file)?;

    let codec = ObjectCodec::new();
    let (hash, compressed) = codec.serialize(&content, object_type)?;

    if write {
        let paths = RepoPaths::require_current()?;
        let store = ObjectStore::new(paths.objects_path());
        match store.save(&hash, &compressed) {
            Ok(()) | Err(DzhigitError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
    }

    println!("{hash}");
    Ok(())
}

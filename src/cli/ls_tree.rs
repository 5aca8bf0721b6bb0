use dzhigit::codec::ObjectCodec;
use dzhigit::hash::{Hash, ObjectType};
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::{DzhigitError, Result};

pub fn run(hash: &str) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let codec = ObjectCodec::new();

    let hash = Hash::parse(hash)?;
    let compressed = store.read(&hash)?;
    let (object_type, payload) = codec.deserialize(&compressed)?;
    if object_type != ObjectType::Tree {
        return Err(DzhigitError::WrongType {
            expected: ObjectType::Tree.to_string(),
            found: object_type.to_string(),
        });
    }

    print!("{}", String::from_utf8_lossy(&payload));
    Ok(())
}

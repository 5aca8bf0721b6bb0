use dzhigit::codec::ObjectCodec;
use dzhigit::hash::Hash;
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::Result;

pub fn run(hash: &str, show_type: bool, show_size: bool) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let codec = ObjectCodec::new();

    let hash = Hash::parse(hash)?;
    let compressed = store.read(&hash)?;
    let (object_type, payload) = codec.deserialize(&compressed)?;

    if show_type {
        println!("{object_type}");
    } else if show_size {
        println!("{}", payload.len());
    } else {
        print!("{}", String::from_utf8_lossy(&payload));
    }
    Ok(())
}

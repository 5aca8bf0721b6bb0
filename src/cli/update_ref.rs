use dzhigit::commit::CommitBuilder;
use dzhigit::hash::Hash;
use dzhigit::paths::RepoPaths;
use dzhigit::refs::RefStore;
use dzhigit::store::ObjectStore;
use dzhigit::Result;

pub fn run(name: &str, hash: &str) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let commits = CommitBuilder::new(&store);
    let refs = RefStore::new(&paths.repo_dir);

    let hash = Hash::parse(hash)?;
    refs.update_ref(name, hash, &commits)?;
    log::info!("updated refs/heads/{name} -> {hash}");
    Ok(())
}

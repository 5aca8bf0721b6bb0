use dzhigit::checkout::Checkout;
use dzhigit::paths::RepoPaths;
use dzhigit::refs::RefStore;
use dzhigit::store::ObjectStore;
use dzhigit::Result;

pub fn run(branch: &str) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let refs = RefStore::new(&paths.repo_dir);

    let checkout = Checkout::new(&store, &refs, paths.working_dir());
    checkout.checkout(branch)?;

    println!("Switched to branch '{branch}'");
    Ok(())
}

use dzhigit::commit::CommitBuilder;
use dzhigit::paths::RepoPaths;
use dzhigit::refs::{Head, RefStore};
use dzhigit::store::ObjectStore;
use dzhigit::{DzhigitError, Result};
use std::fs;

pub fn run(name: Option<&str>) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let refs = RefStore::new(&paths.repo_dir);

    match name {
        Some(name) => {
            let store = ObjectStore::new(paths.objects_path());
            let commits = CommitBuilder::new(&store);
            let head_branch = match refs.read_head()? {
                Head::Attached(branch) => branch,
                Head::Detached(_) => {
                    return Err(DzhigitError::NoHead);
                }
            };
            let tip = refs.read_branch(&head_branch)?;
            refs.update_ref(name, tip, &commits)?;
            println!("Created branch '{name}'");
        }
        None => {
            let heads_dir = paths.refs_heads_path();
            if heads_dir.exists() {
                for entry in fs::read_dir(heads_dir)? {
                    let entry = entry?;
                    println!("{}", entry.file_name().to_string_lossy());
                }
            }
        }
    }
    Ok(())
}

use dzhigit::commit::{CommitBuilder, NewCommit};
use dzhigit::config::Config;
use dzhigit::hash::Hash;
use dzhigit::paths::RepoPaths;
use dzhigit::store::ObjectStore;
use dzhigit::Result;
use chrono::Local;

pub fn run(message: &str, parent: Option<&str>, tree: &str) -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let author = Config::read(&paths.config_path())?.as_author();

    let tree = Hash::parse(tree)?;
    let parent = parent.map(Hash::parse).transpose()?;

    let builder = CommitBuilder::new(&store);
    let hash = builder.commit_tree(NewCommit {
        tree,
        parent,
        author: &author,
        message,
        time: Local::now(),
    })?;

    println!("{hash}");
    Ok(())
}

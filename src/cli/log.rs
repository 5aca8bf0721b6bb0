use dzhigit::commit::CommitBuilder;
use dzhigit::log as core_log;
use dzhigit::paths::RepoPaths;
use dzhigit::refs::RefStore;
use dzhigit::store::ObjectStore;
use dzhigit::Result;

/// Table rendering lives at the CLI boundary (spec §1: out of scope for
/// the core); [`dzhigit::log::log`] only returns the walked summaries.
pub fn run() -> Result<()> {
    let paths = RepoPaths::require_current()?;
    let store = ObjectStore::new(paths.objects_path());
    let commits = CommitBuilder::new(&store);
    let refs = RefStore::new(&paths.repo_dir);

    let summaries = core_log::log(&refs, &commits)?;
    for summary in summaries {
        println!("commit {}", summary.hash);
        println!("tree    {}", summary.short_tree_hash);
        println!(
            "Author: {} {}",
            summary.author.name, summary.author.email
        );
        println!("Date:   {}", summary.time.to_rfc2822());
        println!();
        for line in summary.message.lines() {
            println!("    {line}");
        }
        println!();
    }
    Ok(())
}

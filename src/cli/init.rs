use dzhigit::config::Config;
use dzhigit::paths::RepoPaths;
use dzhigit::{DzhigitError, Result};
use std::fs;

pub fn run() -> Result<()> {
    let paths = RepoPaths::discover(std::env::current_dir()?);
    if paths.exists() {
        return Err(DzhigitError::RepoExists);
    }

    fs::create_dir(&paths.repo_dir)?;
    fs::create_dir_all(paths.refs_heads_path())?;
    fs::create_dir(paths.objects_path())?;
    fs::write(paths.description_path(), "")?;
    fs::write(paths.index_path(), "")?;

    let author = prompt_author();
    author.write(&paths.config_path())?;

    log::info!("initialized repository at {}", paths.repo_dir.display());
    println!(
        "Initialized empty dzhigit repository in {}",
        paths.repo_dir.display()
    );
    Ok(())
}

/// No interactive terminal handling in this educational core — a name/email
/// pair is always synthesized from the environment, falling back to a
/// placeholder. A production derivative would prompt or read `git config`.
fn prompt_author() -> Config {
    Config {
        name: std::env::var("USER").unwrap_or_else(|_| "dzhigit".to_string()),
        email: std::env::var("EMAIL").unwrap_or_else(|_| "dzhigit@localhost".to_string()),
    }
}

//! The CLI dispatcher: argument parsing and the thin glue connecting
//! `clap` subcommands to the object-graph core. Not part of the core
//! itself (spec §1).

use clap::{Parser, Subcommand};
use dzhigit::Result;
use std::path::PathBuf;

mod branch;
mod cat_file;
mod checkout;
mod commit_tree;
mod hash_object;
mod init;
mod log;
mod ls_tree;
mod update_index;
mod update_ref;
mod write_tree;

#[derive(Parser)]
#[command(name = "dzhigit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Init => init::run(),
            Command::HashObject {
                write,
                object_type,
                file,
            } => hash_object::run(*write, object_type, file),
            Command::CatFile {
                hash,
                pretty: _,
                show_type,
                show_size,
            } => cat_file::run(hash, *show_type, *show_size),
            Command::UpdateIndex { hash, file, mode } => update_index::run(hash, file, mode),
            Command::LsTree { hash } => ls_tree::run(hash),
            Command::WriteTree => write_tree::run(),
            Command::CommitTree {
                message,
                parent,
                tree,
            } => commit_tree::run(message, parent.as_deref(), tree),
            Command::UpdateRef { name, hash } => update_ref::run(name, hash),
            Command::Checkout { branch } => checkout::run(branch),
            Command::Branch { name } => branch::run(name.as_deref()),
            Command::Log => log::run(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty repository in the current directory.
    Init,
    /// Hash a file's contents, optionally writing it to the object store.
    HashObject {
        /// Write the object to the store instead of only printing its hash.
        #[arg(short = 'w', long)]
        write: bool,
        /// Object type to frame the content as.
        #[arg(long = "type", default_value = "blob")]
        object_type: String,
        file: PathBuf,
    },
    /// Print the deserialized payload of a stored object.
    CatFile {
        hash: String,
        /// Print the payload as UTF-8-lossy text (default behavior).
        #[arg(long, conflicts_with_all = ["show_type", "show_size"])]
        pretty: bool,
        /// Print only the object's type.
        #[arg(short = 't', long = "type", conflicts_with = "show_size")]
        show_type: bool,
        /// Print only the object's payload size in bytes.
        #[arg(short = 's', long = "size")]
        show_size: bool,
    },
    /// Stage a blob hash under a working-tree path with the given mode.
    UpdateIndex {
        hash: String,
        file: String,
        mode: String,
    },
    /// List the entries of a tree object.
    LsTree { hash: String },
    /// Build the root tree object from the current index.
    WriteTree,
    /// Create a commit object pointing at a tree, with an optional parent.
    CommitTree {
        #[arg(short = 'm', long)]
        message: String,
        #[arg(short = 'p', long)]
        parent: Option<String>,
        tree: String,
    },
    /// Point a branch at a commit.
    UpdateRef { name: String, hash: String },
    /// Materialize a branch's tree into the working directory.
    Checkout { branch: String },
    /// List branches, or create one at the given name pointing at HEAD's commit.
    Branch { name: Option<String> },
    /// Print the commit chain reachable from HEAD.
    Log,
}

#![warn(clippy::all)]

use clap::Parser;
use cli::Cli;

mod cli;

fn main() {
    env_logger::init();
    let program = Cli::parse();
    if let Err(e) = program.run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

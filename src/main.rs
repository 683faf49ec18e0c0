//! The main entry point for the Lak interpreter CLI.
//!
//! # Usage
//!
//! ```text
//! lak repl
//! lak run <file.lak>
//! ```
//!
//! With no subcommand, `lak` starts an interactive REPL on stdin/stdout.

use clap::{Parser, Subcommand};
use lak::repl;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Parser)]
#[command(name = "lak")]
#[command(about = "A tree-walking interpreter for the Lak language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive read-eval-print loop on stdin/stdout.
    Repl,
    /// Feed a source file through the same line-at-a-time driver as the REPL.
    Run {
        /// The source file to interpret (e.g. `program.lak`).
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = io::stdin();
            repl::run(stdin.lock(), io::stdout())
        }
        Commands::Run { file } => match File::open(&file) {
            Ok(handle) => repl::run(BufReader::new(handle), io::stdout()),
            Err(e) => {
                eprintln!("Error: failed to open '{}': {}", file, e);
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

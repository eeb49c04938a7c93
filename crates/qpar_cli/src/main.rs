//! `qpar` — the command-line interface for the quantum-annealing Chimera
//! place-and-route compiler.
//!
//! Spec §6.1 is a tiny interactive shell, not a one-shot argv command:
//! fabric size and the placer's seed are flags on the `qpar` invocation
//! itself, then each line of stdin is one of five commands, each
//! returning `OK` or a diagnostic.

#![warn(missing_docs)]

mod config;
mod error;
mod netlist;
mod session;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use config::QparConfig;
use error::QparError;
use session::Session;

/// `qpar` — the fabric is sized once at process startup; everything after
/// that is the five-command interactive shell (spec §6.1), one per stdin
/// line.
#[derive(Parser, Debug)]
#[command(name = "qpar")]
struct Cli {
    #[command(flatten)]
    config: QparConfig,
}

/// One line of the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "qpar", no_binary_name = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

/// The five commands spec §6.1 exposes.
#[derive(Subcommand, Debug)]
enum ReplCommand {
    /// Parses a synthesis netlist file and sets it as the design.
    #[command(name = "build_qpar_nl")]
    BuildQparNl {
        /// Path to the netlist source file.
        path: String,
    },
    /// Derives the placement/routing model from the loaded design.
    #[command(name = "init_system")]
    InitSystem,
    /// Runs the placer and writes `final.place`.
    Place,
    /// Runs the router and writes `final.route`.
    Route,
    /// Builds the Ising model, writes `dwave.config`, and prints its ground energy.
    Generate,
}

fn main() {
    let cli = Cli::parse();
    let mut session = Session::new(&cli.config);
    let out_dir = PathBuf::from(".");
    let mut had_error = false;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error: {e}");
                had_error = true;
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens = shell_words(line);
        match ReplLine::try_parse_from(tokens) {
            Ok(repl) => match run(&mut session, repl.command, &out_dir) {
                Ok(message) => println!("OK{message}"),
                Err(e) => {
                    println!("ERROR: {e}");
                    had_error = true;
                }
            },
            Err(clap_err) => {
                println!("ERROR: {clap_err}");
                had_error = true;
            }
        }
        let _ = std::io::stdout().flush();
    }

    process::exit(if had_error { 1 } else { 0 });
}

fn run(session: &mut Session, command: ReplCommand, out_dir: &Path) -> Result<String, QparError> {
    match command {
        ReplCommand::BuildQparNl { path } => {
            session.build_qpar_nl(&path)?;
            Ok(String::new())
        }
        ReplCommand::InitSystem => {
            session.init_system()?;
            Ok(String::new())
        }
        ReplCommand::Place => {
            session.place(out_dir)?;
            Ok(String::new())
        }
        ReplCommand::Route => {
            session.route(out_dir)?;
            Ok(String::new())
        }
        ReplCommand::Generate => {
            let ground_energy = session.generate(out_dir)?;
            Ok(format!(" ground_energy={ground_energy}"))
        }
    }
}

/// Splits a shell line on whitespace. Pragmatic, not a full shell-word
/// parser (no quoting) — command arguments here are file paths and bare
/// keywords, not free text.
fn shell_words(line: &str) -> Vec<String> {
    line.split_whitespace().map(|s| s.to_string()).collect()
}

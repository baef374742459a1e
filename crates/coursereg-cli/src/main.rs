//! Course registration manager CLI.
//!
//! Provides the `coursereg` binary. Without a subcommand (or with `shell`)
//! it runs the interactive numbered menu; the other subcommands apply one
//! operation to the registration file and exit.
//!
//! The file and capacity come from `--file`/`--capacity`, then from
//! `COURSEREG_FILE`/`COURSEREG_CAPACITY`, then from the defaults.

mod commands;
mod render;
mod shell;

use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use coursereg_core::CourseId;
use coursereg_storage::{CourseStore, LoadHalt, StoreConfig};

use crate::commands::{Operation, EXIT_IO, EXIT_REFUSED};
use crate::shell::{Shell, ShellExit};

/// Course registration record manager.
#[derive(Parser)]
#[command(name = "coursereg", about = "Course registration record manager")]
struct Cli {
    /// Registration file path.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Maximum number of course records.
    #[arg(short, long, global = true)]
    capacity: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default).
    Shell,

    /// Display all courses.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up a course by ID.
    Search {
        #[arg(allow_negative_numbers = true)]
        id: CourseId,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a course and save.
    Add {
        #[arg(allow_negative_numbers = true)]
        id: CourseId,
        code: String,
        status: String,
    },

    /// Replace the code and status of a course and save.
    Update {
        #[arg(allow_negative_numbers = true)]
        id: CourseId,
        code: String,
        status: String,
    },

    /// Delete a course and save.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: CourseId,
    },
}

impl Commands {
    fn into_operation(self) -> Option<Operation> {
        Some(match self {
            Commands::Shell => return None,
            Commands::List { json } => Operation::List { json },
            Commands::Search { id, json } => Operation::Search { id, json },
            Commands::Add { id, code, status } => Operation::Add { id, code, status },
            Commands::Update { id, code, status } => Operation::Update { id, code, status },
            Commands::Delete { id } => Operation::Delete { id },
        })
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(file) = cli.file {
        config.path = file;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity.get();
    }

    let exit_code = match cli.command.unwrap_or(Commands::Shell).into_operation() {
        None => run_shell(config),
        Some(op) => run_operation(config, &op),
    };
    process::exit(exit_code);
}

/// Logs go to stderr so they never interleave with menu output.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the interactive menu.
///
/// Returns exit code: 0 = exited normally, 1 = unreadable menu choice,
/// 3 = final save failed or skipped because the file could not be read.
fn run_shell(config: StoreConfig) -> i32 {
    let (mut store, loaded) = CourseStore::open(config);
    let loaded_ok = loaded.is_ok();
    match loaded {
        Ok(report) => {
            println!(
                "Loaded {} record(s) from '{}'.",
                report.loaded,
                store.path().display()
            );
            if let Some(halt) = report.halted {
                println!("{}", describe_halt(&halt));
            }
        }
        Err(err) => println!(
            "{} Starting empty; changes are saved only with 6.",
            render::storage_error(&err)
        ),
    }

    let stdin = io::stdin();
    let shell = Shell::new(&mut store, stdin.lock(), io::stdout());
    // An unread file must not be overwritten by an automatic save.
    let shell = if loaded_ok { shell } else { shell.without_autosave() };
    let result = shell.run();
    match result {
        Ok(ShellExit::Saved) => 0,
        Ok(ShellExit::InvalidInput) => EXIT_REFUSED,
        Ok(ShellExit::SaveFailed | ShellExit::Unsaved) => EXIT_IO,
        Err(err) => {
            eprintln!("Error: terminal I/O failed: {}", err);
            EXIT_IO
        }
    }
}

/// Execute a one-shot subcommand.
///
/// Returns exit code: 0 = success, 1 = refused by the table rules,
/// 3 = I/O error.
fn run_operation(config: StoreConfig, op: &Operation) -> i32 {
    let (mut store, loaded) = CourseStore::open(config);
    match loaded {
        Ok(report) => {
            if let Some(halt) = report.halted {
                eprintln!("Warning: {}", describe_halt(&halt));
            }
        }
        Err(err) => {
            eprintln!("Error: {}", render::storage_error(&err));
            return EXIT_IO;
        }
    }

    match commands::execute(&mut store, op, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err.message());
            err.exit_code()
        }
    }
}

fn describe_halt(halt: &LoadHalt) -> String {
    match halt {
        LoadHalt::Malformed { line, reason } => {
            format!("Stopped reading at line {line} ({reason}); later records were skipped.")
        }
        LoadHalt::CapacityReached => {
            "Course list is full; remaining records were skipped.".to_string()
        }
    }
}

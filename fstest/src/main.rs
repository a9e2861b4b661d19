//! Filesystem exercise over a per-user folder layout.
//!
//! Creates `Config.txt` and the workspace folders under the user-data root,
//! writes a sample file, then archives save-data under a timestamped name.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use fstest::core::folders::{FolderKind, FolderSet};
use fstest::error::ConfigError;
use fstest::exit_codes;
use fstest::io::config::load_config;
use fstest::io::gate::{OpenGate, PhaseGate, StdinGate};
use fstest::io::paths::{AppPaths, resolve_root};
use fstest::logging;
use fstest::session::{ArchiveReport, Orchestrator, PrepareReport, run_all};

#[derive(Parser)]
#[command(
    name = "fstest",
    version,
    about = "Exercise basic filesystem operations under a per-user data root"
)]
struct Cli {
    /// User-data root (default: $FSTEST_ROOT, then <data dir>/FileSystemTest).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare the workspace, then archive save-data.
    Run {
        /// Wait for Enter between setup and archival.
        #[arg(long)]
        pause: bool,
    },
    /// Create the config, folders and sample file only.
    Prepare,
    /// Archive save-data left by an earlier `prepare`.
    Archive,
    /// Print the resolved root, config path and folder paths.
    Paths,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            if err.downcast_ref::<ConfigError>().is_some() {
                exit_codes::MALFORMED_CONFIG
            } else {
                exit_codes::FAILURE
            }
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = resolve_root(cli.root.as_deref())?;
    match cli.command {
        Command::Run { pause } => cmd_run(&root, pause),
        Command::Prepare => cmd_prepare(&root),
        Command::Archive => cmd_archive(&root),
        Command::Paths => cmd_paths(&root),
    }
}

fn cmd_run(root: &Path, pause: bool) -> Result<()> {
    let orchestrator = Orchestrator::open(root)?;
    let gate: &dyn PhaseGate = if pause { &StdinGate } else { &OpenGate };
    let (prepare, archive) = run_all(orchestrator, gate)?;
    print_prepare(&prepare);
    print_archive(&archive);
    Ok(())
}

fn cmd_prepare(root: &Path) -> Result<()> {
    let (_, report) = Orchestrator::open(root)?.prepare()?;
    print_prepare(&report);
    Ok(())
}

fn cmd_archive(root: &Path) -> Result<()> {
    let report = Orchestrator::open(root)?.resume()?.archive()?;
    print_archive(&report);
    Ok(())
}

fn cmd_paths(root: &Path) -> Result<()> {
    let paths = AppPaths::new(root);
    let folders = if paths.config_path.is_file() {
        load_config(&paths.config_path)?
    } else {
        FolderSet::default()
    };
    println!("root {}", paths.root.display());
    println!("config {}", paths.config_path.display());
    for kind in FolderKind::ALL {
        println!("{kind} {}", paths.folder(&folders, kind).display());
    }
    Ok(())
}

fn print_prepare(report: &PrepareReport) {
    for entry in &report.folders {
        println!("Setting path - {entry}");
    }
    for status in &report.directories {
        if status.created {
            println!("Create Dir {}", status.path.display());
        } else {
            println!("Dir {} exists", status.path.display());
        }
    }
    let sample = &report.sample;
    println!(
        "Created file {} with ext {} with a size of {} bytes",
        sample.name, sample.extension, sample.size
    );
}

fn print_archive(report: &ArchiveReport) {
    match &report.archived_to {
        Some(dest) => println!("Archived save data to {}", dest.display()),
        None => println!("No save data to archive"),
    }
}

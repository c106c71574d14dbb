//! rulesync - Shared Rule-File Propagation Across Branches
//!
//! Command-line entry point. Two subcommands map onto the two operations:
//! `derive` creates a customized branch from the current one, `sync`
//! propagates the shared file set from a source branch into targets.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::ExitCode;

use rulesync::commands::{derive_branch, sync_branches, SyncOutcome};
use rulesync::config::Config;
use rulesync::git_interface::RealGit;
use rulesync::ui::DialoguerUI;
use rulesync::utils::section_header;

/// Command-line arguments for rulesync
#[derive(Parser)]
#[command(name = "rulesync")]
#[command(about = "Propagate shared rule files across derived Git branches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new branch from the current one, renaming the marker file
    /// and removing excluded paths
    Derive {
        /// Desired branch name; sanitized before use
        name: String,

        /// Accept a sanitized name without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Copy the configured shared files from a source branch into target
    /// branches
    Sync {
        /// Branch to copy shared files from
        source: String,

        /// Target branches, in order; when omitted, all remote branches
        /// except the source and the configured skip list are used
        targets: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "✗ Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let git = RealGit::discover()?;
    let config = Config::load_from_path(git.workdir())?;

    match cli.command {
        Command::Derive { name, yes } => {
            println!();
            println!("{}", section_header("Derive Branch"));
            println!();

            match derive_branch(&git, &config, &DialoguerUI, &name, yes)? {
                Some(branch) => {
                    println!();
                    println!(
                        "{} Branch '{}' created and pushed.",
                        "»".bright_green().bold(),
                        branch.bright_yellow()
                    );
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("{}", "Aborted by user.".bright_black());
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
        Command::Sync { source, targets } => {
            println!();
            println!("{}", section_header("Sync Branches"));
            println!();

            let report = sync_branches(&git, &config, &source, &targets)?;
            print_report(&report.results);

            // Partial failures surface in the exit code so automation can
            // detect a branch that was left behind.
            if report.has_failures() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn print_report(results: &[(String, SyncOutcome)]) {
    println!();
    println!("{}", "Summary".bright_cyan().bold());

    for (branch, outcome) in results {
        match outcome {
            SyncOutcome::Updated { files } => {
                println!(
                    "  {} {} ({} file{})",
                    "✓".green(),
                    branch.bright_yellow(),
                    files.len(),
                    if files.len() == 1 { "" } else { "s" }
                );
            }
            SyncOutcome::NoChanges => {
                println!(
                    "  {} {} {}",
                    "•".blue(),
                    branch.bright_yellow(),
                    "no changes".bright_black()
                );
            }
            SyncOutcome::Failed(err) => {
                println!("  {} {} {err}", "✗".red(), branch.bright_yellow());
            }
        }
    }
}

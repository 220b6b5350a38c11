//! Generate utterances from a rules file.
//!
//! Usage: `ugen create <file> [--out FILE] [--force]`
//!        `ugen print <file> [--out FILE] [--force] [--rules NAMES...]`

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use ugen::output::{parse_rule_filter, render_listing, render_test_cases};
use ugen::{Grammar, TracingSink, UgenError};

#[derive(Parser, Debug)]
#[command(name = "ugen", version)]
#[command(about = "Generates utterances based on a combinatorial rules language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create labelled test cases (JSON) from the intent rules
    Create(Target),
    /// Print the utterances of every rule
    Print {
        #[command(flatten)]
        target: Target,

        /// Names of rules to display; space, comma or semicolon separated
        #[arg(short, long, num_args = 1..)]
        rules: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Input file with rules
    file: PathBuf,

    /// Write output to this file instead of standard output
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Overwrite the --out file if it already exists
    #[arg(short, long)]
    force: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the rendered output only.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(&cli.command) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(command: &Command) -> Result<(), UgenError> {
    let target = match command {
        Command::Create(target) | Command::Print { target, .. } => target,
    };

    if !target.file.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file '{}' does not exist", target.file.display()),
        )
        .into());
    }

    let grammar = Grammar::from_file(&target.file)?;
    // Individual validation errors are logged by the sink as they are found.
    let expansion = grammar.generate(TracingSink)?;

    let rendered = match command {
        Command::Create(_) => render_test_cases(&expansion)?,
        Command::Print { rules, .. } => {
            let only = parse_rule_filter(rules);
            render_listing(&expansion, Some(&only))
        }
    };

    match &target.out {
        Some(path) => write_output(path, &rendered, target.force),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, content: &str, force: bool) -> Result<(), UgenError> {
    if path.exists() && !force {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "the file '{}' already exists; use --force to overwrite it",
                path.display()
            ),
        )
        .into());
    }

    fs::write(path, content)?;
    info!("the file '{}' has been successfully created", path.display());
    Ok(())
}
